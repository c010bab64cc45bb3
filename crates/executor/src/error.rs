//! Error types for the command layer.
//!
//! Two tiers, per the console's contract: a [`UsageError`] is a printed
//! diagnostic and the loop keeps reading; everything else is a store
//! fault that must propagate.

use thiserror::Error;

/// A user-input diagnostic. `Display` is the exact line the console
/// prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    /// No type name was given
    #[error("** class name missing **")]
    MissingClass,

    /// The type name is not in the schema registry
    #[error("** class doesn't exist **")]
    UnknownClass,

    /// No instance id was given
    #[error("** instance id missing **")]
    MissingInstanceId,

    /// No record lives at the composite key
    #[error("** no instance found **")]
    InstanceNotFound,

    /// No attribute name was given to update
    #[error("** attribute name missing **")]
    MissingAttribute,

    /// No value was given to update
    #[error("** value missing **")]
    MissingValue,

    /// id / created_at / updated_at are not user-mutable
    #[error("** attribute cannot be updated **")]
    ReservedAttribute,

    /// The value does not parse as the field's current numeric type
    #[error("** invalid value type **")]
    InvalidValueType,

    /// The line matches no recognized verb or method-call form
    #[error("** unknown command **")]
    UnknownCommand,
}

/// Any failure of a dispatched command.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-fatal: print the diagnostic and keep the loop running
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Fatal for the command: persistence or configuration fault
    #[error(transparent)]
    Store(#[from] lodge_core::Error),
}

/// Result type for dispatched commands.
pub type Result<T> = std::result::Result<T, Error>;
