//! Core data model for lodgedb.
//!
//! This crate defines the fundamental types shared by the store and the
//! command dispatcher:
//! - [`FieldValue`]: the closed set of value types a record field can hold
//! - [`Record`]: one persisted domain object (id + timestamps + typed fields)
//! - [`Schema`] / [`SchemaRegistry`]: per-type field defaults and constructors
//! - [`Error`]: the shared error type for store operations

pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use record::{Record, RESERVED_FIELDS};
pub use schema::{Schema, SchemaRegistry};
pub use value::FieldValue;
