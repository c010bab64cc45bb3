//! Shared error type for store operations.

use thiserror::Error;

/// All store-side errors.
///
/// User-input diagnostics are a separate concern (the dispatcher prints
/// those and keeps going); everything here is an actual fault of the store,
/// the backing file, or the configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Type name not present in the schema registry
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Registration collided with an existing key (strict-keys mode only)
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Backing file or one of its entries could not be interpreted
    #[error("corrupt store data: {0}")]
    Corrupt(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
