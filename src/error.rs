//! Unified error type for embedders.

use thiserror::Error;

/// All lodgedb errors, split the way the console treats them.
#[derive(Debug, Error)]
pub enum Error {
    /// A user-input diagnostic. Non-fatal: print it and keep going. Its
    /// `Display` is the exact console line (e.g. `** no instance found **`).
    #[error(transparent)]
    Usage(#[from] lodge_executor::UsageError),

    /// A store or persistence fault. Fatal for the triggering command.
    #[error(transparent)]
    Store(#[from] lodge_core::Error),
}

/// Result type for lodgedb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<lodge_executor::Error> for Error {
    fn from(e: lodge_executor::Error) -> Self {
        match e {
            lodge_executor::Error::Usage(e) => Error::Usage(e),
            lodge_executor::Error::Store(e) => Error::Store(e),
        }
    }
}
