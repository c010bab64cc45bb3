//! Convenient imports for lodgedb.
//!
//! ```ignore
//! use lodgedb::prelude::*;
//!
//! let mut lodge = Lodge::open("./lodge.json")?;
//! lodge.dispatch_line("create User")?;
//! ```

// Main entry point
pub use crate::database::{Lodge, LodgeBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Data model
pub use crate::{FieldValue, Record, Schema, SchemaRegistry};

// Store and command layers
pub use crate::{Command, FileStore, LoadMode, Output, StoreOptions, UpdateArgs};
