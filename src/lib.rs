//! # lodgedb
//!
//! A small file-backed record store with a line-oriented console. Typed
//! records (User, Place, Review, …) live in memory, are mirrored to a
//! single JSON file on every mutation, and are driven through
//! create/show/destroy/all/update/count commands.
//!
//! ## Quick Start
//!
//! ```ignore
//! use lodgedb::prelude::*;
//!
//! // Open (and load) a store with the built-in schema table
//! let mut lodge = Lodge::open("./lodge.json")?;
//!
//! // Drive it one console line at a time
//! lodge.dispatch_line("create User")?;
//! lodge.dispatch_line("count User")?;
//!
//! // Or with parsed commands
//! lodge.execute(Command::All { class: None })?;
//! ```
//!
//! ## Layering
//!
//! - [`lodge_core`]: `FieldValue` / `Record` / `Schema` data model
//! - [`lodge_storage`]: the `FileStore` object store with JSON persistence
//! - [`lodge_executor`]: line parsing and command execution
//! - this crate: the [`Lodge`] facade, unified [`Error`], and the
//!   built-in [`schemas`] table

#![warn(missing_docs)]

mod database;
mod error;

pub mod prelude;
pub mod schemas;

// Re-export main entry points
pub use database::{Lodge, LodgeBuilder};
pub use error::{Error, Result};

// Re-export the data model
pub use lodge_core::{Error as StoreError, FieldValue, Record, Schema, SchemaRegistry, RESERVED_FIELDS};

// Re-export the store and command layers
pub use lodge_executor::{check_meta_command, Command, MetaCommand, Output, UpdateArgs, UsageError};
pub use lodge_storage::{FileStore, LoadMode, StoreOptions};
