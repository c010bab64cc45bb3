//! Object store for lodgedb: the in-memory registry of live records with
//! JSON-file persistence.

pub mod file_store;

pub use file_store::{FileStore, LoadMode, StoreOptions};
