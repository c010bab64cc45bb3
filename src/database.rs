//! Main entry point: the [`Lodge`] facade and its builder.

use std::path::{Path, PathBuf};

use lodge_core::SchemaRegistry;
use lodge_executor::{Command, Executor, Output};
use lodge_storage::{FileStore, LoadMode, StoreOptions};

use crate::error::Result;
use crate::schemas;

/// A loaded store plus its command executor.
///
/// # Example
///
/// ```ignore
/// let mut lodge = Lodge::open("./lodge.json")?;
/// lodge.dispatch_line("create User")?;
/// ```
#[derive(Debug)]
pub struct Lodge {
    executor: Executor,
}

impl Lodge {
    /// Open a store at `path` with the built-in schema table and default
    /// options, loading any existing snapshot.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a builder for non-default configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let lodge = Lodge::builder()
    ///     .path("./lodge.json")
    ///     .strict_load()
    ///     .open()?;
    /// ```
    pub fn builder() -> LodgeBuilder {
        LodgeBuilder::new()
    }

    /// Parse and execute one console line. `Ok(None)` means a blank line.
    ///
    /// Meta-commands (`quit`) are the loop's concern, not the store's:
    /// check [`crate::check_meta_command`] before calling this.
    pub fn dispatch_line(&mut self, line: &str) -> Result<Option<Output>> {
        self.executor.dispatch_line(line).map_err(Into::into)
    }

    /// Execute one parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Output> {
        self.executor.execute(command).map_err(Into::into)
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &FileStore {
        self.executor.store()
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut FileStore {
        self.executor.store_mut()
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        self.executor.store().path()
    }
}

/// Builder for [`Lodge`] configuration.
#[derive(Debug)]
pub struct LodgeBuilder {
    path: PathBuf,
    registry: Option<SchemaRegistry>,
    options: StoreOptions,
}

impl LodgeBuilder {
    /// Start from the defaults: `lodge.json`, built-in schemas, lenient
    /// load, last-write-wins registration.
    pub fn new() -> Self {
        LodgeBuilder {
            path: PathBuf::from("lodge.json"),
            registry: None,
            options: StoreOptions::default(),
        }
    }

    /// Set the backing file path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    /// Supply a schema table other than [`schemas::builtin`].
    pub fn registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Surface corrupt files and unknown discriminators on load instead of
    /// skipping them.
    pub fn strict_load(mut self) -> Self {
        self.options.load_mode = LoadMode::Strict;
        self
    }

    /// Reject duplicate record keys on registration instead of
    /// overwriting.
    pub fn strict_keys(mut self) -> Self {
        self.options.strict_keys = true;
        self
    }

    /// Build the store, load any existing snapshot, and wrap it.
    pub fn open(self) -> Result<Lodge> {
        let registry = self.registry.unwrap_or_else(schemas::builtin);
        let mut store = FileStore::with_options(self.path, registry, self.options);
        store.load()?;
        Ok(Lodge {
            executor: Executor::new(store),
        })
    }
}

impl Default for LodgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
