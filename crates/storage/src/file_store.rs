//! FileStore: the authoritative set of live records plus its JSON mirror.
//!
//! One store instance owns one backing file. Every mutating command does a
//! full-snapshot rewrite of that file before returning, so durability is
//! "the last completed command is on disk". Writes go through a sibling
//! temp file and a rename, so a reader never observes a half-written
//! snapshot.
//!
//! Loading is tolerant by default: a file that is not valid JSON yields an
//! empty store, and entries whose `type` discriminator is not in the
//! registry are skipped. [`LoadMode::Strict`] turns both into errors.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, warn};

use lodge_core::{Error, Record, Result, SchemaRegistry};

/// How `load` treats data it cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Skip what does not validate; corrupt file → empty store
    #[default]
    Lenient,
    /// Surface corrupt files, unknown discriminators, and malformed
    /// entries as errors
    Strict,
}

/// Store configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Validation policy for `load`
    pub load_mode: LoadMode,
    /// Reject registration on an already-occupied key instead of
    /// overwriting (default is last-write-wins)
    pub strict_keys: bool,
}

/// In-memory registry of live records, keyed `"<Type>.<id>"`, mirrored to
/// a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    registry: SchemaRegistry,
    objects: IndexMap<String, Record>,
    options: StoreOptions,
}

impl FileStore {
    /// Create a store over `path` with default options. Does not touch the
    /// filesystem; call [`FileStore::load`] to read an existing snapshot.
    pub fn new(path: impl Into<PathBuf>, registry: SchemaRegistry) -> Self {
        Self::with_options(path, registry, StoreOptions::default())
    }

    /// Create a store with explicit options.
    pub fn with_options(
        path: impl Into<PathBuf>,
        registry: SchemaRegistry,
        options: StoreOptions,
    ) -> Self {
        FileStore {
            path: path.into(),
            registry,
            objects: IndexMap::new(),
            options,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema registry this store consults.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The live set, in insertion order. No copy; mutation goes through
    /// [`FileStore::get_mut`] / [`FileStore::register`] / [`FileStore::remove`].
    pub fn all(&self) -> &IndexMap<String, Record> {
        &self.objects
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether `key` identifies a live record.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Look up one record by composite key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.objects.get(key)
    }

    /// Mutable lookup by composite key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.objects.get_mut(key)
    }

    /// Construct a fresh record of `type_name` from its schema and register
    /// it. Returns the generated id.
    pub fn create(&mut self, type_name: &str) -> Result<String> {
        let schema = self
            .registry
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;
        let record = schema.instantiate();
        let id = record.id().to_string();
        self.register(record)?;
        Ok(id)
    }

    /// Insert `record` at its composite key.
    ///
    /// Last write wins on a colliding key; with `strict_keys` the collision
    /// is a [`Error::DuplicateKey`] instead.
    pub fn register(&mut self, record: Record) -> Result<()> {
        let key = record.key();
        if self.options.strict_keys && self.objects.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }
        self.objects.insert(key, record);
        Ok(())
    }

    /// Remove and return the record at `key`, if any.
    pub fn remove(&mut self, key: &str) -> Option<Record> {
        self.objects.shift_remove(key)
    }

    /// Write the full snapshot to the backing file.
    ///
    /// The snapshot is one JSON object keyed `"<Type>.<id>"`; each entry is
    /// the record's field map plus its `type` discriminator. The write goes
    /// to a sibling temp file first and is renamed into place. I/O failures
    /// propagate.
    pub fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.objects)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        debug!(
            path = %self.path.display(),
            records = self.objects.len(),
            "persisted snapshot"
        );
        Ok(())
    }

    /// Read the backing file into the live set.
    ///
    /// Missing file: no-op. Invalid JSON: empty store (lenient) or
    /// [`Error::Corrupt`] (strict). Per-entry failures — unknown
    /// discriminator, malformed record — are skipped in lenient mode and
    /// surfaced in strict mode. Loaded records keep their stored ids and
    /// timestamps; they are inserted directly, not re-registered as new.
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let raw = fs::read_to_string(&self.path)?;
        let entries = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(_) => {
                if self.options.load_mode == LoadMode::Strict {
                    return Err(Error::Corrupt("backing file is not a JSON object".into()));
                }
                warn!(
                    path = %self.path.display(),
                    "backing file is not a JSON object; starting empty"
                );
                return Ok(());
            }
            Err(e) => {
                if self.options.load_mode == LoadMode::Strict {
                    return Err(Error::Corrupt(e.to_string()));
                }
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "backing file is not valid JSON; starting empty"
                );
                return Ok(());
            }
        };

        for (key, value) in &entries {
            match self.rehydrate_entry(key, value) {
                Ok(record) => {
                    self.objects.insert(key.clone(), record);
                }
                Err(e) => {
                    if self.options.load_mode == LoadMode::Strict {
                        return Err(e);
                    }
                    debug!(key = %key, error = %e, "skipping entry");
                }
            }
        }
        debug!(
            path = %self.path.display(),
            records = self.objects.len(),
            "loaded snapshot"
        );
        Ok(())
    }

    fn rehydrate_entry(&self, key: &str, value: &serde_json::Value) -> Result<Record> {
        let entry = value
            .as_object()
            .ok_or_else(|| Error::Corrupt(format!("entry {} is not an object", key)))?;
        let type_name = entry
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Corrupt(format!("entry {} has no type discriminator", key)))?;
        let schema = self
            .registry
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))?;
        schema.rehydrate(entry)
    }
}
