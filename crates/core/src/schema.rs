//! Schemas and the schema registry.
//!
//! A [`Schema`] names one record type and carries its field defaults plus
//! the two constructors the design calls for: `instantiate` for fresh
//! records and `rehydrate` for records read back from the backing file.
//! The [`SchemaRegistry`] is an explicit value handed to the store and the
//! dispatcher at construction time; the core never consults any ambient
//! table.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::record::{Record, RESERVED_FIELDS};
use crate::value::FieldValue;

/// Field set and defaults for one record type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    defaults: IndexMap<String, FieldValue>,
}

impl Schema {
    /// Start a schema with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Schema {
            name: name.into(),
            defaults: IndexMap::new(),
        }
    }

    /// Declare a field with its default value. Declaration order is the
    /// field order of every record built from this schema.
    pub fn field(mut self, name: impl Into<String>, default: FieldValue) -> Self {
        self.defaults.insert(name.into(), default);
        self
    }

    /// Type name this schema constructs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared defaults, in declaration order.
    pub fn defaults(&self) -> &IndexMap<String, FieldValue> {
        &self.defaults
    }

    /// Construct a fresh record: new id, `created_at == updated_at == now`,
    /// fields from the declared defaults. Does NOT register the record;
    /// the store's create path does that explicitly.
    pub fn instantiate(&self) -> Record {
        Record::new(&self.name, self.defaults.clone())
    }

    /// Reconstruct a record from its stored JSON entry, keeping the exact
    /// id and timestamps from disk. Does NOT register the record; the
    /// loader inserts it directly.
    ///
    /// Stored fields overlay the declared defaults, so a record persisted
    /// before a schema gained a field still rehydrates with that field's
    /// default. Stored values with no [`FieldValue`] representation are
    /// dropped.
    pub fn rehydrate(&self, stored: &serde_json::Map<String, serde_json::Value>) -> Result<Record> {
        let id = stored
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Corrupt(format!("{} entry has no id", self.name)))?;
        let created_at = self.parse_timestamp(stored, "created_at")?;
        let updated_at = self.parse_timestamp(stored, "updated_at")?;

        let mut fields = self.defaults.clone();
        for (name, value) in stored {
            if name == "type" || RESERVED_FIELDS.contains(&name.as_str()) {
                continue;
            }
            if let Some(parsed) = FieldValue::from_json(value) {
                fields.insert(name.clone(), parsed);
            }
        }

        Ok(Record::from_parts(
            &self.name, id, created_at, updated_at, fields,
        ))
    }

    fn parse_timestamp(
        &self,
        stored: &serde_json::Map<String, serde_json::Value>,
        key: &str,
    ) -> Result<DateTime<Utc>> {
        let raw = stored
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::Corrupt(format!("{} entry has no {}", self.name, key)))?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::Corrupt(format!("{} entry has a bad {}: {}", self.name, key, e)))
    }
}

/// The set of record types in play: type name → [`Schema`].
///
/// Built once at configuration time and passed by value to whatever needs
/// it. Iteration order is registration order.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Schema>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema, keyed by its name.
    pub fn with(mut self, schema: Schema) -> Self {
        self.schemas.insert(schema.name().to_string(), schema);
        self
    }

    /// Whether `name` is a registered type.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Look up one schema.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Registered type names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
