//! Record: one persisted domain object instance.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

use crate::value::FieldValue;

/// Fields managed by the record itself, never settable through update.
pub const RESERVED_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// One persisted domain object: immutable identity, timestamps, and an
/// ordered map of schema-defined fields.
///
/// Serializes flat: the field map is flattened next to `type`, `id`,
/// `created_at`, and `updated_at`, so each backing-file entry is a single
/// JSON object with a `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(rename = "type")]
    type_name: String,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Construct a fresh record: new UUID v4 id, `created_at == updated_at`.
    ///
    /// The caller (normally [`crate::Schema::instantiate`] via the store's
    /// create path) is responsible for registering the result.
    pub fn new(type_name: impl Into<String>, fields: IndexMap<String, FieldValue>) -> Self {
        let now = Utc::now();
        Record {
            type_name: type_name.into(),
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Reassemble a record from stored parts, keeping the exact id and
    /// timestamps from disk. Used by [`crate::Schema::rehydrate`].
    pub fn from_parts(
        type_name: impl Into<String>,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        fields: IndexMap<String, FieldValue>,
    ) -> Self {
        Record {
            type_name: type_name.into(),
            id: id.into(),
            created_at,
            updated_at,
            fields,
        }
    }

    /// The composite store key, `"<Type>.<id>"`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.type_name, self.id)
    }

    /// Schema name of this record.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Opaque unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-save timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The type-specific fields, in insertion order.
    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    /// Look up one field.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Set a field, appending it if it did not exist yet.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Refresh `updated_at`.
    ///
    /// Strictly increasing even when the wall clock has not advanced since
    /// the previous save: a stalled clock bumps the old value by one
    /// nanosecond instead.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::nanoseconds(1)
        };
    }

    /// Whether `name` is one of the record-managed fields.
    pub fn is_reserved(name: &str) -> bool {
        RESERVED_FIELDS.contains(&name)
    }
}

impl fmt::Display for Record {
    /// Canonical text form: `[<Type>] (<id>) {<field-map>}`, with `id`,
    /// `created_at`, `updated_at` first and type-specific fields in
    /// insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{id: {:?}, created_at: {}, updated_at: {}",
            self.type_name,
            self.id,
            self.id,
            self.created_at.to_rfc3339(),
            self.updated_at.to_rfc3339(),
        )?;
        for (name, value) in &self.fields {
            write!(f, ", {}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
