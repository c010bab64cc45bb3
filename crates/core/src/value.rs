//! Field value types for lodgedb records.
//!
//! Every record field holds exactly one of the variants below. The set is
//! closed: the update operation decides its parse strategy by matching on
//! the current variant, so adding a variant is a semantic change, not just
//! a convenience.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a single record field.
///
/// Serialized untagged so the backing file stays plain JSON: `Null` is
/// `null`, numbers are numbers, strings are strings, and string lists are
/// JSON arrays. There is no coercion between variants on equality:
/// `Int(1) != Float(1.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Declared but never assigned
    Null,

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit IEEE-754 floating point
    Float(f64),

    /// UTF-8 string
    Str(String),

    /// Ordered list of strings (e.g. ids of related records)
    StrList(Vec<String>),
}

impl FieldValue {
    /// Returns the variant name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Int(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::Str(_) => "Str",
            FieldValue::StrList(_) => "StrList",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Try to get as i64.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as string list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::StrList(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a JSON value into a field value, if it is representable.
    ///
    /// Booleans, objects, and non-string arrays have no variant and yield
    /// `None`; the loader skips such fields.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the decimal point on integral floats
            FieldValue::Float(x) => write!(f, "{:?}", x),
            FieldValue::Str(s) => write!(f, "{:?}", s),
            FieldValue::StrList(items) => write!(f, "{:?}", items),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::StrList(items)
    }
}
