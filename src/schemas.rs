//! The built-in schema table.
//!
//! The core never defines the set of record types in play; it consults
//! whatever [`SchemaRegistry`] it is handed. This module is that
//! configuration: the standard lodging-domain types and their field
//! defaults. `BaseModel` carries two declared-but-unset fields so freshly
//! created records render them as null until first assignment.

use lodge_core::{FieldValue, Schema, SchemaRegistry};

/// The standard schema table.
pub fn builtin() -> SchemaRegistry {
    SchemaRegistry::new()
        .with(
            Schema::new("BaseModel")
                .field("name", FieldValue::Null)
                .field("my_number", FieldValue::Null),
        )
        .with(
            Schema::new("User")
                .field("email", FieldValue::Str(String::new()))
                .field("password", FieldValue::Str(String::new()))
                .field("first_name", FieldValue::Str(String::new()))
                .field("last_name", FieldValue::Str(String::new())),
        )
        .with(Schema::new("State").field("name", FieldValue::Str(String::new())))
        .with(
            Schema::new("City")
                .field("state_id", FieldValue::Str(String::new()))
                .field("name", FieldValue::Str(String::new())),
        )
        .with(Schema::new("Amenity").field("name", FieldValue::Str(String::new())))
        .with(
            Schema::new("Place")
                .field("city_id", FieldValue::Str(String::new()))
                .field("user_id", FieldValue::Str(String::new()))
                .field("name", FieldValue::Str(String::new()))
                .field("description", FieldValue::Str(String::new()))
                .field("number_rooms", FieldValue::Int(0))
                .field("number_bathrooms", FieldValue::Int(0))
                .field("max_guest", FieldValue::Int(0))
                .field("price_by_night", FieldValue::Int(0))
                .field("latitude", FieldValue::Float(0.0))
                .field("longitude", FieldValue::Float(0.0))
                .field("amenity_ids", FieldValue::StrList(Vec::new())),
        )
        .with(
            Schema::new("Review")
                .field("place_id", FieldValue::Str(String::new()))
                .field("user_id", FieldValue::Str(String::new()))
                .field("text", FieldValue::Str(String::new())),
        )
}
