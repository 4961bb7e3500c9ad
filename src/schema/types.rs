//! Schema type definitions.
//!
//! Supported field types:
//! - string: UTF-8 string
//! - number: numeric value (integer or float, never NaN)
//! - date: calendar date
//! - boolean: strict boolean
//! - national-id: Brazilian CPF with two-pass mod-11 checksum
//! - phone: national fixed/mobile number
//! - email: standard address grammar

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A record is an ordered mapping from logical field name to scalar value.
///
/// Ordering follows schema-declaration order for rows mapped out of a store;
/// `serde_json`'s `preserve_order` feature keeps it stable through snapshots.
pub type Record = serde_json::Map<String, Value>;

/// Closed set of supported field types.
///
/// Unknown type strings fail config deserialization; an unrecognized type
/// is a configuration error, never a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Numeric value, integer or float
    Number,
    /// Calendar date
    Date,
    /// Strict boolean
    Boolean,
    /// Brazilian CPF
    NationalId,
    /// National fixed or mobile phone number
    Phone,
    /// Email address
    Email,
}

impl FieldType {
    /// Returns the type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::NationalId => "national-id",
            FieldType::Phone => "phone",
            FieldType::Email => "email",
        }
    }
}

/// Definition of one logical field of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Logical field name
    pub name: String,
    /// Field data type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present and non-empty
    #[serde(default)]
    pub required: bool,
    /// Display name; carries no logic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Applied on create when the field is absent from the input
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Rejects client-supplied writes; the repository strips these
    #[serde(default)]
    pub readonly: bool,
}

impl FieldDef {
    /// Creates a field definition with the given name and type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            label: None,
            default_value: None,
            readonly: false,
        }
    }

    /// Marks the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the field readonly.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Sets the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the create-time default.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Schema of one entity: ordered field definitions, the physical table it
/// maps to, and a sparse logical-field to physical-column alias map.
///
/// Immutable after registration in the [`SchemaRegistry`].
///
/// [`SchemaRegistry`]: super::registry::SchemaRegistry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Physical table name
    pub table: String,
    /// Logical-field to physical-column aliases; fields absent from the map
    /// use their logical name as the physical header verbatim
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Field definitions in declaration order
    pub fields: Vec<FieldDef>,
}

impl EntitySchema {
    /// Creates a schema mapped to the given physical table.
    pub fn new(table: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            table: table.into(),
            aliases: HashMap::new(),
            fields,
        }
    }

    /// Adds a logical-field to physical-column alias.
    pub fn alias(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.aliases.insert(field.into(), column.into());
        self
    }

    /// Looks up a field definition by logical name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolves a logical field name to its physical column header.
    ///
    /// Aliasing is sparse in declaration but total in effect: every logical
    /// field resolves to exactly one header. Unaliased fields resolve to the
    /// given name itself, so the result borrows from either the schema or
    /// the input.
    pub fn physical_column<'a>(&'a self, field: &'a str) -> &'a str {
        self.aliases.get(field).map(String::as_str).unwrap_or(field)
    }

    /// Returns the physical column headers in schema-declaration order.
    pub fn physical_columns(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| self.physical_column(&f.name).to_string())
            .collect()
    }

    /// Validates the schema structure itself (not a record).
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("schema must declare at least one field".into());
        }
        for field in &self.fields {
            let count = self.fields.iter().filter(|f| f.name == field.name).count();
            if count > 1 {
                return Err(format!("duplicate field '{}'", field.name));
            }
        }
        for aliased in self.aliases.keys() {
            if self.field(aliased).is_none() {
                return Err(format!("alias for undeclared field '{}'", aliased));
            }
        }
        Ok(())
    }
}
