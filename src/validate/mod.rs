//! Record validation against entity schemas.
//!
//! The validator is pure and stateless: it reads schema definitions, never
//! touches a store, and collects every violation in one pass rather than
//! failing on the first.

pub mod cpf;
pub mod formats;

use std::sync::Arc;

use serde_json::Value;

use crate::schema::{FieldType, Record, SchemaRegistry, SchemaResult};

pub use cpf::is_valid_cpf;
pub use formats::{is_valid_date, is_valid_email, is_valid_phone};

/// Outcome of validating one candidate record.
///
/// Errors are ordered by schema-declaration order of the offending fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Human-readable field errors, empty when the record is valid
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True when no field violated its contract.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates candidate records against registered entity schemas.
pub struct Validator {
    registry: Arc<SchemaRegistry>,
}

impl Validator {
    /// Creates a validator over the given registry.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Validates a candidate record for an entity.
    ///
    /// Per field, in schema-declaration order:
    /// 1. required + absent: one "is required" error, no further checks
    /// 2. optional + absent: skipped (defaults are the repository's job)
    /// 3. present: type check dispatched on the declared field type
    ///
    /// Readonly enforcement is not done here; the repository strips
    /// client-supplied readonly fields before validation runs.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::SchemaNotFound` for an unknown entity. A record
    /// that merely violates its contract is an `Ok` report with errors.
    pub fn validate(&self, entity: &str, candidate: &Record) -> SchemaResult<ValidationReport> {
        let schema = self.registry.schema(entity)?;
        let mut errors = Vec::new();

        for field in &schema.fields {
            let value = match candidate.get(&field.name) {
                value if is_absent(value) => {
                    if field.required {
                        errors.push(format!("field '{}' is required", field.name));
                    }
                    continue;
                }
                Some(value) => value,
                // is_absent covers None
                None => continue,
            };

            if let Some(error) = check_type(&field.name, field.field_type, value) {
                errors.push(error);
            }
        }

        Ok(ValidationReport { errors })
    }
}

/// Absent means missing, null, or the empty string.
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Type-checks one present value, returning the error message on mismatch.
fn check_type(name: &str, field_type: FieldType, value: &Value) -> Option<String> {
    let ok = match field_type {
        FieldType::String => value.is_string(),
        // serde_json numbers are never NaN; anything else fails
        FieldType::Number => value.is_number(),
        FieldType::Date => value.as_str().is_some_and(is_valid_date),
        // Strictly boolean. Store adapters normalize "TRUE"/"FALSE" cells
        // before this check runs; a stringly boolean reaching here is a bug
        // in the caller, not valid data.
        FieldType::Boolean => value.is_boolean(),
        FieldType::NationalId => value.as_str().is_some_and(is_valid_cpf),
        FieldType::Phone => value.as_str().is_some_and(is_valid_phone),
        FieldType::Email => value.as_str().is_some_and(is_valid_email),
    };

    if ok {
        None
    } else {
        Some(format!(
            "field '{}' must be a valid {}",
            name,
            field_type.type_name()
        ))
    }
}
