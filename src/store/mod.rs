//! Row store boundary.
//!
//! A row store is a header-indexed, row-oriented table container: row 0 of
//! every table is the authoritative header row, and every other row is data
//! zipped positionally against those headers. Spreadsheet backends fit this
//! contract directly; [`MemoryRowStore`] is the in-process reference
//! implementation used by tests and embedders.

pub mod errors;
pub mod memory;

use serde_json::{Number, Value};

use crate::schema::FieldType;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryRowStore;

/// Contract every row store backend implements.
///
/// Mutators take `&mut self`: within a process the borrow checker serializes
/// writers, which is the only isolation this layer promises.
pub trait RowStore {
    /// Reads all rows of a table; row 0 is the header row.
    fn get_all_rows(&self, table: &str) -> StoreResult<Vec<Vec<Value>>>;

    /// Appends a data row.
    fn append_row(&mut self, table: &str, row: Vec<Value>) -> StoreResult<()>;

    /// Replaces the row at `row_index` (0 is the header row).
    fn set_row(&mut self, table: &str, row_index: usize, row: Vec<Value>) -> StoreResult<()>;

    /// Replaces a single cell.
    fn set_cell(
        &mut self,
        table: &str,
        row_index: usize,
        col_index: usize,
        value: Value,
    ) -> StoreResult<()>;

    /// Whether a table exists.
    fn table_exists(&self, table: &str) -> bool;

    /// Creates an empty table with the given header row.
    fn create_table(&mut self, table: &str, headers: Vec<String>) -> StoreResult<()>;
}

/// Normalizes a cell read back from a loosely typed store.
///
/// Sheet-like backends round-trip booleans as the strings "TRUE"/"FALSE"
/// and numbers as digit strings. Normalization is schema-driven and runs at
/// this boundary, before any value reaches the validator; without it, valid
/// round-tripped data would be rejected.
pub fn normalize_cell(field_type: FieldType, value: Value) -> Value {
    match (field_type, value) {
        (FieldType::Boolean, Value::String(s)) => match s.to_ascii_uppercase().as_str() {
            "TRUE" => Value::Bool(true),
            "FALSE" => Value::Bool(false),
            _ => Value::String(s),
        },
        (FieldType::Number, Value::String(s)) if !s.is_empty() => {
            if let Ok(i) = s.trim().parse::<i64>() {
                Value::Number(i.into())
            } else if let Some(n) = s.trim().parse::<f64>().ok().and_then(Number::from_f64) {
                Value::Number(n)
            } else {
                Value::String(s)
            }
        }
        (_, value) => value,
    }
}
