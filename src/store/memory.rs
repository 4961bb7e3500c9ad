//! In-memory row store.
//!
//! Reference [`RowStore`] implementation backing tests and in-process use.
//! Tables are plain row vectors; row 0 is the header row.

use std::collections::HashMap;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::RowStore;

/// A row store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryRowStore {
    tables: HashMap<String, Vec<Vec<Value>>>,
}

impl MemoryRowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a table with the given rows (row 0 must be the header row).
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<Vec<Value>>) -> Self {
        self.tables.insert(table.into(), rows);
        self
    }

    fn table(&self, table: &str) -> StoreResult<&Vec<Vec<Value>>> {
        self.tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }

    fn table_mut(&mut self, table: &str) -> StoreResult<&mut Vec<Vec<Value>>> {
        self.tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))
    }
}

impl RowStore for MemoryRowStore {
    fn get_all_rows(&self, table: &str) -> StoreResult<Vec<Vec<Value>>> {
        self.table(table).cloned()
    }

    fn append_row(&mut self, table: &str, row: Vec<Value>) -> StoreResult<()> {
        self.table_mut(table)?.push(row);
        Ok(())
    }

    fn set_row(&mut self, table: &str, row_index: usize, row: Vec<Value>) -> StoreResult<()> {
        let rows = self.table_mut(table)?;
        let slot = rows.get_mut(row_index).ok_or(StoreError::RowOutOfRange {
            table: table.to_string(),
            row: row_index,
        })?;
        *slot = row;
        Ok(())
    }

    fn set_cell(
        &mut self,
        table: &str,
        row_index: usize,
        col_index: usize,
        value: Value,
    ) -> StoreResult<()> {
        let rows = self.table_mut(table)?;
        let row = rows.get_mut(row_index).ok_or(StoreError::RowOutOfRange {
            table: table.to_string(),
            row: row_index,
        })?;
        let cell = row.get_mut(col_index).ok_or(StoreError::ColumnOutOfRange {
            table: table.to_string(),
            row: row_index,
            col: col_index,
        })?;
        *cell = value;
        Ok(())
    }

    fn table_exists(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    fn create_table(&mut self, table: &str, headers: Vec<String>) -> StoreResult<()> {
        if self.tables.contains_key(table) {
            return Err(StoreError::Io(format!("table '{}' already exists", table)));
        }
        let header_row = headers.into_iter().map(Value::String).collect();
        self.tables.insert(table.to_string(), vec![header_row]);
        Ok(())
    }
}
