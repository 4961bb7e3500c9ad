//! Generic CRUD engine over a row store.
//!
//! Every operation is entity-scoped: the registry maps the entity to its
//! physical table and column headers, the validator gates writes, and the
//! audit log captures prior state before anything is mutated. Reads verify
//! the stored header row against the configured columns on every call; a
//! drifted sheet is a configuration defect, not something to zip through
//! silently.

use std::sync::Arc;

use serde_json::Value;

use crate::audit::{AuditAction, AuditEntry, AuditLog};
use crate::identity::ActorProvider;
use crate::observe::Logger;
use crate::schema::{EntitySchema, Record, SchemaRegistry};
use crate::store::{normalize_cell, RowStore};
use crate::validate::Validator;

use super::errors::{RepoError, RepoResult};
use super::options::{loose_cmp, loose_eq, value_text, ListOptions, SortDirection};

/// Logical field carrying record identity.
pub const ID_FIELD: &str = "ID";

/// Physical status columns recognized for soft delete, in preference order.
pub const STATUS_COLUMNS: [&str; 2] = ["Ativo", "Status"];

/// Sentinel a soft-deleted record's status column is set to.
pub const INACTIVE_SENTINEL: &str = "Inativo";

/// Schema-driven record repository.
///
/// Mutating operations take `&mut self`; exclusive access to the store is
/// enforced by the borrow checker, which serializes read-modify-write
/// cycles within a process. Cross-process isolation belongs to the backing
/// store.
pub struct RecordRepository<S: RowStore, A: ActorProvider> {
    registry: Arc<SchemaRegistry>,
    validator: Validator,
    audit: AuditLog,
    actor: A,
    store: S,
}

impl<S: RowStore, A: ActorProvider> RecordRepository<S, A> {
    /// Creates a repository over the given store and actor provider.
    pub fn new(registry: Arc<SchemaRegistry>, store: S, actor: A) -> Self {
        let validator = Validator::new(Arc::clone(&registry));
        Self {
            registry,
            validator,
            audit: AuditLog::new(),
            actor,
            store,
        }
    }

    /// Borrows the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the repository, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Lists records for an entity in store order, then applies the
    /// equality filter, optional sort, and optional page slice.
    pub fn list(&self, entity: &str, options: &ListOptions) -> RepoResult<Vec<Record>> {
        let schema = self.registry.schema(entity)?.clone();
        let mut records = self.read_records(&schema)?;

        records.retain(|record| {
            options
                .filter
                .iter()
                .all(|(field, want)| record.get(field).is_some_and(|have| loose_eq(have, want)))
        });

        if let Some(sort) = &options.sort {
            records.sort_by(|a, b| {
                let ordering = loose_cmp(a.get(&sort.field), b.get(&sort.field));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(page) = &options.page {
            // Saturating arithmetic: an absurd page/page_size clamps to an
            // empty slice instead of overflowing.
            let start = page.page.saturating_sub(1).saturating_mul(page.page_size);
            let end = start.saturating_add(page.page_size).min(records.len());
            records = if start < records.len() {
                records[start..end].to_vec()
            } else {
                Vec::new()
            };
        }

        Ok(records)
    }

    /// Finds a record by its ID field, loose equality, first match wins.
    pub fn get_by_id(&self, entity: &str, id: &Value) -> RepoResult<Option<Record>> {
        let schema = self.registry.schema(entity)?.clone();
        Ok(self.find_row(&schema, id)?.map(|(_, record)| record))
    }

    /// Validates and appends a new record.
    ///
    /// Readonly and undeclared fields are stripped from the input before
    /// validation (dropped, not errors), so the returned record holds
    /// exactly what a later read will find. Fields still absent after
    /// validation receive their schema default; a missing ID is assigned
    /// as max existing ID + 1. The store is untouched when validation
    /// fails.
    pub fn create(&mut self, entity: &str, data: Record) -> RepoResult<Record> {
        let schema = self.registry.schema(entity)?.clone();
        let mut record = strip_disallowed(&schema, data);

        let report = self.validator.validate(entity, &record)?;
        if !report.is_valid() {
            Logger::warn(
                "VALIDATION_REJECTED",
                &[("entity", entity), ("errors", &report.errors.join("; "))],
            );
            return Err(RepoError::Validation(report.errors));
        }

        for field in &schema.fields {
            if is_absent(record.get(&field.name)) {
                if let Some(default) = &field.default_value {
                    record.insert(field.name.clone(), default.clone());
                }
            }
        }

        let rows = self.read_rows(&schema)?;
        if is_absent(record.get(ID_FIELD)) && schema.field(ID_FIELD).is_some() {
            let next_id = next_sequence_id(&schema, &rows);
            record.insert(ID_FIELD.to_string(), Value::Number(next_id.into()));
        }

        let row = record_to_row(&schema, &record);
        self.store
            .append_row(&schema.table, row)
            .map_err(RepoError::from_store)?;

        let actor = self.actor.current_actor();
        let entry = AuditEntry::new(&actor, AuditAction::Create, None);
        self.audit
            .append(&mut self.store, &schema.table, &entry)
            .map_err(RepoError::from_store)?;

        Logger::info(
            "RECORD_CREATED",
            &[
                ("actor", actor.as_str()),
                ("entity", entity),
                ("id", &id_text(&record)),
            ],
        );
        Ok(record)
    }

    /// Merges `data` over the stored record and writes it back in place.
    ///
    /// The full prior record is captured and appended to the audit stream
    /// before the row is rewritten. Fields absent from `data` keep their
    /// stored value; readonly and undeclared fields in `data` are dropped.
    pub fn update(&mut self, entity: &str, id: &Value, data: Record) -> RepoResult<Record> {
        let schema = self.registry.schema(entity)?.clone();
        let (row_index, prior) = self
            .find_row(&schema, id)?
            .ok_or_else(|| not_found(entity, id))?;

        let mut merged = prior.clone();
        for (field, value) in strip_disallowed(&schema, data) {
            merged.insert(field, value);
        }

        let report = self.validator.validate(entity, &merged)?;
        if !report.is_valid() {
            Logger::warn(
                "VALIDATION_REJECTED",
                &[("entity", entity), ("errors", &report.errors.join("; "))],
            );
            return Err(RepoError::Validation(report.errors));
        }

        let actor = self.actor.current_actor();
        let entry = AuditEntry::new(&actor, AuditAction::Update, Some(prior));
        self.audit
            .append(&mut self.store, &schema.table, &entry)
            .map_err(RepoError::from_store)?;

        let row = record_to_row(&schema, &merged);
        self.store
            .set_row(&schema.table, row_index, row)
            .map_err(RepoError::from_store)?;

        Logger::info(
            "RECORD_UPDATED",
            &[
                ("actor", actor.as_str()),
                ("entity", entity),
                ("id", &value_text(id)),
            ],
        );
        Ok(merged)
    }

    /// Soft-deletes a record: flips its status column to the inactive
    /// sentinel and returns the pre-deletion snapshot.
    ///
    /// The row is never removed; every other column keeps its last value.
    /// Deleting an already-inactive record is a full no-op (no write, no
    /// second audit entry) and still returns the snapshot.
    pub fn delete(&mut self, entity: &str, id: &Value) -> RepoResult<Record> {
        let schema = self.registry.schema(entity)?.clone();
        let (row_index, prior) = self
            .find_row(&schema, id)?
            .ok_or_else(|| not_found(entity, id))?;

        let (status_field, status_col) = status_column(&schema).ok_or_else(|| {
            RepoError::Configuration(format!("entity '{}' has no status column", entity))
        })?;

        if prior
            .get(&status_field)
            .is_some_and(|v| loose_eq(v, &Value::String(INACTIVE_SENTINEL.to_string())))
        {
            return Ok(prior);
        }

        let actor = self.actor.current_actor();
        let entry = AuditEntry::new(&actor, AuditAction::Delete, Some(prior.clone()));
        self.audit
            .append(&mut self.store, &schema.table, &entry)
            .map_err(RepoError::from_store)?;

        self.store
            .set_cell(
                &schema.table,
                row_index,
                status_col,
                Value::String(INACTIVE_SENTINEL.to_string()),
            )
            .map_err(RepoError::from_store)?;

        Logger::info(
            "RECORD_DELETED",
            &[
                ("actor", actor.as_str()),
                ("entity", entity),
                ("id", &value_text(id)),
            ],
        );
        Ok(prior)
    }

    /// Reads and header-checks all rows of the entity's table.
    fn read_rows(&self, schema: &EntitySchema) -> RepoResult<Vec<Vec<Value>>> {
        let rows = self
            .store
            .get_all_rows(&schema.table)
            .map_err(RepoError::from_store)?;
        verify_headers(schema, &rows)?;
        Ok(rows)
    }

    /// Reads all data rows mapped to records in schema-field order.
    fn read_records(&self, schema: &EntitySchema) -> RepoResult<Vec<Record>> {
        let rows = self.read_rows(schema)?;
        Ok(rows[1..]
            .iter()
            .map(|row| row_to_record(schema, row))
            .collect())
    }

    /// Linear scan on the ID field; returns the absolute row index and the
    /// mapped record of the first loose match.
    fn find_row(&self, schema: &EntitySchema, id: &Value) -> RepoResult<Option<(usize, Record)>> {
        let rows = self.read_rows(schema)?;
        for (offset, row) in rows[1..].iter().enumerate() {
            let record = row_to_record(schema, row);
            if record.get(ID_FIELD).is_some_and(|have| loose_eq(have, id)) {
                return Ok(Some((offset + 1, record)));
            }
        }
        Ok(None)
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

fn not_found(entity: &str, id: &Value) -> RepoError {
    RepoError::RecordNotFound {
        entity: entity.to_string(),
        id: value_text(id),
    }
}

fn id_text(record: &Record) -> String {
    record.get(ID_FIELD).map(value_text).unwrap_or_default()
}

/// Drops client-supplied values for readonly and undeclared fields.
///
/// Only declared, writable fields survive: anything else would never reach
/// a physical column, so keeping it in the working record would let the
/// returned record disagree with what a later read finds.
fn strip_disallowed(schema: &EntitySchema, data: Record) -> Record {
    data.into_iter()
        .filter(|(field, _)| schema.field(field).map_or(false, |def| !def.readonly))
        .collect()
}

/// Checks the stored header row against the configured physical columns.
///
/// Row-to-field mapping is positional, so any drift between the configured
/// schema and the actual headers silently scrambles every read. Detect it
/// and fail instead.
fn verify_headers(schema: &EntitySchema, rows: &[Vec<Value>]) -> RepoResult<()> {
    let headers = rows.first().ok_or_else(|| {
        RepoError::Configuration(format!("table '{}' has no header row", schema.table))
    })?;
    let expected = schema.physical_columns();
    let actual: Vec<String> = headers.iter().map(value_text).collect();
    if actual != expected {
        return Err(RepoError::Configuration(format!(
            "table '{}' headers {:?} do not match configured columns {:?}",
            schema.table, actual, expected
        )));
    }
    Ok(())
}

/// Zips one data row against the schema fields, normalizing loosely typed
/// cells at the boundary. Short rows read as empty trailing cells.
fn row_to_record(schema: &EntitySchema, row: &[Value]) -> Record {
    schema
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let cell = row.get(i).cloned().unwrap_or(Value::String(String::new()));
            (field.name.clone(), normalize_cell(field.field_type, cell))
        })
        .collect()
}

/// Lays a record out as a physical row in header order; missing fields are
/// written as the empty string.
fn record_to_row(schema: &EntitySchema, record: &Record) -> Vec<Value> {
    schema
        .fields
        .iter()
        .map(|field| {
            record
                .get(&field.name)
                .cloned()
                .unwrap_or(Value::String(String::new()))
        })
        .collect()
}

/// Next ID in the 1-based sequence: max numeric ID across data rows + 1.
fn next_sequence_id(schema: &EntitySchema, rows: &[Vec<Value>]) -> i64 {
    let id_pos = schema.fields.iter().position(|f| f.name == ID_FIELD);
    let max = id_pos
        .map(|pos| {
            rows.iter()
                .skip(1)
                .filter_map(|row| row.get(pos))
                .filter_map(|cell| match cell {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse().ok(),
                    _ => None,
                })
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0);
    max + 1
}

/// Finds the soft-delete status column: the physical header `Ativo` if
/// declared, else `Status`. Returns the logical field name and the column
/// index.
fn status_column(schema: &EntitySchema) -> Option<(String, usize)> {
    let columns = schema.physical_columns();
    STATUS_COLUMNS.iter().find_map(|wanted| {
        columns.iter().position(|c| c == wanted).map(|pos| {
            let field = schema.fields[pos].name.clone();
            (field, pos)
        })
    })
}
