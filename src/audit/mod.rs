//! Append-only audit trail.
//!
//! Every entity table has a deterministically named companion stream,
//! `<table>_History`, holding one row per mutation with the full prior
//! state serialized as JSON. Entries are never updated or deleted.
//!
//! Policy: a mutation without an audit row is not allowed. The stream is
//! provisioned on first use, and a store failure while appending fails the
//! mutation that caused it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::Record;
use crate::store::{RowStore, StoreResult};

/// Suffix appended to a table name to derive its audit stream.
pub const HISTORY_SUFFIX: &str = "_History";

/// Fixed audit stream headers.
pub const HISTORY_HEADERS: [&str; 4] = ["Timestamp", "Actor", "Action", "PriorStateJSON"];

/// Kind of mutation an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// Record created; prior state is empty
    Create,
    /// Record updated in place
    Update,
    /// Record soft-deleted via its status column
    Delete,
}

impl AuditAction {
    /// Returns the action name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable audit entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// When the mutation happened
    pub timestamp: DateTime<Utc>,
    /// Opaque identity string supplied by the identity collaborator
    pub actor: String,
    /// What kind of mutation
    pub action: AuditAction,
    /// Full record state captured immediately before the mutation;
    /// `None` for CREATE
    pub prior_state: Option<Record>,
}

impl AuditEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(actor: impl Into<String>, action: AuditAction, prior_state: Option<Record>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor: actor.into(),
            action,
            prior_state,
        }
    }

    /// Serializes the entry as a history stream row.
    fn to_row(&self) -> Vec<Value> {
        let prior = match &self.prior_state {
            Some(record) => Value::Object(record.clone()).to_string(),
            None => String::new(),
        };
        vec![
            Value::String(self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Value::String(self.actor.clone()),
            Value::String(self.action.as_str().to_string()),
            Value::String(prior),
        ]
    }
}

/// Appends audit entries to per-table history streams.
#[derive(Debug, Default)]
pub struct AuditLog;

impl AuditLog {
    /// Creates an audit log.
    pub fn new() -> Self {
        Self
    }

    /// Derives the history stream name for a table.
    pub fn history_table(table: &str) -> String {
        format!("{}{}", table, HISTORY_SUFFIX)
    }

    /// Appends an entry to the history stream of `table`.
    ///
    /// Provisions the stream with its fixed headers when it does not exist
    /// yet. A store failure propagates so the caller's mutation fails with
    /// it: no mutation without an audit trail.
    pub fn append<S: RowStore>(
        &self,
        store: &mut S,
        table: &str,
        entry: &AuditEntry,
    ) -> StoreResult<()> {
        let history = Self::history_table(table);
        if !store.table_exists(&history) {
            store.create_table(
                &history,
                HISTORY_HEADERS.iter().map(|h| h.to_string()).collect(),
            )?;
        }
        store.append_row(&history, entry.to_row())
    }
}
