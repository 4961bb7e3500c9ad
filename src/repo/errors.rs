//! Repository error taxonomy.

use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::StoreError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by repository operations.
///
/// Validation and not-found errors are recoverable and the caller decides
/// what to do with them; everything else indicates misconfiguration or a
/// failing store and is fatal to the calling operation.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Unknown entity or malformed registry config
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Candidate record violated its schema; carries every field error in
    /// schema-declaration order
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// No row matched the given ID
    #[error("record '{id}' not found in entity '{entity}'")]
    RecordNotFound { entity: String, id: String },

    /// Physical table absent from the store
    #[error("table '{0}' not found")]
    StoreNotFound(String),

    /// Table exists but disagrees with its configuration (header mismatch,
    /// missing status column)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Underlying store I/O failure, propagated without retry
    #[error(transparent)]
    Store(StoreError),
}

impl RepoError {
    /// Maps a store error into the repository taxonomy.
    pub(crate) fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::TableNotFound(table) => RepoError::StoreNotFound(table),
            other => RepoError::Store(other),
        }
    }
}
