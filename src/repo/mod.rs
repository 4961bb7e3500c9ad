//! Record repository: entity-scoped CRUD with soft delete and auditing.

pub mod errors;
pub mod options;
pub mod repository;

pub use errors::{RepoError, RepoResult};
pub use options::{ListOptions, PageSpec, SortDirection, SortSpec};
pub use repository::{RecordRepository, ID_FIELD, INACTIVE_SENTINEL, STATUS_COLUMNS};
