//! sheetdb - a schema-driven record-management layer for spreadsheet-like
//! tabular stores.
//!
//! Treats a header-indexed, row-oriented store as a lightweight relational
//! database: declared field contracts gate every write, logical field names
//! map onto physical column headers (which may differ via aliasing), deletes
//! are soft, and every mutation appends its prior state to an append-only
//! audit stream.

pub mod audit;
pub mod identity;
pub mod observe;
pub mod repo;
pub mod schema;
pub mod store;
pub mod validate;

pub use identity::{ActorProvider, FixedActor};
pub use repo::{ListOptions, RecordRepository, RepoError, RepoResult};
pub use schema::{load_registry, EntitySchema, FieldDef, FieldType, Record, SchemaRegistry};
pub use store::{MemoryRowStore, RowStore};
pub use validate::{ValidationReport, Validator};
