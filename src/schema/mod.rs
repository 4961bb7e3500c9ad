//! Schema registry, field definitions, and declarative config loading.

pub mod config;
pub mod errors;
pub mod registry;
pub mod types;

pub use config::{load_registry, RegistryConfig};
pub use errors::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use types::{EntitySchema, FieldDef, FieldType, Record};
