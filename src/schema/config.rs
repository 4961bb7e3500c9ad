//! Declarative registry config loaded once at process start.
//!
//! One JSON document declares every entity: its physical table, sparse
//! alias map, and ordered field list. Malformed config fails startup.
//!
//! ```json
//! {
//!   "entities": {
//!     "students": {
//!       "table": "Alunos",
//!       "aliases": { "name": "Nome" },
//!       "fields": [
//!         { "name": "ID", "type": "number", "readonly": true },
//!         { "name": "name", "type": "string", "required": true }
//!       ]
//!     }
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult};
use super::registry::SchemaRegistry;
use super::types::EntitySchema;

/// Top-level registry config document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Entity name to schema declaration
    pub entities: serde_json::Map<String, serde_json::Value>,
}

impl RegistryConfig {
    /// Parses a config document from a JSON string.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        serde_json::from_str(json).map_err(|e| SchemaError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a config document from a file.
    pub fn from_file(path: &Path) -> SchemaResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::InvalidConfig(format!("failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Builds an immutable registry from this config.
    ///
    /// Entity declaration order in the document is preserved, so config
    /// mistakes are reported against the first offending entity.
    pub fn build(self) -> SchemaResult<SchemaRegistry> {
        let mut registry = SchemaRegistry::new();
        for (entity, decl) in self.entities {
            let schema: EntitySchema = serde_json::from_value(decl).map_err(|e| {
                SchemaError::InvalidConfig(format!("entity '{}': {}", entity, e))
            })?;
            registry.register(entity, schema)?;
        }
        Ok(registry)
    }
}

/// Loads a registry from a JSON config file.
pub fn load_registry(path: &Path) -> SchemaResult<SchemaRegistry> {
    RegistryConfig::from_file(path)?.build()
}
