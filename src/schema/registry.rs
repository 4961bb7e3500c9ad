//! Schema registry: per-entity field definitions, entity-to-table mapping,
//! and logical-field to physical-column alias resolution.
//!
//! The registry is populated once at process start (from declarative config
//! or programmatic registration) and exposes lookups only. Share it as
//! `Arc<SchemaRegistry>` so concurrent readers never race with a writer.

use std::collections::HashMap;

use super::errors::{SchemaError, SchemaResult};
use super::types::EntitySchema;

/// Registry of entity schemas, immutable once construction finishes.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Schemas indexed by entity name
    entities: HashMap<String, EntitySchema>,
    /// Reverse index: physical table name to entity name
    tables: HashMap<String, String>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity schema.
    ///
    /// Registration happens during startup only; each entity and each
    /// physical table may be registered exactly once.
    pub fn register(&mut self, entity: impl Into<String>, schema: EntitySchema) -> SchemaResult<()> {
        let entity = entity.into();
        schema
            .validate_structure()
            .map_err(SchemaError::InvalidConfig)?;

        if self.entities.contains_key(&entity) {
            return Err(SchemaError::DuplicateEntity(entity));
        }
        if let Some(first) = self.tables.get(&schema.table) {
            return Err(SchemaError::DuplicateTable {
                table: schema.table.clone(),
                first: first.clone(),
                second: entity,
            });
        }

        self.tables.insert(schema.table.clone(), entity.clone());
        self.entities.insert(entity, schema);
        Ok(())
    }

    /// Gets the schema for an entity.
    pub fn schema(&self, entity: &str) -> SchemaResult<&EntitySchema> {
        self.entities
            .get(entity)
            .ok_or_else(|| SchemaError::SchemaNotFound(entity.to_string()))
    }

    /// Gets the physical table an entity is stored in.
    pub fn physical_table(&self, entity: &str) -> SchemaResult<&str> {
        self.schema(entity).map(|s| s.table.as_str())
    }

    /// Reverse-resolves a physical table name to its entity.
    pub fn entity_for_table(&self, table: &str) -> Option<&str> {
        self.tables.get(table).map(String::as_str)
    }

    /// Computes the ordered physical column headers for a table.
    ///
    /// The table is reverse-resolved to its entity, then every logical field
    /// is mapped through the alias map, falling back to the logical name.
    pub fn physical_columns(&self, table: &str) -> SchemaResult<Vec<String>> {
        let entity = self
            .entity_for_table(table)
            .ok_or_else(|| SchemaError::TableNotMapped(table.to_string()))?;
        Ok(self.schema(entity)?.physical_columns())
    }

    /// Returns the registered entity names.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Returns the number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::{FieldDef, FieldType};
    use super::*;

    fn student_schema() -> EntitySchema {
        EntitySchema::new(
            "Alunos",
            vec![
                FieldDef::new("ID", FieldType::Number).readonly(),
                FieldDef::new("name", FieldType::String).required(),
            ],
        )
        .alias("name", "Nome")
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = SchemaRegistry::new();
        registry.register("students", student_schema()).unwrap();

        assert!(registry.schema("students").is_ok());
        assert_eq!(registry.physical_table("students").unwrap(), "Alunos");
        assert_eq!(registry.entity_for_table("Alunos"), Some("students"));
    }

    #[test]
    fn test_unknown_entity() {
        let registry = SchemaRegistry::new();
        let err = registry.schema("ghosts").unwrap_err();
        assert!(matches!(err, SchemaError::SchemaNotFound(_)));
    }

    #[test]
    fn test_duplicate_entity_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register("students", student_schema()).unwrap();

        let other = EntitySchema::new("Outros", vec![FieldDef::new("a", FieldType::String)]);
        let err = registry.register("students", other).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateEntity(_)));
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register("students", student_schema()).unwrap();

        let clash = EntitySchema::new("Alunos", vec![FieldDef::new("a", FieldType::String)]);
        let err = registry.register("pupils", clash).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTable { .. }));
    }

    #[test]
    fn test_physical_columns_resolve_aliases() {
        let mut registry = SchemaRegistry::new();
        registry.register("students", student_schema()).unwrap();

        assert_eq!(
            registry.physical_columns("Alunos").unwrap(),
            vec!["ID", "Nome"],
        );
    }

    #[test]
    fn test_physical_columns_unmapped_table() {
        let registry = SchemaRegistry::new();
        let err = registry.physical_columns("Nada").unwrap_err();
        assert!(matches!(err, SchemaError::TableNotMapped(_)));
    }
}
