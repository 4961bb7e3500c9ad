//! End-to-end CRUD properties over an in-memory row store, with the
//! registry built from declarative config the way an embedding process
//! would at startup.

use std::sync::Arc;

use serde_json::{json, Value};

use sheetdb::audit::AuditLog;
use sheetdb::repo::{ListOptions, RepoError};
use sheetdb::schema::RegistryConfig;
use sheetdb::store::RowStore;
use sheetdb::{FixedActor, MemoryRowStore, Record, RecordRepository, SchemaRegistry};

const CONFIG: &str = r#"{
    "entities": {
        "students": {
            "table": "Alunos",
            "aliases": { "name": "Nome", "guardian_phone": "TelefoneResponsavel" },
            "fields": [
                { "name": "ID", "type": "number", "readonly": true },
                { "name": "name", "type": "string", "required": true },
                { "name": "cpf", "type": "national-id" },
                { "name": "guardian_phone", "type": "phone" },
                { "name": "route", "type": "string" },
                { "name": "Ativo", "type": "string", "default": "Ativo" }
            ]
        },
        "routes": {
            "table": "Rotas",
            "fields": [
                { "name": "ID", "type": "number", "readonly": true },
                { "name": "name", "type": "string", "required": true },
                { "name": "Status", "type": "string", "default": "Ativa" }
            ]
        }
    }
}"#;

fn registry() -> Arc<SchemaRegistry> {
    Arc::new(RegistryConfig::from_json(CONFIG).unwrap().build().unwrap())
}

fn empty_store(registry: &SchemaRegistry) -> MemoryRowStore {
    let mut store = MemoryRowStore::new();
    for table in ["Alunos", "Rotas"] {
        store
            .create_table(table, registry.physical_columns(table).unwrap())
            .unwrap();
    }
    store
}

fn repo() -> RecordRepository<MemoryRowStore, FixedActor> {
    let registry = registry();
    let store = empty_store(&registry);
    RecordRepository::new(registry, store, FixedActor::new("secretaria@escola.gov.br"))
}

fn record(value: Value) -> Record {
    value.as_object().unwrap().clone()
}

fn history_entries(store: &MemoryRowStore, table: &str) -> Vec<Vec<Value>> {
    let history = AuditLog::history_table(table);
    if !store.table_exists(&history) {
        return Vec::new();
    }
    store.get_all_rows(&history).unwrap()[1..].to_vec()
}

#[test]
fn create_then_get_by_id_round_trips_every_field() {
    let mut repo = repo();
    let created = repo
        .create(
            "students",
            record(json!({
                "name": "Maria Silva",
                "cpf": "529.982.247-25",
                "guardian_phone": "(61) 98877-1234",
                "route": "Rota Norte 01"
            })),
        )
        .unwrap();

    let fetched = repo
        .get_by_id("students", &created["ID"])
        .unwrap()
        .expect("created record must be retrievable");

    for field in ["name", "cpf", "guardian_phone", "route"] {
        assert_eq!(fetched[field], created[field], "field {}", field);
    }
    assert_eq!(fetched["Ativo"], json!("Ativo"));
}

#[test]
fn create_missing_required_field_fails_without_mutating_store() {
    let mut repo = repo();
    let err = repo
        .create("students", record(json!({ "route": "Rota Sul" })))
        .unwrap_err();

    match err {
        RepoError::Validation(errors) => {
            assert!(errors.iter().any(|e| e.contains("'name'")));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(repo.store().get_all_rows("Alunos").unwrap().len(), 1);
    assert!(history_entries(repo.store(), "Alunos").is_empty());
}

#[test]
fn create_appends_a_create_audit_entry() {
    let mut repo = repo();
    repo.create("students", record(json!({ "name": "Maria" })))
        .unwrap();

    let entries = history_entries(repo.store(), "Alunos");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0][1], json!("secretaria@escola.gov.br"));
    assert_eq!(entries[0][2], json!("CREATE"));
    assert_eq!(entries[0][3], json!(""));
}

#[test]
fn update_changes_only_named_field_and_audits_full_prior_state() {
    let mut repo = repo();
    let created = repo
        .create(
            "students",
            record(json!({ "name": "Maria", "route": "Rota Norte 01" })),
        )
        .unwrap();
    let id = created["ID"].clone();

    let updated = repo
        .update("students", &id, record(json!({ "route": "Rota Sul 02" })))
        .unwrap();

    assert_eq!(updated["route"], json!("Rota Sul 02"));
    assert_eq!(updated["name"], json!("Maria"));
    assert_eq!(updated["Ativo"], json!("Ativo"));

    let entries = history_entries(repo.store(), "Alunos");
    let update_entries: Vec<_> = entries
        .iter()
        .filter(|e| e[2] == json!("UPDATE"))
        .collect();
    assert_eq!(update_entries.len(), 1);

    let prior: Value = serde_json::from_str(update_entries[0][3].as_str().unwrap()).unwrap();
    assert_eq!(prior["route"], json!("Rota Norte 01"));
    assert_eq!(prior["name"], json!("Maria"));
    assert_eq!(prior["ID"], created["ID"]);
}

#[test]
fn create_ignores_readonly_and_undeclared_fields() {
    let mut repo = repo();
    let created = repo
        .create(
            "students",
            record(json!({ "ID": 99, "name": "Ana", "ghost_field": "x" })),
        )
        .unwrap();

    // The returned record holds exactly what a read finds.
    assert_eq!(created["ID"], json!(1));
    assert!(!created.contains_key("ghost_field"));
    let fetched = repo.get_by_id("students", &created["ID"]).unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn update_ignores_readonly_and_undeclared_fields() {
    let mut repo = repo();
    let created = repo
        .create("students", record(json!({ "name": "Maria" })))
        .unwrap();

    let updated = repo
        .update(
            "students",
            &created["ID"],
            record(json!({ "ID": 999, "ghost_field": "x", "name": "Maria Souza" })),
        )
        .unwrap();

    assert_eq!(updated["ID"], created["ID"]);
    assert_eq!(updated["name"], json!("Maria Souza"));
    assert!(!updated.contains_key("ghost_field"));
}

#[test]
fn update_unknown_id_is_record_not_found() {
    let mut repo = repo();
    let err = repo
        .update("students", &json!(42), Record::new())
        .unwrap_err();
    assert!(matches!(err, RepoError::RecordNotFound { .. }));
}

#[test]
fn delete_is_soft_and_preserves_every_other_field() {
    let mut repo = repo();
    let created = repo
        .create(
            "students",
            record(json!({ "name": "Maria", "route": "Rota Norte 01" })),
        )
        .unwrap();
    let id = created["ID"].clone();

    let snapshot = repo.delete("students", &id).unwrap();
    assert_eq!(snapshot["Ativo"], json!("Ativo"));

    let after = repo.get_by_id("students", &id).unwrap().unwrap();
    assert_eq!(after["Ativo"], json!("Inativo"));
    assert_eq!(after["name"], json!("Maria"));
    assert_eq!(after["route"], json!("Rota Norte 01"));

    let entries = history_entries(repo.store(), "Alunos");
    let delete_entries: Vec<_> = entries
        .iter()
        .filter(|e| e[2] == json!("DELETE"))
        .collect();
    assert_eq!(delete_entries.len(), 1);
    let prior: Value = serde_json::from_str(delete_entries[0][3].as_str().unwrap()).unwrap();
    assert_eq!(prior["Ativo"], json!("Ativo"));
}

#[test]
fn double_delete_appends_no_second_audit_entry() {
    let mut repo = repo();
    let created = repo
        .create("students", record(json!({ "name": "Maria" })))
        .unwrap();
    let id = created["ID"].clone();

    repo.delete("students", &id).unwrap();
    let before = history_entries(repo.store(), "Alunos").len();
    let snapshot = repo.delete("students", &id).unwrap();

    assert_eq!(snapshot["Ativo"], json!("Inativo"));
    assert_eq!(history_entries(repo.store(), "Alunos").len(), before);
}

#[test]
fn routes_soft_delete_uses_status_column() {
    let mut repo = repo();
    let created = repo
        .create("routes", record(json!({ "name": "Rota Norte 01" })))
        .unwrap();

    repo.delete("routes", &created["ID"]).unwrap();
    let after = repo.get_by_id("routes", &created["ID"]).unwrap().unwrap();
    assert_eq!(after["Status"], json!("Inativo"));
}

#[test]
fn pagination_returns_rows_11_to_20_of_25() {
    let mut repo = repo();
    for i in 1..=25 {
        repo.create("students", record(json!({ "name": format!("Aluno {:02}", i) })))
            .unwrap();
    }

    let page = repo
        .list("students", &ListOptions::new().page(2, 10))
        .unwrap();

    assert_eq!(page.len(), 10);
    assert_eq!(page[0]["ID"], json!(11));
    assert_eq!(page[9]["ID"], json!(20));
}

#[test]
fn pagination_past_the_end_is_empty() {
    let mut repo = repo();
    repo.create("students", record(json!({ "name": "Maria" })))
        .unwrap();

    let page = repo
        .list("students", &ListOptions::new().page(5, 10))
        .unwrap();
    assert!(page.is_empty());
}

#[test]
fn pagination_with_huge_page_values_is_empty_not_a_panic() {
    let mut repo = repo();
    repo.create("students", record(json!({ "name": "Maria" })))
        .unwrap();

    let page = repo
        .list(
            "students",
            &ListOptions::new().page(usize::MAX, usize::MAX),
        )
        .unwrap();
    assert!(page.is_empty());
}

#[test]
fn list_filters_are_anded_and_loose() {
    let mut repo = repo();
    repo.create(
        "students",
        record(json!({ "name": "Maria", "route": "Rota Norte 01" })),
    )
    .unwrap();
    repo.create(
        "students",
        record(json!({ "name": "João", "route": "Rota Norte 01" })),
    )
    .unwrap();
    repo.create(
        "students",
        record(json!({ "name": "Ana", "route": "Rota Sul 02" })),
    )
    .unwrap();

    let matches = repo
        .list(
            "students",
            &ListOptions::new()
                .filter("route", json!("Rota Norte 01"))
                .filter("ID", json!("2")),
        )
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["name"], json!("João"));
}

#[test]
fn list_sorts_descending_on_request() {
    let mut repo = repo();
    for name in ["Bruno", "Ana", "Carla"] {
        repo.create("students", record(json!({ "name": name })))
            .unwrap();
    }

    let sorted = repo
        .list("students", &ListOptions::new().sort_desc("name"))
        .unwrap();
    let names: Vec<_> = sorted.iter().map(|r| r["name"].clone()).collect();
    assert_eq!(names, vec![json!("Carla"), json!("Bruno"), json!("Ana")]);
}

#[test]
fn unknown_entity_fails_every_operation() {
    let mut repo = repo();
    assert!(repo.list("ghosts", &ListOptions::new()).is_err());
    assert!(repo.get_by_id("ghosts", &json!(1)).is_err());
    assert!(repo.create("ghosts", Record::new()).is_err());
    assert!(repo.update("ghosts", &json!(1), Record::new()).is_err());
    assert!(repo.delete("ghosts", &json!(1)).is_err());
}
