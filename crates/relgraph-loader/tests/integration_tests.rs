//! Integration tests for schema loading

use relgraph_core::{ColumnAliases, DiagnosticCode};
use relgraph_loader::{CsvSource, JsonSource, LoadError, SchemaSource};
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn spreadsheet_export_with_unnamed_description_column() {
    let dir = tempfile::tempdir().unwrap();

    // The entities sheet lost its Description header on export
    let entities = write(
        dir.path(),
        "entities.csv",
        "Object,Label,API Name,Unnamed: 7\n\
         Account,Account,Account,Business customer\n\
         Policy,Policy,InsurancePolicy,\n",
    );
    let attributes = write(
        dir.path(),
        "attributes.csv",
        "Object,Field Name,Data Type,Relationship/RefersTo,Notes\n\
         Policy,NameInsuredId,Lookup,\"Account, Contact\",primary insured\n\
         Policy,Name,Text,,\n",
    );

    let tables = CsvSource::new(&entities, &attributes)
        .load(&ColumnAliases::default())
        .unwrap();

    assert_eq!(tables.description_of("Account"), "Business customer");
    assert_eq!(tables.description_of("Policy"), "");
    assert_eq!(
        tables.attributes[0].relationship_targets,
        vec!["Account".to_string(), "Contact".to_string()]
    );

    let missing: Vec<_> = tables
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::DataMissingValue)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].entity.as_deref(), Some("Policy"));
}

#[test]
fn custom_aliases_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let entities = write(dir.path(), "entities.csv", "Entity,Summary\nAccount,Top\n");
    let attributes = write(
        dir.path(),
        "attributes.csv",
        "Entity,Field,Type,Refers To\nContact,AccountId,Lookup,Account\n",
    );

    let aliases = ColumnAliases {
        object: vec!["Entity".to_string()],
        description: vec!["Summary".to_string()],
        field_name: vec!["Field".to_string()],
        data_type: vec!["Type".to_string()],
        relationship: vec!["Refers To".to_string()],
    };

    let tables = CsvSource::new(&entities, &attributes).load(&aliases).unwrap();
    assert_eq!(tables.description_of("Account"), "Top");
    assert_eq!(tables.attributes[0].owner_entity, "Contact");
    assert!(tables.attributes[0].is_relationship());
}

#[test]
fn missing_relationship_column_aborts_load() {
    let dir = tempfile::tempdir().unwrap();
    let entities = write(dir.path(), "entities.csv", "Object,Description\nAccount,Top\n");
    let attributes = write(dir.path(), "attributes.csv", "Object,Field Name,Data Type\nAccount,Name,Text\n");

    let err = CsvSource::new(&entities, &attributes)
        .load(&ColumnAliases::default())
        .unwrap_err();

    assert!(err.is_configuration_error());
    let message = err.to_string();
    assert!(message.contains("Relationship/RefersTo"));
    assert!(message.contains("Attributes"));
}

#[test]
fn csv_and_json_sources_agree() {
    let dir = tempfile::tempdir().unwrap();
    let entities = write(dir.path(), "entities.csv", "Object,Description\nAccount,Top\nContact,Person\n");
    let attributes = write(
        dir.path(),
        "attributes.csv",
        "Object,Field Name,Data Type,Relationship/RefersTo\n\
         Account,PrimaryContact,Lookup,Contact\n\
         Contact,AccountId,Lookup,Account\n",
    );
    let json = write(
        dir.path(),
        "schema.json",
        r#"{
            "entities": [
                {"Object": "Account", "Description": "Top"},
                {"Object": "Contact", "Description": "Person"}
            ],
            "attributes": [
                {"Object": "Account", "Field Name": "PrimaryContact", "Data Type": "Lookup", "Relationship/RefersTo": "Contact"},
                {"Object": "Contact", "Field Name": "AccountId", "Data Type": "Lookup", "Relationship/RefersTo": "Account"}
            ]
        }"#,
    );

    let from_csv = CsvSource::new(&entities, &attributes)
        .load(&ColumnAliases::default())
        .unwrap();
    let from_json = JsonSource::from_file(&json).load(&ColumnAliases::default()).unwrap();

    assert_eq!(from_csv, from_json);
}

#[test]
fn unreadable_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonSource::from_file(dir.path().join("missing.json"))
        .read_raw()
        .unwrap_err();
    assert!(matches!(err, LoadError::IoError(_, _)));
}
