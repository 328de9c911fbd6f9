use std::collections::HashMap;

use customization_service::storage::models::NewCustomization;
use customization_service::storage::{Database, StoreError};

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!(
        "redb://{}",
        dir.path().join("data").join("customizations.redb").display()
    );
    let db = Database::connect(&url).unwrap();
    (dir, db)
}

fn sample_customization(product_id: i64) -> NewCustomization {
    NewCustomization {
        product_id: Some(product_id),
        product_type: Some("mug".to_string()),
        selected_color: Some("red".to_string()),
        custom_text: Some("Hi".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_create_assigns_identifier() {
    let (_dir, db) = test_db();

    let record = db.create(sample_customization(101)).unwrap();

    assert!(uuid::Uuid::parse_str(&record.id).is_ok());
    assert_eq!(record.product_id, Some(101));
    assert_eq!(record.product_type.as_deref(), Some("mug"));
    assert_eq!(record.selected_picture, None);
}

#[test]
fn test_create_and_get_by_id() {
    let (_dir, db) = test_db();
    let created = db.create(sample_customization(101)).unwrap();

    let fetched = db
        .get_by_id(&created.id)
        .unwrap()
        .expect("record should exist");
    assert_eq!(fetched, created);
}

#[test]
fn test_get_by_id_normalizes_identifier() {
    let (_dir, db) = test_db();
    let created = db.create(sample_customization(5)).unwrap();

    let fetched = db.get_by_id(&created.id.to_uppercase()).unwrap();
    assert_eq!(fetched.map(|r| r.id), Some(created.id));
}

#[test]
fn test_get_by_id_not_found() {
    let (_dir, db) = test_db();
    let id = uuid::Uuid::now_v7().to_string();
    assert!(db.get_by_id(&id).unwrap().is_none());
}

#[test]
fn test_get_by_id_invalid_identifier() {
    let (_dir, db) = test_db();
    let err = db.get_by_id("12345").unwrap_err();
    assert!(matches!(err, StoreError::InvalidIdentifier(ref id) if id == "12345"));
}

#[test]
fn test_list_all_returns_every_record() {
    let (_dir, db) = test_db();
    assert!(db.list_all().unwrap().is_empty());

    let ids: Vec<String> = (0..3)
        .map(|i| db.create(sample_customization(i)).unwrap().id)
        .collect();

    let records = db.list_all().unwrap();
    assert_eq!(records.len(), 3);
    for id in &ids {
        assert!(records.iter().any(|r| &r.id == id));
    }
}

#[test]
fn test_unique_identifiers() {
    let (_dir, db) = test_db();
    let mut ids: Vec<String> = (0..50)
        .map(|_| db.create(NewCustomization::default()).unwrap().id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_missing_fields_stay_null() {
    let (_dir, db) = test_db();
    let mut form = HashMap::new();
    form.insert("customerName".to_string(), "Sam".to_string());

    let new = NewCustomization::from_fields(&form, Some("1-logo.png".to_string())).unwrap();
    let record = db.create(new).unwrap();

    assert_eq!(record.customer_name.as_deref(), Some("Sam"));
    assert_eq!(record.selected_picture.as_deref(), Some("1-logo.png"));
    assert_eq!(record.product_id, None);
    assert_eq!(record.customer_email, None);
}

#[test]
fn test_records_survive_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("redb://{}", dir.path().join("app.redb").display());

    let id = {
        let db = Database::connect(&url).unwrap();
        db.create(sample_customization(9)).unwrap().id
    };

    let db = Database::connect(&url).unwrap();
    let record = db.get_by_id(&id).unwrap().expect("record should persist");
    assert_eq!(record.product_id, Some(9));
}

#[test]
fn test_connect_malformed_string() {
    assert!(matches!(
        Database::connect("mongodb://localhost/shop"),
        Err(StoreError::Connection(_))
    ));
}

#[test]
fn test_connect_unreachable_path() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file
    let url = format!("redb://{}", dir.path().display());
    assert!(matches!(
        Database::connect(&url),
        Err(StoreError::Connection(_))
    ));
}
