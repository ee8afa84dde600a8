//! Tests for EntityStore
//!
//! These tests verify:
//! - add → get_by_key returns the same record
//! - Duplicate keys are rejected before any write
//! - replace_by_key rewrites in place and renames keys without moving slots
//! - validate reports encode failures without touching the files

use chrono::NaiveDate;
use dealerdb::storage::EntityStore;
use dealerdb::{Car, CarStatus, DealerError, Model};
use rust_decimal::Decimal;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn car(vin: &str, model: u32) -> Car {
    Car {
        vin: vin.to_string(),
        model,
        price: Decimal::new(2000, 0),
        date_start: NaiveDate::from_ymd_opt(2024, 2, 8).unwrap(),
        status: CarStatus::Available,
    }
}

fn setup_car_store() -> (TempDir, EntityStore<Car>) {
    let temp_dir = TempDir::new().unwrap();
    let store = EntityStore::open(temp_dir.path(), "cars").unwrap();
    (temp_dir, store)
}

// =============================================================================
// Add/Get Tests
// =============================================================================

#[test]
fn test_open_creates_data_and_index_files() {
    let temp_dir = TempDir::new().unwrap();
    let _store: EntityStore<Model> = EntityStore::open(temp_dir.path(), "models").unwrap();

    assert!(temp_dir.path().join("models.txt").exists());
    assert!(temp_dir.path().join("models_index.txt").exists());
}

#[test]
fn test_add_then_get() {
    let (_temp, mut store) = setup_car_store();

    let first = car("VIN-B", 1);
    let second = car("VIN-A", 2);

    assert_eq!(store.add(&first).unwrap(), 0);
    assert_eq!(store.add(&second).unwrap(), 1);

    assert_eq!(store.get_by_key("VIN-B").unwrap(), first);
    assert_eq!(store.get_by_key("VIN-A").unwrap(), second);
    assert_eq!(store.get_at(1).unwrap(), second);
}

#[test]
fn test_get_missing_key() {
    let (_temp, store) = setup_car_store();

    match store.get_by_key("nope") {
        Err(DealerError::NotFound { entity, .. }) => assert_eq!(entity, "car"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_add_duplicate_key_writes_nothing() {
    let (_temp, mut store) = setup_car_store();

    store.add(&car("VIN-A", 1)).unwrap();
    let result = store.add(&car("VIN-A", 2));

    assert!(matches!(result, Err(DealerError::DuplicateKey { .. })));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get_by_key("VIN-A").unwrap().model, 1);
}

#[test]
fn test_add_unencodable_record_writes_nothing() {
    let (_temp, mut store) = setup_car_store();

    let result = store.add(&car("BAD VIN", 1));

    assert!(matches!(result, Err(DealerError::Encode(_))));
    assert!(store.is_empty());
    assert!(store.index().is_empty().unwrap());
}

#[test]
fn test_validate_checks_width_without_writing() {
    let (_temp, store) = setup_car_store();

    // vin + " 1 2000 2024-02-08 available" fills the line exactly
    let fits = car(&"V".repeat(472), 1);
    let too_wide = car(&"V".repeat(473), 1);

    assert!(store.validate(&fits).is_ok());
    assert!(matches!(store.validate(&too_wide), Err(DealerError::Encode(_))));
    assert!(store.is_empty());
}

// =============================================================================
// Replace Tests
// =============================================================================

#[test]
fn test_replace_same_key() {
    let (_temp, mut store) = setup_car_store();
    store.add(&car("VIN-A", 1)).unwrap();

    let mut updated = car("VIN-A", 1);
    updated.status = CarStatus::Sold;
    let slot = store.replace_by_key("VIN-A", &updated).unwrap();

    assert_eq!(slot, 0);
    assert_eq!(store.get_by_key("VIN-A").unwrap().status, CarStatus::Sold);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_replace_with_new_key_keeps_slot() {
    let (_temp, mut store) = setup_car_store();
    store.add(&car("VIN-A", 1)).unwrap();
    store.add(&car("VIN-B", 2)).unwrap();

    let slot_before = store.slot_of("VIN-A").unwrap();
    let renamed = car("VIN-Z", 1);
    store.replace_by_key("VIN-A", &renamed).unwrap();

    assert_eq!(store.slot_of("VIN-Z").unwrap(), slot_before);
    assert_eq!(store.get_by_key("VIN-Z").unwrap(), renamed);
    assert!(store.get_by_key("VIN-A").unwrap_err().is_not_found());
    assert_eq!(store.get_by_key("VIN-B").unwrap().model, 2);
}

#[test]
fn test_replace_onto_existing_key_rejected() {
    let (_temp, mut store) = setup_car_store();
    store.add(&car("VIN-A", 1)).unwrap();
    store.add(&car("VIN-B", 2)).unwrap();

    let result = store.replace_by_key("VIN-A", &car("VIN-B", 9));

    assert!(matches!(result, Err(DealerError::DuplicateKey { .. })));
    assert_eq!(store.get_by_key("VIN-A").unwrap().model, 1);
    assert_eq!(store.get_by_key("VIN-B").unwrap().model, 2);
}

#[test]
fn test_replace_missing_key() {
    let (_temp, mut store) = setup_car_store();

    let result = store.replace_by_key("VIN-A", &car("VIN-A", 1));
    assert!(result.unwrap_err().is_not_found());
}

// =============================================================================
// Scan & Persistence Tests
// =============================================================================

#[test]
fn test_scan_decodes_in_slot_order() {
    let (_temp, mut store) = setup_car_store();

    for vin in ["C", "A", "B"] {
        store.add(&car(vin, 1)).unwrap();
    }

    let vins: Vec<String> = store
        .scan()
        .unwrap()
        .into_iter()
        .map(|(_, car)| car.vin)
        .collect();
    assert_eq!(vins, vec!["C", "A", "B"]);
}

#[test]
fn test_reopen_keeps_records_and_allocation() {
    let temp_dir = TempDir::new().unwrap();

    {
        let mut store: EntityStore<Car> = EntityStore::open(temp_dir.path(), "cars").unwrap();
        store.add(&car("VIN-A", 1)).unwrap();
        store.add(&car("VIN-B", 2)).unwrap();
    }

    let mut store: EntityStore<Car> = EntityStore::open(temp_dir.path(), "cars").unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.add(&car("VIN-C", 3)).unwrap(), 2);

    assert_eq!(store.get_by_key("VIN-A").unwrap().model, 1);
    assert_eq!(store.get_by_key("VIN-C").unwrap().model, 3);
}
