//! Tests for the best-selling models ranking
//!
//! These tests verify:
//! - Ordering by count, then revenue
//! - Soft-deleted sales are excluded
//! - Grouping by (name, brand) and the result limit
//! - Broken references and revenue overflow fail the query

use chrono::NaiveDate;
use dealerdb::storage::EntityStore;
use dealerdb::{Car, CarStatus, Config, DealerError, Dealership, Model, ModelSaleStats, Sale};
use rust_decimal::Decimal;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_dealership(limit: usize) -> (TempDir, Dealership) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .top_models_limit(limit)
        .build();
    let dealership = Dealership::open(config).unwrap();
    (temp_dir, dealership)
}

/// Add a car of `model` and sell it for `cost`
fn sell_one(dealership: &mut Dealership, n: usize, model: u32, cost: i64) -> String {
    sell_one_at(dealership, n, model, Decimal::new(cost, 0))
}

fn sell_one_at(dealership: &mut Dealership, n: usize, model: u32, cost: Decimal) -> String {
    let vin = format!("VIN{:04}M{}", n, model);
    dealership
        .add_car(&Car {
            vin: vin.clone(),
            model,
            price: Decimal::new(1, 0),
            date_start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: CarStatus::Available,
        })
        .unwrap();

    let sales_number = format!("S{:04}", n);
    dealership
        .sell_car(&Sale {
            sales_number: sales_number.clone(),
            car_vin: vin,
            cost,
            sales_date: NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(),
            is_deleted: false,
        })
        .unwrap();

    sales_number
}

fn names(stats: &[ModelSaleStats]) -> Vec<&str> {
    stats.iter().map(|s| s.car_model_name.as_str()).collect()
}

/// Models A, B, C with A×3@100, B×3@50, C×1@900 (sold interleaved)
fn seed_abc(dealership: &mut Dealership) {
    dealership.add_model(&Model::new(1, "A", "Acme")).unwrap();
    dealership.add_model(&Model::new(2, "B", "Acme")).unwrap();
    dealership.add_model(&Model::new(3, "C", "Acme")).unwrap();

    let plan = [(3, 900), (2, 50), (1, 100), (2, 50), (1, 100), (2, 50), (1, 100)];
    for (n, (model, cost)) in plan.into_iter().enumerate() {
        sell_one(dealership, n, model, cost);
    }
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[test]
fn test_rank_by_count_then_revenue() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    seed_abc(&mut dealership);

    let top = dealership.top_models_by_sales().unwrap();

    assert_eq!(names(&top), vec!["A", "B", "C"]);
    assert_eq!(top[0].sales_number, 3);
    assert_eq!(top[0].total_price, Decimal::new(300, 0));
    assert_eq!(top[1].sales_number, 3);
    assert_eq!(top[1].total_price, Decimal::new(150, 0));
    assert_eq!(top[2].sales_number, 1);
    assert_eq!(top[2].total_price, Decimal::new(900, 0));
}

#[test]
fn test_full_tie_keeps_first_seen_order() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "Late", "Acme")).unwrap();
    dealership.add_model(&Model::new(2, "Early", "Acme")).unwrap();

    sell_one(&mut dealership, 0, 2, 500);
    sell_one(&mut dealership, 1, 1, 500);

    let top = dealership.top_models_by_sales().unwrap();
    assert_eq!(names(&top), vec!["Early", "Late"]);
}

#[test]
fn test_repeated_query_is_identical() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    seed_abc(&mut dealership);

    let first = dealership.top_models_by_sales().unwrap();
    let second = dealership.top_models_by_sales().unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Filtering & Grouping Tests
// =============================================================================

#[test]
fn test_reverted_sales_excluded() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "A", "Acme")).unwrap();
    dealership.add_model(&Model::new(2, "B", "Acme")).unwrap();

    let a1 = sell_one(&mut dealership, 0, 1, 100);
    let a2 = sell_one(&mut dealership, 1, 1, 100);
    sell_one(&mut dealership, 2, 2, 10);

    dealership.revert_sale(&a1).unwrap();
    dealership.revert_sale(&a2).unwrap();

    let top = dealership.top_models_by_sales().unwrap();
    assert_eq!(names(&top), vec!["B"]);
}

#[test]
fn test_groups_by_name_and_brand() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "Three", "Mazda")).unwrap();
    dealership.add_model(&Model::new(2, "Three", "Mazda")).unwrap();
    dealership.add_model(&Model::new(3, "Three", "Other")).unwrap();

    sell_one(&mut dealership, 0, 1, 10);
    sell_one(&mut dealership, 1, 2, 10);
    sell_one(&mut dealership, 2, 3, 10);

    let top = dealership.top_models_by_sales().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].brand, "Mazda");
    assert_eq!(top[0].sales_number, 2);
    assert_eq!(top[1].brand, "Other");
}

#[test]
fn test_limit_applies() {
    let (_temp, mut dealership) = setup_temp_dealership(2);
    seed_abc(&mut dealership);

    assert_eq!(names(&dealership.top_models_by_sales().unwrap()), vec!["A", "B"]);
    assert_eq!(names(&dealership.top_models(1).unwrap()), vec!["A"]);
    assert_eq!(dealership.top_models(10).unwrap().len(), 3);
}

#[test]
fn test_no_sales() {
    let (_temp, dealership) = setup_temp_dealership(3);
    assert!(dealership.top_models_by_sales().unwrap().is_empty());
}

// =============================================================================
// Referential Failure Tests
// =============================================================================

#[test]
fn test_missing_model_fails_query() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "A", "Acme")).unwrap();

    sell_one(&mut dealership, 0, 1, 100);
    sell_one(&mut dealership, 1, 42, 100);

    let result = dealership.top_models_by_sales();
    assert!(matches!(result, Err(DealerError::Referential(_))));
}

#[test]
fn test_missing_car_fails_query() {
    let (temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "A", "Acme")).unwrap();
    sell_one(&mut dealership, 0, 1, 100);
    drop(dealership);

    // a sale line whose car was never stored
    let mut sales: EntityStore<Sale> = EntityStore::open(temp.path(), "sales").unwrap();
    sales
        .add(&Sale {
            sales_number: "S9999".to_string(),
            car_vin: "GHOST".to_string(),
            cost: Decimal::new(100, 0),
            sales_date: NaiveDate::from_ymd_opt(2024, 9, 3).unwrap(),
            is_deleted: false,
        })
        .unwrap();
    drop(sales);

    let dealership = Dealership::open_path(temp.path()).unwrap();
    match dealership.top_models_by_sales() {
        Err(DealerError::Referential(msg)) => assert!(msg.contains("GHOST")),
        other => panic!("Expected Referential, got {:?}", other),
    }
}

// =============================================================================
// Revenue Overflow Tests
// =============================================================================

#[test]
fn test_revenue_overflow_is_an_error() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "A", "Acme")).unwrap();

    sell_one_at(&mut dealership, 0, 1, Decimal::MAX);
    sell_one_at(&mut dealership, 1, 1, Decimal::MAX);

    let result = dealership.top_models_by_sales();
    assert!(matches!(result, Err(DealerError::Overflow(_))));
}

#[test]
fn test_revenue_overflow_in_deleted_sale_ignored() {
    let (_temp, mut dealership) = setup_temp_dealership(3);
    dealership.add_model(&Model::new(1, "A", "Acme")).unwrap();

    sell_one_at(&mut dealership, 0, 1, Decimal::MAX);
    let reverted = sell_one_at(&mut dealership, 1, 1, Decimal::MAX);
    dealership.revert_sale(&reverted).unwrap();

    let top = dealership.top_models_by_sales().unwrap();
    assert_eq!(top[0].sales_number, 1);
    assert_eq!(top[0].total_price, Decimal::MAX);
}
