//! Dealership entities
//!
//! Plain data types plus their field layouts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{parse_field, CarStatus, Record};
use crate::error::Result;

// =============================================================================
// Model
// =============================================================================

/// Catalog entry: `id name brand`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: u32,
    pub name: String,
    pub brand: String,
}

impl Model {
    pub fn new(id: u32, name: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            brand: brand.into(),
        }
    }
}

impl Record for Model {
    const ENTITY: &'static str = "model";
    const ARITY: usize = 3;

    fn key(&self) -> String {
        self.id.to_string()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.brand.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        Ok(Self {
            id: parse_field("model id", fields[0])?,
            name: fields[1].to_string(),
            brand: fields[2].to_string(),
        })
    }
}

// =============================================================================
// Car
// =============================================================================

/// Inventory entry: `vin model price date_start status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub vin: String,
    /// References `Model::id`
    pub model: u32,
    pub price: Decimal,
    pub date_start: NaiveDate,
    pub status: CarStatus,
}

impl Record for Car {
    const ENTITY: &'static str = "car";
    const ARITY: usize = 5;

    fn key(&self) -> String {
        self.vin.clone()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.vin.clone(),
            self.model.to_string(),
            self.price.to_string(),
            self.date_start.to_string(),
            self.status.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        Ok(Self {
            vin: fields[0].to_string(),
            model: parse_field("car model", fields[1])?,
            price: parse_field("car price", fields[2])?,
            date_start: parse_field("car date_start", fields[3])?,
            status: fields[4].parse()?,
        })
    }
}

// =============================================================================
// Sale
// =============================================================================

/// Transaction entry: `sales_number car_vin cost sales_date is_deleted`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub sales_number: String,
    /// References `Car::vin`
    pub car_vin: String,
    pub cost: Decimal,
    pub sales_date: NaiveDate,
    /// Set by `revert_sale`; the record itself is never removed
    #[serde(default)]
    pub is_deleted: bool,
}

impl Record for Sale {
    const ENTITY: &'static str = "sale";
    const ARITY: usize = 5;

    fn key(&self) -> String {
        self.sales_number.clone()
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.sales_number.clone(),
            self.car_vin.clone(),
            self.cost.to_string(),
            self.sales_date.to_string(),
            self.is_deleted.to_string(),
        ]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        Ok(Self {
            sales_number: fields[0].to_string(),
            car_vin: fields[1].to_string(),
            cost: parse_field("sale cost", fields[2])?,
            sales_date: parse_field("sale date", fields[3])?,
            is_deleted: parse_field("sale is_deleted", fields[4])?,
        })
    }
}

// =============================================================================
// Query Results
// =============================================================================

/// Car joined with its model and, when sold, its sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarFullInfo {
    pub vin: String,
    pub car_model_name: String,
    pub car_model_brand: String,
    pub price: Decimal,
    pub date_start: NaiveDate,
    pub status: CarStatus,
    pub sales_date: Option<NaiveDate>,
    pub sales_cost: Option<Decimal>,
}

/// One row of the best-selling models ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSaleStats {
    pub car_model_name: String,
    pub brand: String,
    /// Number of undeleted sales
    pub sales_number: u64,
    /// Sum of sale costs
    pub total_price: Decimal,
}
