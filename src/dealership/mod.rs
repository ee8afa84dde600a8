//! Dealership Module
//!
//! Business operations layered over the three entity stores.
//!
//! ## Responsibilities
//! - Own the model, car and sale stores under one data directory
//! - Inventory queries (`get_cars`, `get_car_info`)
//! - Status transitions and VIN migration (see `transitions`)
//! - Best-selling models ranking (see `ranking`)
//!
//! ## Consistency
//! Operations that touch more than one file are not atomic. A failure
//! between two writes leaves the files out of step; this is logged at
//! `warn` and the error is returned to the caller.

mod ranking;
mod transitions;

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{DealerError, Result};
use crate::record::{Car, CarFullInfo, CarStatus, Model, Sale};
use crate::storage::EntityStore;

/// The dealership record store
pub struct Dealership {
    /// Store configuration
    config: Config,

    /// Catalog, keyed by model id
    models: EntityStore<Model>,

    /// Inventory, keyed by VIN
    cars: EntityStore<Car>,

    /// Transactions, keyed by sales number
    sales: EntityStore<Sale>,
}

impl Dealership {
    // =========================================================================
    // File Name Constants
    // =========================================================================
    const MODELS: &'static str = "models";
    const CARS: &'static str = "cars";
    const SALES: &'static str = "sales";

    /// Open or create a dealership store with the given config
    ///
    /// Creates the data directory and all six files if missing. Slot
    /// counters are recovered from the existing file lengths.
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;

        let models = EntityStore::open(&config.data_dir, Self::MODELS)?;
        let cars = EntityStore::open(&config.data_dir, Self::CARS)?;
        let sales = EntityStore::open(&config.data_dir, Self::SALES)?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            models = models.len(),
            cars = cars.len(),
            sales = sales.len(),
            "dealership store opened"
        );

        Ok(Self {
            config,
            models,
            cars,
            sales,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    // =========================================================================
    // Catalog & Inventory
    // =========================================================================

    /// Add a model to the catalog
    pub fn add_model(&mut self, model: &Model) -> Result<Model> {
        let slot = self.models.add(model)?;
        tracing::info!(id = model.id, slot, "model added");
        Ok(model.clone())
    }

    /// Add a car to inventory
    ///
    /// The model reference is not checked here; it is resolved on read.
    pub fn add_car(&mut self, car: &Car) -> Result<Car> {
        let slot = self.cars.add(car)?;
        tracing::info!(vin = %car.vin, status = %car.status, slot, "car added");
        Ok(car.clone())
    }

    /// All cars in `status`, sorted by VIN
    pub fn get_cars(&self, status: CarStatus) -> Result<Vec<Car>> {
        let mut cars: Vec<Car> = self
            .cars
            .scan()?
            .into_iter()
            .map(|(_, car)| car)
            .filter(|car| car.status == status)
            .collect();

        cars.sort_by(|a, b| a.vin.cmp(&b.vin));
        Ok(cars)
    }

    /// Car joined with its model and, if sold, its sale
    pub fn get_car_info(&self, vin: &str) -> Result<CarFullInfo> {
        let car = self.cars.get_by_key(vin)?;
        let model = self.model_of(&car)?;

        let sale = if car.status == CarStatus::Sold {
            self.active_sale_for(vin)?
        } else {
            None
        };

        Ok(CarFullInfo {
            vin: car.vin,
            car_model_name: model.name,
            car_model_brand: model.brand,
            price: car.price,
            date_start: car.date_start,
            status: car.status,
            sales_date: sale.as_ref().map(|s| s.sales_date),
            sales_cost: sale.as_ref().map(|s| s.cost),
        })
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn models(&self) -> &EntityStore<Model> {
        &self.models
    }

    pub fn cars(&self) -> &EntityStore<Car> {
        &self.cars
    }

    pub fn sales(&self) -> &EntityStore<Sale> {
        &self.sales
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Resolve a car's model, treating absence as a broken reference
    fn model_of(&self, car: &Car) -> Result<Model> {
        self.models
            .get_by_key(&car.model.to_string())
            .map_err(|e| {
                let context = format!("car {} references missing model {}", car.vin, car.model);
                dangling(e, context)
            })
    }

    /// Resolve a car by VIN on behalf of another record
    fn referenced_car(&self, vin: &str, referrer: &str) -> Result<Car> {
        self.cars
            .get_by_key(vin)
            .map_err(|e| dangling(e, format!("{} references missing car {}", referrer, vin)))
    }

    /// Most recently written undeleted sale for `vin`
    fn active_sale_for(&self, vin: &str) -> Result<Option<Sale>> {
        Ok(self
            .sales
            .scan()?
            .into_iter()
            .map(|(_, sale)| sale)
            .filter(|sale| !sale.is_deleted && sale.car_vin == vin)
            .last())
    }
}

/// Turn a `NotFound` from a joined store into a `Referential` error
fn dangling(err: DealerError, context: String) -> DealerError {
    match err {
        DealerError::NotFound { .. } => DealerError::Referential(context),
        other => other,
    }
}
