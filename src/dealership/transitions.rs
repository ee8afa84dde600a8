//! Status transitions and key migration
//!
//! Each operation validates everything it can before the first write, then
//! applies its writes in a fixed order. Later writes can still fail on I/O.

use super::Dealership;
use crate::error::{DealerError, Result};
use crate::record::{Car, Record, Sale};

impl Dealership {
    /// Record a sale and mark its car as sold
    ///
    /// Steps:
    /// 1. Resolve the car, check it may be sold and that the sold line encodes
    /// 2. Append the sale (fails on a duplicate sales number)
    /// 3. Rewrite the car with status `sold`
    pub fn sell_car(&mut self, sale: &Sale) -> Result<Car> {
        if sale.is_deleted {
            return Err(DealerError::InvalidTransition(format!(
                "sale {} is already marked deleted",
                sale.sales_number
            )));
        }

        let mut car = self.referenced_car(&sale.car_vin, &format!("sale {}", sale.sales_number))?;
        car.status = car.status.sell()?;
        self.cars.validate(&car)?;

        let slot = self.sales.add(sale)?;

        if let Err(e) = self.cars.replace_by_key(&sale.car_vin, &car) {
            tracing::warn!(
                sales_number = %sale.sales_number,
                vin = %sale.car_vin,
                "sale recorded but car status not updated: {}",
                e
            );
            return Err(e);
        }

        tracing::info!(
            sales_number = %sale.sales_number,
            vin = %car.vin,
            slot,
            "car sold"
        );
        Ok(car)
    }

    /// Soft-delete a sale and return its car to `available`
    ///
    /// Steps:
    /// 1. Resolve the sale (must not already be deleted) and its car
    /// 2. Check the car is `sold`
    /// 3. Check both rewritten lines encode
    /// 4. Rewrite the sale with `is_deleted = true`
    /// 5. Rewrite the car with status `available`
    pub fn revert_sale(&mut self, sales_number: &str) -> Result<Car> {
        let mut sale = self.sales.get_by_key(sales_number)?;
        if sale.is_deleted {
            return Err(DealerError::InvalidTransition(format!(
                "sale {} is already reverted",
                sales_number
            )));
        }

        let mut car = self.referenced_car(&sale.car_vin, &format!("sale {}", sales_number))?;
        car.status = car.status.revert()?;
        sale.is_deleted = true;

        // `available` is wider than `sold`
        self.cars.validate(&car)?;
        self.sales.validate(&sale)?;

        self.sales.replace_by_key(sales_number, &sale)?;

        if let Err(e) = self.cars.replace_by_key(&sale.car_vin, &car) {
            tracing::warn!(
                sales_number,
                vin = %sale.car_vin,
                "sale reverted but car status not restored: {}",
                e
            );
            return Err(e);
        }

        tracing::info!(sales_number, vin = %car.vin, "sale reverted");
        Ok(car)
    }

    /// Change a car's VIN, keeping its slot and every sale that references it
    ///
    /// Steps:
    /// 1. Check the new VIN is free and that the car and every referencing
    ///    sale still encode with it
    /// 2. Rewrite the car at its slot and rename its index entry
    /// 3. Rewrite `car_vin` on each sale referencing the old VIN
    pub fn update_vin(&mut self, vin: &str, new_vin: &str) -> Result<Car> {
        let mut car = self.cars.get_by_key(vin)?;
        if vin == new_vin {
            return Ok(car);
        }

        if self.cars.index().contains(new_vin)? {
            return Err(DealerError::DuplicateKey {
                entity: Car::ENTITY,
                key: new_vin.to_string(),
            });
        }

        car.vin = new_vin.to_string();
        self.cars.validate(&car)?;

        let mut referencing = Vec::new();
        for (_, mut sale) in self.sales.scan()? {
            if sale.car_vin != vin {
                continue;
            }
            sale.car_vin = new_vin.to_string();
            self.sales.validate(&sale)?;
            referencing.push(sale);
        }

        let slot = self.cars.replace_by_key(vin, &car)?;

        for sale in &referencing {
            if let Err(e) = self.sales.replace_by_key(&sale.sales_number, sale) {
                tracing::warn!(
                    old_vin = vin,
                    new_vin,
                    sales_number = %sale.sales_number,
                    "car renamed but sale still references old VIN: {}",
                    e
                );
                return Err(e);
            }
            tracing::debug!(sales_number = %sale.sales_number, new_vin, "sale VIN migrated");
        }

        tracing::info!(
            old_vin = vin,
            new_vin,
            slot,
            sales = referencing.len(),
            "VIN updated"
        );
        Ok(car)
    }
}
