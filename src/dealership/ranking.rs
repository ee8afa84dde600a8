//! Best-selling models ranking

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::Dealership;
use crate::error::{DealerError, Result};
use crate::record::ModelSaleStats;

impl Dealership {
    /// Top models by sales, limited by `Config::top_models_limit`
    pub fn top_models_by_sales(&self) -> Result<Vec<ModelSaleStats>> {
        self.top_models(self.config.top_models_limit)
    }

    /// Top `n` models by number of undeleted sales, then by revenue
    ///
    /// Groups by `(model name, brand)`. Ties on both count and revenue keep
    /// the order in which each group's first sale appears in the sales file.
    /// A sale whose car or model is missing fails the whole query, as does a
    /// revenue sum outside the decimal range.
    pub fn top_models(&self, n: usize) -> Result<Vec<ModelSaleStats>> {
        let mut groups: Vec<ModelSaleStats> = Vec::new();
        let mut positions: HashMap<(String, String), usize> = HashMap::new();

        for (_, sale) in self.sales.scan()? {
            if sale.is_deleted {
                continue;
            }

            let car = self.referenced_car(&sale.car_vin, &format!("sale {}", sale.sales_number))?;
            let model = self.model_of(&car)?;

            let pos = *positions
                .entry((model.name.clone(), model.brand.clone()))
                .or_insert_with(|| {
                    groups.push(ModelSaleStats {
                        car_model_name: model.name,
                        brand: model.brand,
                        sales_number: 0,
                        total_price: Decimal::ZERO,
                    });
                    groups.len() - 1
                });

            let group = &mut groups[pos];
            group.sales_number += 1;
            group.total_price = group.total_price.checked_add(sale.cost).ok_or_else(|| {
                DealerError::Overflow(format!(
                    "revenue for {} {} exceeds the decimal range at sale {}",
                    group.brand, group.car_model_name, sale.sales_number
                ))
            })?;
        }

        // sort_by is stable, preserving first-seen order on full ties
        groups.sort_by(|a, b| {
            b.sales_number
                .cmp(&a.sales_number)
                .then_with(|| b.total_price.cmp(&a.total_price))
        });
        groups.truncate(n);

        tracing::debug!(groups = groups.len(), n, "computed model sales ranking");
        Ok(groups)
    }
}
