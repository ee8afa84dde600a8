//! Configuration for DealerDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a DealerDB instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data and index files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── models.txt   models_index.txt
    ///     ├── cars.txt     cars_index.txt
    ///     └── sales.txt    sales_index.txt
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Reporting Configuration
    // -------------------------------------------------------------------------
    /// Number of groups returned by `top_models_by_sales`
    pub top_models_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./dealerdb_data"),
            top_models_limit: 3,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set how many models the sales ranking returns
    pub fn top_models_limit(mut self, limit: usize) -> Self {
        self.config.top_models_limit = limit;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
