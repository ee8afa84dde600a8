//! # DealerDB
//!
//! A small file-backed record store for a vehicle dealership with:
//! - Fixed-width, slot-addressed data files (direct offset seeks)
//! - One sorted key→slot index file per entity
//! - Guarded car status transitions and soft-deleted sales
//! - A best-selling models ranking over live sales
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Dealership                            │
//! │    add / sell / revert / update_vin / get / top_models       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!        ┌──────────────┼──────────────┐
//!        ▼              ▼              ▼
//!  ┌───────────┐  ┌───────────┐  ┌───────────┐
//!  │  Models   │  │   Cars    │  │   Sales   │   EntityStore<R>
//!  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘
//!        │              │              │
//!        ▼              ▼              ▼
//!   SlottedStore + SortedIndex + record codec
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod dealership;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DealerError, Result};
pub use config::Config;
pub use dealership::Dealership;
pub use record::{Car, CarFullInfo, CarStatus, Model, ModelSaleStats, Sale};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DealerDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
