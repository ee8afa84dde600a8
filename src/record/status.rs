//! Car status state machine
//!
//! ```text
//!   available ─┐
//!   reserve   ─┼──► sold ──► available
//!   delivery  ─┘
//! ```
//!
//! Status changes only go through `sell` and `revert`; any other move is
//! rejected rather than silently overwritten.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DealerError, Result};

/// Lifecycle state of a car in inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarStatus {
    Available,
    Reserve,
    Sold,
    Delivery,
}

impl CarStatus {
    /// All statuses in declaration order
    pub const ALL: [CarStatus; 4] = [
        CarStatus::Available,
        CarStatus::Reserve,
        CarStatus::Sold,
        CarStatus::Delivery,
    ];

    /// On-disk token
    pub fn as_str(&self) -> &'static str {
        match self {
            CarStatus::Available => "available",
            CarStatus::Reserve => "reserve",
            CarStatus::Sold => "sold",
            CarStatus::Delivery => "delivery",
        }
    }

    /// Whether a sale may be recorded against a car in this state
    pub fn is_sellable(&self) -> bool {
        !matches!(self, CarStatus::Sold)
    }

    /// Transition applied when a sale is recorded
    pub fn sell(self) -> Result<CarStatus> {
        if self.is_sellable() {
            Ok(CarStatus::Sold)
        } else {
            Err(DealerError::InvalidTransition(format!(
                "cannot sell a car that is {}",
                self
            )))
        }
    }

    /// Transition applied when a sale is reverted
    pub fn revert(self) -> Result<CarStatus> {
        match self {
            CarStatus::Sold => Ok(CarStatus::Available),
            other => Err(DealerError::InvalidTransition(format!(
                "cannot revert a sale for a car that is {}",
                other
            ))),
        }
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = DealerError;

    fn from_str(s: &str) -> Result<Self> {
        CarStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DealerError::Decode(format!("unknown car status: {:?}", s)))
    }
}
