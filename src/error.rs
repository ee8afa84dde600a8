//! Error types for DealerDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DealerError
pub type Result<T> = std::result::Result<T, DealerError>;

/// Unified error type for DealerDB operations
#[derive(Debug, Error)]
pub enum DealerError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Addressing Errors
    // -------------------------------------------------------------------------
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Slot {slot} out of range (store holds {count} records)")]
    OutOfRange { slot: u64, count: u64 },

    #[error("Duplicate {entity} key: {key}")]
    DuplicateKey { entity: &'static str, key: String },

    #[error("Corrupted store file: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Business Rule Errors
    // -------------------------------------------------------------------------
    #[error("Referential error: {0}")]
    Referential(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    // -------------------------------------------------------------------------
    // Arithmetic Errors
    // -------------------------------------------------------------------------
    #[error("Decimal overflow: {0}")]
    Overflow(String),
}

impl DealerError {
    pub(crate) fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        DealerError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// True for `NotFound`, regardless of entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, DealerError::NotFound { .. })
    }
}
