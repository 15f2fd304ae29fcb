//! Error types for domain construction

use thiserror::Error;

/// Invalid-argument failures raised while building domain values
///
/// Every constructor in this crate validates at the boundary; nothing is
/// clamped or silently corrected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Item name was empty or whitespace
    #[error("Item name must not be empty")]
    EmptyName,

    /// Item category was empty or whitespace
    #[error("Item category must not be empty")]
    EmptyCategory,

    /// Item price was zero, negative or not finite
    #[error("Item price must be greater than 0, got {0}")]
    InvalidPrice(f64),

    /// Transaction had no items
    #[error("Transaction must contain at least one item")]
    EmptyTransaction,

    /// Transaction identifier could not be parsed
    #[error("Invalid transaction id: {0}")]
    InvalidTransactionId(String),

    /// Rule arguments violate the rule invariants
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}
