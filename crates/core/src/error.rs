//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a rejected operation: the state it targeted is left
/// exactly as it was before the call. None of these are fatal to the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (empty name, non-positive quantity, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A removal asked for more units than the ledger holds.
    #[error("not enough stock of '{product}' (requested {requested}, available {available})")]
    InsufficientStock {
        product: String,
        requested: i64,
        available: i64,
    },

    /// The referenced product has never been stocked.
    #[error("product '{0}' not found")]
    UnknownProduct(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn unknown_product(name: impl Into<String>) -> Self {
        Self::UnknownProduct(name.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, requested: i64, available: i64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            requested,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_both_quantities() {
        let err = DomainError::insufficient_stock("Rice", 10, 5);
        assert_eq!(
            err.to_string(),
            "not enough stock of 'Rice' (requested 10, available 5)"
        );
    }

    #[test]
    fn validation_message_is_prefixed() {
        let err = DomainError::validation("quantity must be positive");
        assert_eq!(err.to_string(), "validation failed: quantity must be positive");
    }
}
