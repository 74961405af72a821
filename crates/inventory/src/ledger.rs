//! Authoritative product quantities.

use std::collections::{BTreeMap, HashMap};

use stockpath_core::{DomainError, DomainResult, ProductName};

/// Mapping from product to on-hand quantity.
///
/// Invariant: no quantity is ever negative. A removal that would go below zero
/// is rejected, never clamped. Products stay listed after dropping to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockLedger {
    quantities: HashMap<ProductName, i64>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` units and return the new total.
    pub fn receive(&mut self, product: &ProductName, qty: i64) -> DomainResult<i64> {
        if qty <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let current = self.quantities.get(product).copied().unwrap_or(0);
        let total = current
            .checked_add(qty)
            .ok_or_else(|| DomainError::invariant("stock quantity overflow"))?;
        self.quantities.insert(product.clone(), total);
        Ok(total)
    }

    /// Remove `qty` units and return what remains.
    ///
    /// All or nothing: asking for more than is on hand fails and leaves the
    /// quantity untouched.
    pub fn issue(&mut self, product: &str, qty: i64) -> DomainResult<i64> {
        if qty <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let Some(current) = self.quantities.get_mut(product) else {
            return Err(DomainError::unknown_product(product));
        };
        if *current < qty {
            return Err(DomainError::insufficient_stock(product, qty, *current));
        }
        *current -= qty;
        Ok(*current)
    }

    pub fn quantity(&self, product: &str) -> Option<i64> {
        self.quantities.get(product).copied()
    }

    /// Owned copy of every product's quantity, ordered by name.
    pub fn snapshot(&self) -> BTreeMap<ProductName, i64> {
        self.quantities
            .iter()
            .map(|(p, q)| (p.clone(), *q))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> ProductName {
        ProductName::parse("Rice").unwrap()
    }

    #[test]
    fn receive_accumulates() {
        let mut ledger = StockLedger::new();
        assert_eq!(ledger.receive(&rice(), 5).unwrap(), 5);
        assert_eq!(ledger.receive(&rice(), 7).unwrap(), 12);
        assert_eq!(ledger.quantity("Rice"), Some(12));
    }

    #[test]
    fn receive_rejects_non_positive_quantities() {
        let mut ledger = StockLedger::new();
        for qty in [0, -3] {
            assert!(matches!(
                ledger.receive(&rice(), qty),
                Err(DomainError::Validation(_))
            ));
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn issue_more_than_on_hand_is_rejected() {
        let mut ledger = StockLedger::new();
        ledger.receive(&rice(), 5).unwrap();

        let err = ledger.issue("Rice", 10).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("Rice", 10, 5));
        assert_eq!(ledger.quantity("Rice"), Some(5));
    }

    #[test]
    fn issue_unknown_product_is_rejected() {
        let mut ledger = StockLedger::new();
        assert_eq!(
            ledger.issue("Ghee", 1).unwrap_err(),
            DomainError::unknown_product("Ghee")
        );
    }

    #[test]
    fn issue_down_to_zero_keeps_the_product() {
        let mut ledger = StockLedger::new();
        ledger.receive(&rice(), 3).unwrap();
        assert_eq!(ledger.issue("Rice", 3).unwrap(), 0);
        assert_eq!(ledger.quantity("Rice"), Some(0));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut ledger = StockLedger::new();
        ledger.receive(&rice(), 3).unwrap();

        let mut snap = ledger.snapshot();
        snap.insert(rice(), 999);
        snap.clear();

        assert_eq!(ledger.quantity("Rice"), Some(3));
    }
}
