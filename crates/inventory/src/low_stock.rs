//! Advisory low-stock index.
//!
//! Every stock addition pushes `(quantity after the addition, product)`. Nothing
//! is ever removed or updated in place, so the index can hold several entries
//! for one product and entries that no longer match the ledger. Queries read a
//! copy of the heap and annotate each hit with the ledger's current quantity.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use stockpath_core::ProductName;

use crate::ledger::StockLedger;

/// One low-stock hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockEntry {
    pub product: ProductName,
    /// Quantity recorded when the entry was pushed.
    pub indexed_quantity: i64,
    /// Quantity in the ledger at query time.
    pub current_quantity: i64,
}

impl LowStockEntry {
    /// The ledger has moved on since this entry was recorded.
    pub fn is_stale(&self) -> bool {
        self.indexed_quantity != self.current_quantity
    }
}

#[derive(Debug, Clone, Default)]
pub struct LowStockIndex {
    heap: BinaryHeap<Reverse<(i64, ProductName)>>,
}

impl LowStockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, product: ProductName, quantity: i64) {
        self.heap.push(Reverse((quantity, product)));
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Every entry recorded at or below `threshold`, lowest first.
    ///
    /// Drains a clone; the live index is not touched.
    pub fn check(&self, threshold: i64, ledger: &StockLedger) -> Vec<LowStockEntry> {
        let mut copy = self.heap.clone();
        let mut hits = Vec::new();

        while let Some(Reverse((quantity, product))) = copy.pop() {
            if quantity > threshold {
                break;
            }
            let current_quantity = ledger.quantity(product.as_str()).unwrap_or(0);
            hits.push(LowStockEntry {
                product,
                indexed_quantity: quantity,
                current_quantity,
            });
        }
        hits
    }
}
