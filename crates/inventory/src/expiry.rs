//! Expiry tracking for dated stock batches.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpath_core::ProductName;

/// One dated stock addition.
///
/// Batches are independent of the ledger: removing stock does not shrink any
/// batch, so a batch quantity can exceed what is currently on hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub product: ProductName,
    pub quantity: i64,
    pub expires_at: DateTime<Utc>,
}

impl Batch {
    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at <= at
    }
}

impl Ord for Batch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expires_at
            .cmp(&other.expires_at)
            .then_with(|| self.product.cmp(&other.product))
            .then_with(|| self.quantity.cmp(&other.quantity))
    }
}

impl PartialOrd for Batch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of batches by expiry.
///
/// Popped batches leave the heap but their units stay on record per product,
/// so dated stock is never mistaken for undated stock after an expiry check.
#[derive(Debug, Clone, Default)]
pub struct ExpiryTracker {
    heap: BinaryHeap<Reverse<Batch>>,
    retired: HashMap<ProductName, i64>,
}

impl ExpiryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: Batch) {
        self.heap.push(Reverse(batch));
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove and return every batch expiring at or before `reference`,
    /// soonest first.
    ///
    /// Destructive: returned batches are gone for good.
    pub fn pop_expired(&mut self, reference: DateTime<Utc>) -> Vec<Batch> {
        let mut expired = Vec::new();
        while let Some(Reverse(head)) = self.heap.peek() {
            if !head.is_expired_at(reference) {
                break;
            }
            if let Some(Reverse(batch)) = self.heap.pop() {
                let units = self.retired.entry(batch.product.clone()).or_default();
                *units = units.saturating_add(batch.quantity);
                expired.push(batch);
            }
        }
        expired
    }

    /// All tracked batches in expiry order, read from a clone.
    pub fn snapshot(&self) -> Vec<Batch> {
        let mut copy = self.heap.clone();
        let mut ordered = Vec::with_capacity(copy.len());
        while let Some(Reverse(batch)) = copy.pop() {
            ordered.push(batch);
        }
        ordered
    }

    /// Units ever added with an expiry date, per product: live batches plus
    /// batches already popped as expired.
    pub fn dated_units(&self) -> HashMap<&ProductName, i64> {
        let mut units: HashMap<&ProductName, i64> = HashMap::new();
        let live = self.heap.iter().map(|Reverse(b)| (&b.product, b.quantity));
        for (product, qty) in live.chain(self.retired.iter().map(|(p, q)| (p, *q))) {
            let total = units.entry(product).or_default();
            *total = total.saturating_add(qty);
        }
        units
    }
}
