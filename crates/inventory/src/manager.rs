//! Aggregate root owning all inventory state and the route graph.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use stockpath_core::{Clock, DomainError, DomainResult, ProductName, SystemClock};
use stockpath_routing::{RouteError, RouteGraph, RouteOutcome};

use crate::demand::{DemandSpike, DemandWindow};
use crate::expiry::{Batch, ExpiryTracker};
use crate::export::{self, ExportError, ExportRow};
use crate::ledger::StockLedger;
use crate::low_stock::{LowStockEntry, LowStockIndex};

/// Outcome of a successful stock addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReceipt {
    pub product: ProductName,
    pub added: i64,
    pub total: i64,
    pub batch: Option<Batch>,
    pub received_at: DateTime<Utc>,
}

/// Outcome of a successful stock removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIssue {
    pub product: ProductName,
    pub removed: i64,
    pub remaining: i64,
    pub issued_at: DateTime<Utc>,
}

/// Single-operator inventory state.
///
/// Additions update the ledger, push a batch when an expiry is given, and
/// record the new total in the low-stock index. Removals update the ledger and
/// log the sold units for spike detection. Reports never change ledger
/// quantities; `check_expiry` and `detect_demand_spike` do consume tracker and
/// sale-log entries.
#[derive(Debug)]
pub struct InventoryManager<C = SystemClock> {
    clock: C,
    ledger: StockLedger,
    low_stock: LowStockIndex,
    expiry: ExpiryTracker,
    demand: DemandWindow,
    graph: RouteGraph,
}

impl InventoryManager<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InventoryManager<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InventoryManager<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            ledger: StockLedger::new(),
            low_stock: LowStockIndex::new(),
            expiry: ExpiryTracker::new(),
            demand: DemandWindow::new(),
            graph: RouteGraph::new(),
        }
    }

    /// Replace the route graph (typically one built from a network seed).
    pub fn with_graph(mut self, graph: RouteGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn add_stock(
        &mut self,
        product: &str,
        qty: i64,
        expiry: Option<DateTime<Utc>>,
    ) -> DomainResult<StockReceipt> {
        let product =
            ProductName::parse(product).inspect_err(|e| warn!(error = %e, "add rejected"))?;
        let total = self
            .ledger
            .receive(&product, qty)
            .inspect_err(|e| warn!(product = %product, error = %e, "add rejected"))?;
        let received_at = self.clock.now();

        let batch = expiry.map(|expires_at| Batch {
            product: product.clone(),
            quantity: qty,
            expires_at,
        });
        if let Some(batch) = &batch {
            self.expiry.push(batch.clone());
        }
        self.low_stock.push(product.clone(), total);

        info!(product = %product, added = qty, total, expires_at = ?expiry, "stock added");
        Ok(StockReceipt {
            product,
            added: qty,
            total,
            batch,
            received_at,
        })
    }

    pub fn remove_stock(&mut self, product: &str, qty: i64) -> DomainResult<StockIssue> {
        let product =
            ProductName::parse(product).inspect_err(|e| warn!(error = %e, "remove rejected"))?;
        let remaining = self
            .ledger
            .issue(product.as_str(), qty)
            .inspect_err(|e| warn!(product = %product, error = %e, "remove rejected"))?;
        let issued_at = self.clock.now();

        // issue() only succeeds for qty > 0
        self.demand.record(product.clone(), qty.unsigned_abs(), issued_at);

        info!(product = %product, removed = qty, remaining, "stock removed");
        Ok(StockIssue {
            product,
            removed: qty,
            remaining,
            issued_at,
        })
    }

    /// Detached copy of every product's quantity.
    pub fn stock(&self) -> BTreeMap<ProductName, i64> {
        self.ledger.snapshot()
    }

    pub fn quantity(&self, product: &str) -> Option<i64> {
        self.ledger.quantity(product)
    }

    /// Low-stock index hits at or below `threshold`.
    ///
    /// The index is advisory: each hit carries the quantity recorded at push
    /// time and the ledger's current quantity, which may differ.
    pub fn check_low_stock(&self, threshold: i64) -> Vec<LowStockEntry> {
        let hits = self.low_stock.check(threshold, &self.ledger);
        info!(threshold, hits = hits.len(), "low stock checked");
        hits
    }

    /// Products with at least `threshold` units sold in the last
    /// `window_secs` seconds. Sales older than the window are dropped for good.
    pub fn detect_demand_spike(
        &mut self,
        window_secs: i64,
        threshold: u64,
    ) -> DomainResult<Vec<DemandSpike>> {
        if window_secs < 0 {
            return Err(DomainError::validation("window must not be negative"));
        }
        if threshold == 0 {
            return Err(DomainError::validation("spike threshold must be positive"));
        }
        let now = self.clock.now();
        let spikes = self
            .demand
            .detect_spikes(now, Duration::seconds(window_secs), threshold);

        info!(window_secs, threshold, spikes = spikes.len(), "demand checked");
        Ok(spikes)
    }

    /// Pop every batch expiring at or before `reference`.
    pub fn check_expiry(&mut self, reference: DateTime<Utc>) -> Vec<Batch> {
        let expired = self.expiry.pop_expired(reference);
        for batch in &expired {
            info!(
                product = %batch.product,
                quantity = batch.quantity,
                expires_at = %batch.expires_at,
                "batch expired"
            );
        }
        expired
    }

    pub fn check_expiry_now(&mut self) -> Vec<Batch> {
        let now = self.clock.now();
        self.check_expiry(now)
    }

    /// Tracked batches in expiry order, without consuming them.
    pub fn batches(&self) -> Vec<Batch> {
        self.expiry.snapshot()
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        let today = self.clock.now();
        export::build_rows(
            self.expiry.snapshot(),
            &self.ledger.snapshot(),
            &self.expiry.dated_units(),
            today,
        )
    }

    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        let path = path.as_ref();
        let rows = self.export_rows();
        match export::write_csv_file(&rows, path) {
            Ok(n) => {
                info!(path = %path.display(), rows = n, "inventory exported");
                Ok(n)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                Err(e)
            }
        }
    }

    pub fn graph(&self) -> &RouteGraph {
        &self.graph
    }

    pub fn add_edge(&mut self, from: &str, to: &str, weight: i64) -> Result<(), RouteError> {
        self.graph.add_edge(from, to, weight)
    }

    pub fn shortest_path(&self, from: &str, to: &str) -> RouteOutcome {
        self.graph.shortest_path(from, to)
    }
}
