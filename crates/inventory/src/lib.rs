//! Inventory domain module.
//!
//! In-memory stock ledger plus the structures fed by it: the advisory
//! low-stock index, batch expiry tracking and the demand-spike sale log.
//! Deterministic domain logic; the only IO is the CSV export.

pub mod demand;
pub mod expiry;
pub mod export;
pub mod ledger;
pub mod low_stock;
pub mod manager;

pub use demand::{DemandSpike, DemandWindow, SaleEvent};
pub use expiry::{Batch, ExpiryTracker};
pub use export::{BatchStatus, ExportError, ExportRow};
pub use ledger::StockLedger;
pub use low_stock::{LowStockEntry, LowStockIndex};
pub use manager::{InventoryManager, StockIssue, StockReceipt};
