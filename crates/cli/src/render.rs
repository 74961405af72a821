//! Console and JSON rendering of query results.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde_json::{Value as JsonValue, json};

use stockpath_core::ProductName;
use stockpath_inventory::{Batch, DemandSpike, LowStockEntry};
use stockpath_routing::RouteOutcome;

/// Parseable text block for a route query.
pub fn route_text(outcome: &RouteOutcome) -> String {
    let mut out = String::new();
    match outcome {
        RouteOutcome::Found(route) => {
            out.push_str("PATH_START\n");
            let _ = writeln!(out, "Shortest path from {} to {}:", route.from, route.to);
            for hop in &route.hops {
                let _ = writeln!(out, "{} ({})", hop.location, hop.cumulative);
            }
            out.push_str("PATH_END\n");
            let _ = writeln!(out, "Total cost: {}", route.total_cost);
        }
        RouteOutcome::NoPath { from, to } => {
            let _ = writeln!(out, "No path from {from} to {to}");
        }
        RouteOutcome::Broken { from, to } => {
            let _ = writeln!(out, "Path broken. Could not trace back from {to} to {from}");
        }
    }
    out
}

/// JSON shape consumed by map front-ends.
pub fn route_json(outcome: &RouteOutcome) -> JsonValue {
    match outcome {
        RouteOutcome::Found(route) => json!({
            "status": "success",
            "from": route.from,
            "to": route.to,
            "path": route.path().collect::<Vec<_>>(),
            "distances": route.distances().collect::<Vec<_>>(),
            "total_distance": route.total_cost,
        }),
        RouteOutcome::NoPath { .. } => json!({
            "status": "error",
            "message": "No path found between the cities",
        }),
        RouteOutcome::Broken { from, to } => json!({
            "status": "error",
            "message": format!("Path broken between {from} and {to}"),
        }),
    }
}

pub fn inventory_text(stock: &BTreeMap<ProductName, i64>) -> String {
    let mut out = String::from("\nCurrent Inventory:\n");
    if stock.is_empty() {
        out.push_str("No items in inventory\n");
    }
    for (product, qty) in stock {
        let _ = writeln!(out, "{product}: {qty}");
    }
    out
}

pub fn low_stock_text(hits: &[LowStockEntry]) -> String {
    let mut out = String::from("\nLow Stock:\n");
    if hits.is_empty() {
        out.push_str("No low stock items found\n");
    }
    for hit in hits {
        if hit.is_stale() {
            let _ = writeln!(
                out,
                "{}: {} (now {})",
                hit.product, hit.indexed_quantity, hit.current_quantity
            );
        } else {
            let _ = writeln!(out, "{}: {}", hit.product, hit.indexed_quantity);
        }
    }
    out
}

pub fn spikes_text(spikes: &[DemandSpike]) -> String {
    let mut out = String::from("\nDemand Spikes:\n");
    if spikes.is_empty() {
        out.push_str("No demand spikes detected\n");
    }
    for spike in spikes {
        let _ = writeln!(out, "{}: {}", spike.product, spike.count);
    }
    out
}

pub fn expired_text(batches: &[Batch]) -> String {
    let mut out = String::from("\nExpired Batches:\n");
    if batches.is_empty() {
        out.push_str("No expired items found\n");
    }
    for batch in batches {
        let _ = writeln!(out, "[EXPIRED] {} Qty: {}", batch.product, batch.quantity);
    }
    out
}
