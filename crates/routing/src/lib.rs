//! Picking/delivery route computation over a weighted location graph.
//!
//! Independent of inventory state: the only thing shared with the rest of the
//! system is the set of valid location names.

pub mod directory;
pub mod error;
pub mod graph;
pub mod seed;

pub use directory::{LocationDirectory, normalize};
pub use error::RouteError;
pub use graph::{Route, RouteGraph, RouteHop, RouteOutcome};
pub use seed::{NetworkSeed, SeedEdge};
