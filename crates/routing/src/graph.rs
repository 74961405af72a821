//! Undirected weighted location graph with Dijkstra shortest paths.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RouteError;

/// One direction of an undirected road.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Road {
    to: String,
    weight: u64,
}

/// A location on a computed route together with its distance from the start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHop {
    pub location: String,
    pub cumulative: u64,
}

/// A shortest route, start first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub hops: Vec<RouteHop>,
    pub total_cost: u64,
}

impl Route {
    fn trivial(location: &str) -> Self {
        Self {
            from: location.to_string(),
            to: location.to_string(),
            hops: vec![RouteHop {
                location: location.to_string(),
                cumulative: 0,
            }],
            total_cost: 0,
        }
    }

    pub fn path(&self) -> impl Iterator<Item = &str> {
        self.hops.iter().map(|h| h.location.as_str())
    }

    pub fn distances(&self) -> impl Iterator<Item = u64> + '_ {
        self.hops.iter().map(|h| h.cumulative)
    }
}

/// Result of a shortest-path query.
///
/// `NoPath` is an ordinary answer. `Broken` means the predecessor chain could
/// not be walked back to the start even though the destination was reached,
/// which should never happen and is surfaced instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    NoPath { from: String, to: String },
    Broken { from: String, to: String },
}

/// Undirected multigraph over location names.
///
/// Parallel roads between the same pair are all kept.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    adjacency: HashMap<String, Vec<Road>>,
    edge_count: usize,
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a road in both directions.
    ///
    /// Rejects empty endpoints and non-positive weights, leaving the graph
    /// untouched. Duplicates are not checked.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: i64) -> Result<(), RouteError> {
        if from.is_empty() || to.is_empty() {
            return Err(RouteError::EmptyLocation);
        }
        if weight <= 0 {
            return Err(RouteError::InvalidWeight {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
        }
        let weight = weight as u64;

        self.adjacency.entry(from.to_string()).or_default().push(Road {
            to: to.to_string(),
            weight,
        });
        self.adjacency.entry(to.to_string()).or_default().push(Road {
            to: from.to_string(),
            weight,
        });
        self.edge_count += 1;

        debug!(from, to, weight, "road added");
        Ok(())
    }

    pub fn contains(&self, location: &str) -> bool {
        self.adjacency.contains_key(location)
    }

    /// All locations that appear on at least one road (unordered).
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Number of undirected roads added.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Neighbors of `location` in insertion order, with road weights.
    pub fn neighbors(&self, location: &str) -> impl Iterator<Item = (&str, u64)> {
        self.adjacency
            .get(location)
            .into_iter()
            .flatten()
            .map(|r| (r.to.as_str(), r.weight))
    }

    /// Lightest road directly connecting `from` and `to`.
    fn lightest_road(&self, from: &str, to: &str) -> Option<u64> {
        self.neighbors(from)
            .filter(|(n, _)| *n == to)
            .map(|(_, w)| w)
            .min()
    }

    /// Shortest route from `start` to `end`.
    ///
    /// Equal-cost frontier entries are settled in name order, and a neighbor's
    /// predecessor only changes on a strictly shorter path, so the same graph
    /// always yields the same route.
    pub fn shortest_path(&self, start: &str, end: &str) -> RouteOutcome {
        if start == end {
            return RouteOutcome::Found(Route::trivial(start));
        }

        let mut dist: HashMap<&str, u64> = HashMap::new();
        let mut prev: HashMap<&str, &str> = HashMap::new();
        let mut frontier = BinaryHeap::new();

        dist.insert(start, 0);
        frontier.push(Reverse((0u64, start)));

        while let Some(Reverse((d, node))) = frontier.pop() {
            if d > dist.get(node).copied().unwrap_or(u64::MAX) {
                continue;
            }
            if node == end {
                break;
            }
            let Some(roads) = self.adjacency.get(node) else {
                continue;
            };
            for road in roads {
                let candidate = d.saturating_add(road.weight);
                let best = dist.get(road.to.as_str()).copied().unwrap_or(u64::MAX);
                if candidate < best {
                    dist.insert(road.to.as_str(), candidate);
                    prev.insert(road.to.as_str(), node);
                    frontier.push(Reverse((candidate, road.to.as_str())));
                }
            }
        }

        let Some(&total_cost) = dist.get(end) else {
            info!(start, end, "no path");
            return RouteOutcome::NoPath {
                from: start.to_string(),
                to: end.to_string(),
            };
        };

        let broken = || {
            warn!(start, end, "predecessor chain broken");
            RouteOutcome::Broken {
                from: start.to_string(),
                to: end.to_string(),
            }
        };

        let mut path = vec![end];
        let mut at = end;
        while at != start {
            let Some(&p) = prev.get(at) else {
                return broken();
            };
            // A chain longer than the node count can only be a cycle.
            if path.len() >= dist.len() {
                return broken();
            }
            path.push(p);
            at = p;
        }
        path.reverse();

        // Recompute per-hop distances from the adjacency itself.
        let mut hops = Vec::with_capacity(path.len());
        let mut cumulative = 0u64;
        hops.push(RouteHop {
            location: start.to_string(),
            cumulative,
        });
        for pair in path.windows(2) {
            let Some(weight) = self.lightest_road(pair[0], pair[1]) else {
                return broken();
            };
            cumulative += weight;
            hops.push(RouteHop {
                location: pair[1].to_string(),
                cumulative,
            });
        }
        if cumulative != total_cost {
            return broken();
        }

        info!(start, end, total_cost, hops = hops.len(), "route found");
        RouteOutcome::Found(Route {
            from: start.to_string(),
            to: end.to_string(),
            hops,
            total_cost,
        })
    }
}
