//! Network definitions: the built-in city map and JSON-defined networks.
//!
//! A [`NetworkSeed`] is turned into a [`RouteGraph`] plus the matching
//! [`LocationDirectory`] in one explicit step, so nothing about the map lives
//! in global state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::directory::LocationDirectory;
use crate::error::RouteError;
use crate::graph::RouteGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEdge {
    pub from: String,
    pub to: String,
    pub weight: i64,
}

/// Declarative description of a route network.
///
/// When `locations` is empty, the valid names are derived from edge endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSeed {
    #[serde(default)]
    pub locations: Vec<String>,
    pub edges: Vec<SeedEdge>,
}

const GUJARAT_LOCATIONS: &[&str] = &[
    "Ahmedabad", "Gandhinagar", "Surat", "Vadodara", "Rajkot", "Jamnagar", "Bhuj", "Valsad",
    "Vapi", "Navsari", "Mehsana", "Palanpur", "Deesa", "Surendranagar", "Botad", "Bhavnagar",
    "Anand", "Nadiad", "Dahod", "Godhra", "Amreli", "Junagadh", "Porbandar", "Dwarka", "Morbi",
    "Modasa", "Himmatnagar", "Kalol", "Jetpur", "Mangrol", "Veraval", "Bharuch", "Ankleshwar",
];

// Road distances in km.
const GUJARAT_ROADS: &[(&str, &str, i64)] = &[
    ("Ahmedabad", "Gandhinagar", 30),
    ("Ahmedabad", "Surat", 270),
    ("Surat", "Vadodara", 150),
    ("Vadodara", "Ahmedabad", 110),
    ("Rajkot", "Jamnagar", 90),
    ("Rajkot", "Ahmedabad", 215),
    ("Bhuj", "Rajkot", 240),
    ("Bhuj", "Jamnagar", 135),
    ("Surat", "Valsad", 70),
    ("Valsad", "Vapi", 20),
    ("Vapi", "Navsari", 35),
    ("Navsari", "Surat", 30),
    ("Mehsana", "Palanpur", 85),
    ("Palanpur", "Deesa", 55),
    ("Deesa", "Bhuj", 290),
    ("Surendranagar", "Ahmedabad", 120),
    ("Botad", "Bhavnagar", 70),
    ("Bhavnagar", "Surendranagar", 100),
    ("Anand", "Vadodara", 45),
    ("Nadiad", "Anand", 20),
    ("Nadiad", "Ahmedabad", 55),
    ("Dahod", "Godhra", 80),
    ("Godhra", "Vadodara", 65),
    ("Amreli", "Bhavnagar", 90),
    ("Junagadh", "Amreli", 110),
    ("Junagadh", "Porbandar", 85),
    ("Porbandar", "Dwarka", 105),
    ("Dwarka", "Jamnagar", 130),
    ("Morbi", "Rajkot", 65),
    ("Morbi", "Surendranagar", 90),
    ("Modasa", "Himmatnagar", 40),
    ("Himmatnagar", "Ahmedabad", 85),
    ("Kalol", "Gandhinagar", 15),
    ("Kalol", "Mehsana", 40),
    ("Jetpur", "Rajkot", 65),
    ("Jetpur", "Junagadh", 45),
    ("Mangrol", "Porbandar", 40),
    ("Veraval", "Mangrol", 60),
    ("Veraval", "Junagadh", 75),
    ("Bharuch", "Vadodara", 75),
    ("Bharuch", "Surat", 60),
    ("Ankleshwar", "Bharuch", 12),
];

impl NetworkSeed {
    /// Built-in Gujarat city road map.
    pub fn gujarat() -> Self {
        Self {
            locations: GUJARAT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            edges: GUJARAT_ROADS
                .iter()
                .map(|&(from, to, weight)| SeedEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight,
                })
                .collect(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, RouteError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RouteError::SeedIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Build the graph and directory. Fails on the first invalid road, or on a
    /// road whose endpoint is missing from a non-empty `locations` list.
    pub fn build(&self) -> Result<(RouteGraph, LocationDirectory), RouteError> {
        let mut directory = LocationDirectory::new(self.locations.iter().cloned());
        let declared = !directory.is_empty();

        let mut graph = RouteGraph::new();
        for edge in &self.edges {
            for endpoint in [&edge.from, &edge.to] {
                if declared && !directory.contains(endpoint) {
                    return Err(RouteError::UnknownLocation(endpoint.clone()));
                }
            }
            graph.add_edge(&edge.from, &edge.to, edge.weight)?;
            if !declared {
                directory.insert(edge.from.clone());
                directory.insert(edge.to.clone());
            }
        }

        info!(
            locations = directory.len(),
            roads = graph.edge_count(),
            "route network loaded"
        );
        Ok((graph, directory))
    }
}
