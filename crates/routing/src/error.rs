use std::path::PathBuf;

use thiserror::Error;

/// Failures while building or querying the route network.
///
/// An unreachable destination is not an error; see
/// [`RouteOutcome::NoPath`](crate::RouteOutcome::NoPath).
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("distance between '{from}' and '{to}' must be positive (got {weight})")]
    InvalidWeight { from: String, to: String, weight: i64 },

    #[error("location name cannot be empty")]
    EmptyLocation,

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("failed to read network file {path:?}: {source}")]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed network definition: {0}")]
    SeedFormat(#[from] serde_json::Error),
}
