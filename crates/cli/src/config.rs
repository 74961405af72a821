//! Runtime configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use stockpath_observability::LogFormat;
use stockpath_routing::{NetworkSeed, RouteError};

pub const ENV_DEMAND_WINDOW_SECS: &str = "STOCKPATH_DEMAND_WINDOW_SECS";
pub const ENV_SPIKE_THRESHOLD: &str = "STOCKPATH_SPIKE_THRESHOLD";
pub const ENV_EXPORT_PATH: &str = "STOCKPATH_EXPORT_PATH";
pub const ENV_NETWORK_FILE: &str = "STOCKPATH_NETWORK_FILE";
pub const ENV_LOG_FORMAT: &str = "STOCKPATH_LOG_FORMAT";
pub const ENV_LOG_LEVEL: &str = "STOCKPATH_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Sliding window for demand-spike detection, in seconds.
    pub demand_window_secs: i64,
    /// Units sold within the window that count as a spike.
    pub spike_threshold: u64,
    pub export_path: PathBuf,
    /// JSON network definition; the built-in city map when unset.
    pub network_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            demand_window_secs: 60,
            spike_threshold: 3,
            export_path: PathBuf::from("inventory_report.csv"),
            network_file: None,
            log_format: LogFormat::Pretty,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Returns the config plus one message per ignored value. Logging is not
    /// up yet at this point, so the caller reports them after init.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Invalid values fall back to the
    /// default and produce a warning message.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();

        if let Some(v) = parse_var::<i64, _>(&lookup, ENV_DEMAND_WINDOW_SECS, &mut warnings) {
            if v > 0 {
                cfg.demand_window_secs = v;
            } else {
                warnings.push(format!("{ENV_DEMAND_WINDOW_SECS} must be positive; using default"));
            }
        }
        if let Some(v) = parse_var::<u64, _>(&lookup, ENV_SPIKE_THRESHOLD, &mut warnings) {
            if v > 0 {
                cfg.spike_threshold = v;
            } else {
                warnings.push(format!("{ENV_SPIKE_THRESHOLD} must be positive; using default"));
            }
        }
        if let Some(v) = non_empty(&lookup, ENV_EXPORT_PATH) {
            cfg.export_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty(&lookup, ENV_NETWORK_FILE) {
            cfg.network_file = Some(PathBuf::from(v));
        }
        if let Some(v) = non_empty(&lookup, ENV_LOG_FORMAT) {
            match v.parse::<LogFormat>() {
                Ok(format) => cfg.log_format = format,
                Err(e) => warnings.push(format!("{ENV_LOG_FORMAT}: {e}; using default")),
            }
        }
        if let Some(v) = non_empty(&lookup, ENV_LOG_LEVEL) {
            cfg.log_level = v;
        }

        (cfg, warnings)
    }

    /// The configured network definition.
    pub fn network(&self) -> Result<NetworkSeed, RouteError> {
        match &self.network_file {
            Some(path) => NetworkSeed::from_json_file(path),
            None => Ok(NetworkSeed::gujarat()),
        }
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T, F>(lookup: &F, key: &str, warnings: &mut Vec<String>) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup, key)?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warnings.push(format!("{key}='{raw}' is not a valid number; using default"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let (cfg, warnings) = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(cfg, AppConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(cfg.demand_window_secs, 60);
        assert_eq!(cfg.spike_threshold, 3);
    }

    #[test]
    fn overrides_are_applied() {
        let (cfg, warnings) = AppConfig::from_lookup(lookup_from(&[
            (ENV_DEMAND_WINDOW_SECS, "300"),
            (ENV_SPIKE_THRESHOLD, "10"),
            (ENV_EXPORT_PATH, "/tmp/report.csv"),
            (ENV_NETWORK_FILE, "warehouse.json"),
            (ENV_LOG_FORMAT, "json"),
            (ENV_LOG_LEVEL, "debug"),
        ]));
        assert!(warnings.is_empty());
        assert_eq!(cfg.demand_window_secs, 300);
        assert_eq!(cfg.spike_threshold, 10);
        assert_eq!(cfg.export_path, PathBuf::from("/tmp/report.csv"));
        assert_eq!(cfg.network_file, Some(PathBuf::from("warehouse.json")));
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let (cfg, warnings) = AppConfig::from_lookup(lookup_from(&[
            (ENV_DEMAND_WINDOW_SECS, "soon"),
            (ENV_SPIKE_THRESHOLD, "0"),
            (ENV_LOG_FORMAT, "xml"),
        ]));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn default_network_is_builtin_map() {
        let seed = AppConfig::default().network().unwrap();
        assert_eq!(seed, NetworkSeed::gujarat());
    }
}
