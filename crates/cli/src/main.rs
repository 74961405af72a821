use std::io;

use anyhow::Context;

use stockpath_cli::{AppConfig, Session};
use stockpath_core::SystemClock;
use stockpath_inventory::InventoryManager;

fn main() -> anyhow::Result<()> {
    let (config, warnings) = AppConfig::from_env();
    stockpath_observability::init(config.log_format, &config.log_level);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let seed = config.network().context("failed to load route network")?;
    let (graph, directory) = seed.build().context("invalid route network")?;
    let manager = InventoryManager::with_clock(SystemClock).with_graph(graph);

    let stdin = io::stdin();
    let mut session = Session::new(manager, directory, config, stdin.lock(), io::stdout());
    session.run().context("console output failed")?;
    Ok(())
}
