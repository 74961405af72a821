//! Interactive operator menu.
//!
//! Generic over input/output so the whole session can be driven from tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use stockpath_core::Clock;
use stockpath_inventory::InventoryManager;
use stockpath_routing::{LocationDirectory, RouteError};

use crate::config::AppConfig;
use crate::input::{parse_expiry, parse_positive};
use crate::render;

const MENU: &str = "\n===== Inventory Menu =====\n\
1. Add Stock\n2. Remove Stock\n3. Show Inventory\n4. Check Low Stock\n\
5. Detect Demand Spike\n6. Check Expiry\n7. Export to CSV\n\
8. Find Shortest Picking Path\n9. Add Path Between Locations\n\
10. List Locations\n11. Find Shortest Picking Path (JSON)\n0. Exit\n";

pub struct Session<C, R, W> {
    manager: InventoryManager<C>,
    directory: LocationDirectory,
    config: AppConfig,
    input: R,
    out: W,
}

impl<C: Clock, R: BufRead, W: Write> Session<C, R, W> {
    pub fn new(
        manager: InventoryManager<C>,
        directory: LocationDirectory,
        config: AppConfig,
        input: R,
        out: W,
    ) -> Self {
        Self {
            manager,
            directory,
            config,
            input,
            out,
        }
    }

    pub fn manager(&self) -> &InventoryManager<C> {
        &self.manager
    }

    pub fn directory(&self) -> &LocationDirectory {
        &self.directory
    }

    /// Run until the operator exits or input ends.
    ///
    /// Only failures writing to the output are returned; every operation
    /// failure is printed and the loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        info!("session started");
        loop {
            self.out.write_all(MENU.as_bytes())?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };
            debug!(choice = %choice.trim(), "menu choice");
            match choice.trim() {
                "1" => self.add_stock()?,
                "2" => self.remove_stock()?,
                "3" => self.show_inventory()?,
                "4" => self.check_low_stock()?,
                "5" => self.detect_demand_spike()?,
                "6" => self.check_expiry()?,
                "7" => self.export()?,
                "8" => self.shortest_path(false)?,
                "9" => self.add_path()?,
                "10" => self.list_locations()?,
                "11" => self.shortest_path(true)?,
                "0" => {
                    writeln!(self.out, "Exiting...")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid choice. Try again.")?,
            }
        }
        self.out.flush()?;
        info!("session ended");
        Ok(())
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn fail(&mut self, msg: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "[!] {msg}")
    }

    fn add_stock(&mut self) -> io::Result<()> {
        let Some(product) = self.prompt("Enter product name: ")? else {
            return Ok(());
        };
        if product.is_empty() {
            return self.fail("Product name cannot be empty");
        }
        let Some(raw_qty) = self.prompt("Enter quantity: ")? else {
            return Ok(());
        };
        let qty = match parse_positive(&raw_qty, "quantity") {
            Ok(q) => q,
            Err(e) => return self.fail(e),
        };
        let Some(raw_expiry) = self.prompt("Enter expiry date (YYYY-MM-DD) or leave blank: ")?
        else {
            return Ok(());
        };
        let expiry = match parse_expiry(&raw_expiry) {
            Ok(e) => e,
            Err(e) => return self.fail(e),
        };

        match self.manager.add_stock(&product, qty, expiry) {
            Ok(receipt) => writeln!(
                self.out,
                "[+] Added {} of '{}' (total {})",
                receipt.added, receipt.product, receipt.total
            ),
            Err(e) => self.fail(e),
        }
    }

    fn remove_stock(&mut self) -> io::Result<()> {
        let Some(product) = self.prompt("Enter product name: ")? else {
            return Ok(());
        };
        if product.is_empty() {
            return self.fail("Product name cannot be empty");
        }
        let Some(raw_qty) = self.prompt("Enter quantity: ")? else {
            return Ok(());
        };
        let qty = match parse_positive(&raw_qty, "quantity") {
            Ok(q) => q,
            Err(e) => return self.fail(e),
        };

        match self.manager.remove_stock(&product, qty) {
            Ok(issue) => writeln!(
                self.out,
                "[-] Removed {} of '{}' ({} left)",
                issue.removed, issue.product, issue.remaining
            ),
            Err(e) => self.fail(e),
        }
    }

    fn show_inventory(&mut self) -> io::Result<()> {
        let text = render::inventory_text(&self.manager.stock());
        self.out.write_all(text.as_bytes())
    }

    fn check_low_stock(&mut self) -> io::Result<()> {
        let Some(raw) = self.prompt("Enter low stock threshold: ")? else {
            return Ok(());
        };
        let threshold = match parse_positive(&raw, "threshold") {
            Ok(t) => t,
            Err(e) => return self.fail(e),
        };
        let text = render::low_stock_text(&self.manager.check_low_stock(threshold));
        self.out.write_all(text.as_bytes())
    }

    fn detect_demand_spike(&mut self) -> io::Result<()> {
        let window = self.config.demand_window_secs;
        let threshold = self.config.spike_threshold;
        match self.manager.detect_demand_spike(window, threshold) {
            Ok(spikes) => {
                let text = render::spikes_text(&spikes);
                self.out.write_all(text.as_bytes())
            }
            Err(e) => self.fail(e),
        }
    }

    fn check_expiry(&mut self) -> io::Result<()> {
        let text = render::expired_text(&self.manager.check_expiry_now());
        self.out.write_all(text.as_bytes())
    }

    fn export(&mut self) -> io::Result<()> {
        let path = self.config.export_path.clone();
        match self.manager.export_csv(&path) {
            Ok(_) => writeln!(
                self.out,
                "\nDetailed inventory exported to {}",
                path.display()
            ),
            Err(e) => self.fail(e),
        }
    }

    fn resolve_location(&mut self, raw: &str, kind: &str) -> io::Result<Option<String>> {
        match self.directory.resolve(raw) {
            Ok(name) => Ok(Some(name)),
            Err(RouteError::UnknownLocation(name)) => {
                writeln!(self.out, "Invalid {kind} city: {name}")?;
                Ok(None)
            }
            Err(e) => {
                self.fail(e)?;
                Ok(None)
            }
        }
    }

    fn shortest_path(&mut self, as_json: bool) -> io::Result<()> {
        let Some(raw_from) = self.prompt("Enter start location: ")? else {
            return Ok(());
        };
        let Some(raw_to) = self.prompt("Enter end location: ")? else {
            return Ok(());
        };
        let Some(from) = self.resolve_location(&raw_from, "start")? else {
            return Ok(());
        };
        let Some(to) = self.resolve_location(&raw_to, "destination")? else {
            return Ok(());
        };

        let outcome = self.manager.shortest_path(&from, &to);
        if as_json {
            writeln!(self.out, "{}", render::route_json(&outcome))
        } else {
            self.out.write_all(render::route_text(&outcome).as_bytes())
        }
    }

    fn add_path(&mut self) -> io::Result<()> {
        writeln!(self.out, "Available Cities:\n{}", self.directory.names().join(", "))?;
        let Some(raw_from) = self.prompt("Enter location 1: ")? else {
            return Ok(());
        };
        let Some(raw_to) = self.prompt("Enter location 2: ")? else {
            return Ok(());
        };
        let Some(raw_weight) = self.prompt("Enter distance: ")? else {
            return Ok(());
        };
        let weight = match parse_positive(&raw_weight, "distance") {
            Ok(w) => w,
            Err(e) => return self.fail(e),
        };

        let from = self.directory.canonical(&raw_from);
        let to = self.directory.canonical(&raw_to);
        if let Err(e) = self.manager.add_edge(&from, &to, weight) {
            return self.fail(e);
        }
        // New endpoints become valid route targets.
        self.directory.insert(from.clone());
        self.directory.insert(to.clone());

        writeln!(
            self.out,
            "Path added between '{from}' and '{to}' with distance {weight}"
        )
    }

    fn list_locations(&mut self) -> io::Result<()> {
        writeln!(self.out, "Available Cities:")?;
        for name in self.directory.names() {
            writeln!(self.out, "{name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;
    use stockpath_core::ManualClock;
    use stockpath_routing::NetworkSeed;

    type TestSession = Session<ManualClock, Cursor<Vec<u8>>, Vec<u8>>;

    fn run_script(script: &str) -> (String, TestSession) {
        run_on(NetworkSeed::gujarat(), script)
    }

    fn run_on(seed: NetworkSeed, script: &str) -> (String, TestSession) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap());
        let (graph, directory) = seed.build().unwrap();
        let manager = InventoryManager::with_clock(clock).with_graph(graph);
        let mut session = Session::new(
            manager,
            directory,
            AppConfig::default(),
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        );
        session.run().unwrap();
        let out = String::from_utf8(session.out.clone()).unwrap();
        (out, session)
    }

    #[test]
    fn eof_ends_session_cleanly() {
        let (out, _) = run_script("");
        assert!(out.contains("Enter choice: "));
        assert!(!out.contains("Exiting"));
    }

    #[test]
    fn invalid_choice_is_reported() {
        let (out, _) = run_script("42\n0\n");
        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn add_rejects_bad_quantity_without_mutation() {
        let (out, session) = run_script("1\nRice\nzero\n1\nRice\n-4\n0\n");
        assert!(out.contains("[!] 'zero' is not a whole number"));
        assert!(out.contains("[!] quantity must be positive"));
        assert!(session.manager().stock().is_empty());
    }

    #[test]
    fn add_rejects_bad_date() {
        let (out, session) = run_script("1\nMilk\n3\n15-06-2025\n0\n");
        assert!(out.contains("invalid date '15-06-2025'"));
        assert!(session.manager().stock().is_empty());
    }

    #[test]
    fn route_endpoints_are_normalized_and_validated() {
        let (out, _) = run_script("8\n  vapi \nSURAT\n8\nMumbai\nSurat\n0\n");
        assert!(out.contains("Shortest path from Vapi to Surat:"));
        assert!(out.contains("Total cost: 65"));
        assert!(out.contains("Invalid start city: Mumbai"));
        // The destination line is consumed, not read as a menu choice.
        assert!(!out.contains("Invalid choice"));
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn invalid_destination_is_reported() {
        let (out, _) = run_script("8\nSurat\nMumbai\n0\n");
        assert!(out.contains("Invalid destination city: Mumbai"));
        assert!(!out.contains("PATH_START"));
        assert!(!out.contains("Invalid choice"));
    }

    #[test]
    fn custom_network_names_resolve_in_any_case() {
        let seed =
            NetworkSeed::from_json_str(r#"{"edges":[{"from":"DC1","to":"Aisle B","weight":4}]}"#)
                .unwrap();
        let (out, session) = run_on(
            seed,
            "8\nDC1\nAisle B\n9\ndc1\ndock\n3\n8\nDOCK\naisle b\n0\n",
        );

        assert!(out.contains("Shortest path from DC1 to Aisle B:\nDC1 (0)\nAisle B (4)\n"));
        assert!(out.contains("Path added between 'DC1' and 'Dock' with distance 3"));
        assert!(out.contains("Dock (0)\nDC1 (3)\nAisle B (7)\n"));
        assert!(!session.manager().graph().contains("Dc1"));
        assert!(!out.contains("Invalid"));
    }

    #[test]
    fn added_path_makes_new_location_routable() {
        let (out, session) = run_script("9\ndepot\nvapi\n5\n8\nDepot\nNavsari\n0\n");
        assert!(out.contains("Path added between 'Depot' and 'Vapi' with distance 5"));
        assert!(out.contains("Depot (0)\nVapi (5)\nNavsari (40)\n"));
        assert!(session.directory().contains("Depot"));
    }

    #[test]
    fn rejected_path_does_not_register_locations() {
        let (out, session) = run_script("9\nDepot\nVapi\n0\n0\n");
        assert!(out.contains("[!] distance must be positive"));
        assert!(!session.directory().contains("Depot"));
        assert!(!session.manager().graph().contains("Depot"));
    }
}
