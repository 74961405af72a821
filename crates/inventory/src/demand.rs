//! Sliding-window sale log for demand-spike detection.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use stockpath_core::ProductName;

/// Units of one product sold at one instant.
///
/// A removal of `n` units is logged as one event carrying `units = n`; every
/// unit shares the removal timestamp, so eviction treats them as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEvent {
    pub at: DateTime<Utc>,
    pub product: ProductName,
    pub units: u64,
}

/// A product whose recent unit sales reached the spike threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandSpike {
    pub product: ProductName,
    pub count: u64,
}

/// Time-ordered sale log: appended at the tail, evicted from the head.
#[derive(Debug, Clone, Default)]
pub struct DemandWindow {
    events: VecDeque<SaleEvent>,
}

impl DemandWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, product: ProductName, units: u64, at: DateTime<Utc>) {
        if units == 0 {
            return;
        }
        self.events.push_back(SaleEvent { at, product, units });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop head events older than `window` relative to `now`.
    ///
    /// An event exactly `window` old is kept. Returns the units evicted.
    pub fn evict(&mut self, now: DateTime<Utc>, window: Duration) -> u64 {
        let mut evicted = 0;
        while let Some(head) = self.events.front() {
            if now - head.at <= window {
                break;
            }
            evicted += head.units;
            self.events.pop_front();
        }
        evicted
    }

    /// Evict, then report every product with at least `threshold` units left
    /// in the window. Highest count first, ties by name.
    pub fn detect_spikes(
        &mut self,
        now: DateTime<Utc>,
        window: Duration,
        threshold: u64,
    ) -> Vec<DemandSpike> {
        self.evict(now, window);

        let mut tally: HashMap<&ProductName, u64> = HashMap::new();
        for event in &self.events {
            *tally.entry(&event.product).or_default() += event.units;
        }

        let mut spikes: Vec<DemandSpike> = tally
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .map(|(product, count)| DemandSpike {
                product: product.clone(),
                count,
            })
            .collect();
        spikes.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.product.cmp(&b.product)));
        spikes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap()
    }

    fn name(s: &str) -> ProductName {
        ProductName::parse(s).unwrap()
    }

    #[test]
    fn three_single_sales_within_a_minute_spike() {
        let mut window = DemandWindow::new();
        for offset in [0, 20, 40] {
            window.record(name("Oil"), 1, test_time() + Duration::seconds(offset));
        }

        let spikes = window.detect_spikes(
            test_time() + Duration::seconds(50),
            Duration::seconds(60),
            3,
        );
        assert_eq!(
            spikes,
            vec![DemandSpike {
                product: name("Oil"),
                count: 3
            }]
        );
    }

    #[test]
    fn event_exactly_window_old_is_kept() {
        let mut window = DemandWindow::new();
        window.record(name("Oil"), 2, test_time());

        let now = test_time() + Duration::seconds(60);
        assert_eq!(window.evict(now, Duration::seconds(60)), 0);
        assert!(!window.is_empty());

        let later = now + Duration::seconds(1);
        assert_eq!(window.evict(later, Duration::seconds(60)), 2);
        assert!(window.is_empty());
    }

    #[test]
    fn eviction_is_permanent() {
        let mut window = DemandWindow::new();
        window.record(name("Oil"), 5, test_time());

        let now = test_time() + Duration::seconds(120);
        assert!(window.detect_spikes(now, Duration::seconds(60), 1).is_empty());
        // A wider window afterwards cannot bring the sales back.
        assert!(window.detect_spikes(now, Duration::seconds(600), 1).is_empty());
    }

    #[test]
    fn multi_unit_removal_counts_each_unit() {
        let mut window = DemandWindow::new();
        window.record(name("Rice"), 4, test_time());
        window.record(name("Oil"), 1, test_time());

        let spikes = window.detect_spikes(test_time(), Duration::seconds(60), 3);
        assert_eq!(spikes.len(), 1);
        assert_eq!(spikes[0].product.as_str(), "Rice");
        assert_eq!(spikes[0].count, 4);
    }

    #[test]
    fn spikes_sorted_by_count_then_name() {
        let mut window = DemandWindow::new();
        window.record(name("Salt"), 3, test_time());
        window.record(name("Dal"), 3, test_time());
        window.record(name("Rice"), 9, test_time());

        let spikes = window.detect_spikes(test_time(), Duration::seconds(60), 3);
        let got: Vec<_> = spikes.iter().map(|s| (s.product.as_str(), s.count)).collect();
        assert_eq!(got, vec![("Rice", 9), ("Dal", 3), ("Salt", 3)]);
    }

    #[test]
    fn zero_unit_sale_is_ignored() {
        let mut window = DemandWindow::new();
        window.record(name("Rice"), 0, test_time());
        assert!(window.is_empty());
    }
}
