//! Delimited inventory report.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockpath_core::ProductName;

use crate::expiry::Batch;

pub const CSV_HEADER: [&str; 4] = ["Product", "Quantity", "Expiry", "Status"];
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not open {path:?} for writing: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush report: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    Expired,
    Valid,
}

impl BatchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BatchStatus::Expired => "Expired",
            BatchStatus::Valid => "Valid",
        }
    }
}

/// One report line. `expiry` is `None` for stock without a tracked batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    pub product: ProductName,
    pub quantity: i64,
    pub expiry: Option<NaiveDate>,
    pub status: BatchStatus,
}

impl ExportRow {
    pub fn expiry_label(&self) -> String {
        match self.expiry {
            Some(date) => date.format(DATE_FORMAT).to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Build report rows.
///
/// `batches` must already be in expiry order (see
/// [`ExpiryTracker::snapshot`](crate::ExpiryTracker::snapshot)). `dated` holds
/// the units each product received with an expiry date, expired ones included
/// (see [`ExpiryTracker::dated_units`](crate::ExpiryTracker::dated_units)).
/// Whatever a product holds beyond its dated units follows, by name, as
/// `N/A`/`Valid`.
pub fn build_rows(
    batches: Vec<Batch>,
    stock: &BTreeMap<ProductName, i64>,
    dated: &HashMap<&ProductName, i64>,
    today: DateTime<Utc>,
) -> Vec<ExportRow> {
    let undated = stock.iter().filter_map(|(product, qty)| {
        let quantity = qty.saturating_sub(dated.get(product).copied().unwrap_or(0));
        (quantity > 0).then(|| ExportRow {
            product: product.clone(),
            quantity,
            expiry: None,
            status: BatchStatus::Valid,
        })
    });

    batches
        .into_iter()
        .map(|b| ExportRow {
            status: if b.is_expired_at(today) {
                BatchStatus::Expired
            } else {
                BatchStatus::Valid
            },
            expiry: Some(b.expires_at.date_naive()),
            quantity: b.quantity,
            product: b.product,
        })
        .chain(undated)
        .collect()
}

/// Write the header plus `rows`. Returns the number of data rows written.
pub fn write_csv<W: Write>(rows: &[ExportRow], out: W) -> Result<usize, ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        let quantity = row.quantity.to_string();
        let expiry = row.expiry_label();
        wtr.write_record([
            row.product.as_str(),
            quantity.as_str(),
            expiry.as_str(),
            row.status.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

pub fn write_csv_file(rows: &[ExportRow], path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(rows, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap()
    }

    fn name(s: &str) -> ProductName {
        ProductName::parse(s).unwrap()
    }

    fn batch(product: &str, quantity: i64, days: i64) -> Batch {
        Batch {
            product: name(product),
            quantity,
            expires_at: test_time() + Duration::days(days),
        }
    }

    fn dated(batches: &[Batch]) -> HashMap<&ProductName, i64> {
        let mut units = HashMap::new();
        for b in batches {
            *units.entry(&b.product).or_default() += b.quantity;
        }
        units
    }

    fn render(rows: &[ExportRow]) -> String {
        let mut buf = Vec::new();
        write_csv(rows, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn batches_then_untracked_stock() {
        let stock = BTreeMap::from([(name("Rice"), 50), (name("Salt"), 7), (name("Dal"), 0)]);
        let batches = vec![batch("Rice", 20, -1), batch("Rice", 30, 5)];
        let rows = build_rows(batches.clone(), &stock, &dated(&batches), test_time());

        assert_eq!(
            render(&rows),
            "Product,Quantity,Expiry,Status\n\
             Rice,20,2025-06-14,Expired\n\
             Rice,30,2025-06-20,Valid\n\
             Salt,7,N/A,Valid\n"
        );
    }

    #[test]
    fn undated_remainder_of_a_dated_product_is_exported() {
        let stock = BTreeMap::from([(name("Oil"), 15)]);
        let batches = vec![batch("Oil", 5, 3)];
        let rows = build_rows(batches.clone(), &stock, &dated(&batches), test_time());

        assert_eq!(
            render(&rows),
            "Product,Quantity,Expiry,Status\n\
             Oil,5,2025-06-18,Valid\n\
             Oil,10,N/A,Valid\n"
        );
    }

    #[test]
    fn removals_beyond_undated_stock_do_not_go_negative() {
        // 10 dated + 4 undated received, 8 sold: nothing undated is left to report.
        let stock = BTreeMap::from([(name("Milk"), 6)]);
        let batches = vec![batch("Milk", 10, 2)];
        let rows = build_rows(batches.clone(), &stock, &dated(&batches), test_time());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expiry_label(), "2025-06-17");
    }

    #[test]
    fn batch_expiring_today_is_expired() {
        let batches = vec![batch("Milk", 1, 0)];
        let rows = build_rows(batches.clone(), &BTreeMap::new(), &dated(&batches), test_time());
        assert_eq!(rows[0].status, BatchStatus::Expired);
    }

    #[test]
    fn empty_report_still_has_header() {
        assert_eq!(render(&[]), "Product,Quantity,Expiry,Status\n");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let stock = BTreeMap::from([(name("Rice, Basmati"), 2)]);
        let rows = build_rows(vec![], &stock, &HashMap::new(), test_time());
        assert_eq!(
            render(&rows),
            "Product,Quantity,Expiry,Status\n\"Rice, Basmati\",2,N/A,Valid\n"
        );
    }

    #[test]
    fn unwritable_path_is_an_open_error() {
        let err = write_csv_file(&[], Path::new("/no/such/dir/report.csv")).unwrap_err();
        assert!(matches!(err, ExportError::Open { .. }));
    }
}
