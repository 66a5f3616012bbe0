//! CSV sink for the enriched master table.
//!
//! The header row comes from the [`EnrichedRide`] field names, so column
//! order is defined in exactly one place. Floats are written in shortest
//! round-trip form; non-finite user ratios appear as `inf`/`NaN` and are
//! not an error.

use std::path::Path;

use crate::error::PipelineResult;
use crate::models::EnrichedRide;

/// Output column order. Must match the [`EnrichedRide`] field order.
pub const OUTPUT_COLUMNS: [&str; 15] = [
    "txn_id",
    "company",
    "city",
    "travel_distance",
    "price",
    "cost",
    "profit",
    "population",
    "user_ratio",
    "customer_id",
    "payment_mode",
    "gender",
    "age",
    "income_per_month",
    "state",
];

/// Write the enriched rows as a CSV file with a header row.
///
/// An empty row set still produces the header, so the output is always a
/// well-formed table.
pub fn write_enriched<P: AsRef<Path>>(path: P, rows: &[EnrichedRide]) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    if rows.is_empty() {
        writer.write_record(OUTPUT_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
