//! Calendar-month averaging over a configured month set.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::model::WideTable;
use crate::series::utility::{mean, round1};

/// The months present in the source data.
pub const DEFAULT_MONTHS: &[(&str, u32)] = &[("January", 1), ("February", 2), ("March", 3)];

/// Averages each region's values per configured calendar month, returning
/// region → month name → mean rounded to 1 decimal.
///
/// A configured month with no values yields 0.0. Dates outside the
/// configured set are ignored, not an error.
pub fn aggregate_monthly(
    table: &WideTable,
    months: &[(&str, u32)],
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut monthly = BTreeMap::new();

    for row in &table.rows {
        let mut by_month = BTreeMap::new();

        for &(name, number) in months {
            let values: Vec<f64> = table
                .dated_values(row)
                .filter(|(date, _)| date.month() == number)
                .map(|(_, value)| value)
                .collect();

            let avg = if values.is_empty() {
                0.0
            } else {
                round1(mean(&values))
            };
            by_month.insert(name.to_string(), avg);
        }

        monthly.insert(row.region.clone(), by_month);
    }

    monthly
}
