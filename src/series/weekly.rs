//! Anchored 7-day bucket averaging.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::model::WideTable;
use crate::series::utility::{mean, round1};

/// Averages each region's values into non-overlapping 7-day windows starting
/// at `anchor`, returning region → ordered bucket means rounded to 1 decimal.
///
/// Columns are walked in input order and never re-sorted. Closing a window
/// advances the anchor by exactly 7 days, so a gap wider than one week folds
/// the following dates into successive single-step windows rather than
/// emitting empty ones. A non-empty final partial window is always emitted.
pub fn aggregate_weekly(table: &WideTable, anchor: NaiveDate) -> BTreeMap<String, Vec<f64>> {
    let mut weekly = BTreeMap::new();

    for row in &table.rows {
        let mut week_start = anchor;
        let mut bucket: Vec<f64> = Vec::new();
        let mut means: Vec<f64> = Vec::new();

        for (date, value) in table.dated_values(row) {
            if date < week_start + Duration::days(7) {
                bucket.push(value);
            } else {
                means.push(round1(mean(&bucket)));
                bucket.clear();
                bucket.push(value);
                week_start += Duration::days(7);
            }
        }

        if !bucket.is_empty() {
            means.push(round1(mean(&bucket)));
        }

        weekly.insert(row.region.clone(), means);
    }

    weekly
}
