//! Data types for the regional change table and its derived views.

use chrono::NaiveDate;
use serde::Serialize;

/// A date column from the source table header.
///
/// The original `MM/DD` label is kept for display; the full date carries the
/// reference year attached at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct DateColumn {
    pub label: String,
    pub date: NaiveDate,
}

/// One table row: a region and its per-column values, in column order.
#[derive(Debug, Clone)]
pub struct RegionRow {
    pub region: String,
    pub values: Vec<f64>,
}

/// The wide-format table: one row per region, one column per date.
///
/// Columns stay in the order they appeared in the source file; nothing
/// downstream re-sorts them.
#[derive(Debug, Clone)]
pub struct WideTable {
    /// The year attached to every `MM/DD` column label at load time.
    pub reference_year: i32,
    pub columns: Vec<DateColumn>,
    pub rows: Vec<RegionRow>,
}

impl WideTable {
    /// January 1 of the reference year, the anchor for weekly bucketing.
    pub fn week_anchor(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.reference_year, 1, 1)
            .expect("January 1 exists in every year")
    }

    /// Region names in row order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.region.as_str())
    }

    /// (date, value) pairs for one row, in column order.
    pub fn dated_values<'a>(
        &'a self,
        row: &'a RegionRow,
    ) -> impl Iterator<Item = (NaiveDate, f64)> + 'a {
        self.columns
            .iter()
            .zip(row.values.iter())
            .map(|(col, v)| (col.date, *v))
    }
}

/// One (region, date) observation in long format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    pub region: String,
    pub date: NaiveDate,
    pub change: f64,
}
