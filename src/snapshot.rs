//! Precomputed, immutable dashboard views.
//!
//! All derived views are built once from a loaded table and held behind an
//! `Arc` for the life of the process, so request handlers only read. This
//! replaces the module-level precomputed frames of earlier variants with an
//! explicitly constructed object.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::error::TrendsError;
use crate::loader::load_table;
use crate::model::{LongRecord, RegionRow, WideTable};
use crate::series::melt::melt;
use crate::series::monthly::{DEFAULT_MONTHS, aggregate_monthly};
use crate::series::weekly::aggregate_weekly;

/// The wide-format daily view: date labels plus one record object per region.
#[derive(Debug, Clone, Serialize)]
pub struct DailyView {
    pub dates: Vec<String>,
    pub regions: Vec<Value>,
}

/// Weekly bucket means per region with `Week N` labels.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyView {
    pub labels: Vec<String>,
    pub data: BTreeMap<String, Vec<f64>>,
}

/// Monthly means per region with the configured month labels.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyView {
    pub labels: Vec<String>,
    pub data: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Everything the dashboard needs, derived once per load.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub daily: DailyView,
    pub weekly: WeeklyView,
    pub monthly: MonthlyView,
    /// Long-format records sorted by date then region, for line charts.
    pub series: Vec<LongRecord>,
}

/// The `/data` response body: the snapshot minus the long-format series.
#[derive(Serialize)]
pub struct DashboardPayload<'a> {
    pub daily: &'a DailyView,
    pub weekly: &'a WeeklyView,
    pub monthly: &'a MonthlyView,
}

impl Snapshot {
    /// Derives all views from a loaded table.
    pub fn build(table: &WideTable) -> Self {
        let weekly_data = aggregate_weekly(table, table.week_anchor());

        // Label as many weeks as the longest region series holds
        let week_count = weekly_data.values().map(Vec::len).max().unwrap_or(0);
        let week_labels = (1..=week_count).map(|i| format!("Week {i}")).collect();

        let monthly_data = aggregate_monthly(table, DEFAULT_MONTHS);
        let month_labels = DEFAULT_MONTHS
            .iter()
            .map(|&(name, _)| name.to_string())
            .collect();

        let snapshot = Snapshot {
            daily: DailyView {
                dates: table.columns.iter().map(|c| c.label.clone()).collect(),
                regions: table.rows.iter().map(|row| region_record(table, row)).collect(),
            },
            weekly: WeeklyView {
                labels: week_labels,
                data: weekly_data,
            },
            monthly: MonthlyView {
                labels: month_labels,
                data: monthly_data,
            },
            series: melt(table),
        };

        info!(
            regions = snapshot.daily.regions.len(),
            dates = snapshot.daily.dates.len(),
            weeks = snapshot.weekly.labels.len(),
            "Snapshot built"
        );

        snapshot
    }

    /// Loads the table at `path` and derives all views from it.
    pub fn from_file(path: &str, reference_year: i32) -> Result<Self, TrendsError> {
        let table = load_table(path, reference_year)?;
        Ok(Self::build(&table))
    }

    /// Borrowing view of the parts served by `/data`.
    pub fn dashboard(&self) -> DashboardPayload<'_> {
        DashboardPayload {
            daily: &self.daily,
            weekly: &self.weekly,
            monthly: &self.monthly,
        }
    }
}

/// One daily record object: `{"Region": name, "01/01": 25.0, ...}`.
fn region_record(table: &WideTable, row: &RegionRow) -> Value {
    let mut record = Map::new();
    record.insert("Region".to_string(), Value::from(row.region.clone()));
    for (col, value) in table.columns.iter().zip(row.values.iter()) {
        record.insert(col.label.clone(), Value::from(*value));
    }
    Value::Object(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateColumn, RegionRow};
    use chrono::NaiveDate;

    fn sample_table() -> WideTable {
        let labels = ["01/01", "01/02", "01/03", "01/04", "01/05", "01/06", "01/07", "01/08"];
        WideTable {
            reference_year: 2025,
            columns: labels
                .iter()
                .map(|l| DateColumn {
                    label: l.to_string(),
                    date: NaiveDate::parse_from_str(&format!("{l}/2025"), "%m/%d/%Y").unwrap(),
                })
                .collect(),
            rows: vec![
                RegionRow {
                    region: "Global".to_string(),
                    values: vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
                },
                RegionRow {
                    region: "US".to_string(),
                    values: vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0],
                },
            ],
        }
    }

    #[test]
    fn test_build_views() {
        let snapshot = Snapshot::build(&sample_table());

        assert_eq!(snapshot.daily.dates.len(), 8);
        assert_eq!(snapshot.daily.regions.len(), 2);
        assert_eq!(snapshot.weekly.labels, vec!["Week 1", "Week 2"]);
        assert_eq!(snapshot.weekly.data["Global"], vec![4.0, 8.0]);
        assert_eq!(snapshot.monthly.labels, vec!["January", "February", "March"]);
        assert_eq!(snapshot.monthly.data["US"]["January"], 9.0);
        assert_eq!(snapshot.series.len(), 16);
    }

    #[test]
    fn test_daily_record_shape() {
        let snapshot = Snapshot::build(&sample_table());
        let first = &snapshot.daily.regions[0];

        assert_eq!(first["Region"], "Global");
        assert_eq!(first["01/01"], 1.0);
        assert_eq!(first["01/08"], 8.0);
    }

    #[test]
    fn test_series_sorted_and_iso_dated() {
        let snapshot = Snapshot::build(&sample_table());

        assert!(snapshot.series.windows(2).all(|w| w[0].date <= w[1].date));
        let json = serde_json::to_value(&snapshot.series[0]).unwrap();
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["region"], "Global");
    }

    #[test]
    fn test_dashboard_payload_keys() {
        let snapshot = Snapshot::build(&sample_table());
        let value = serde_json::to_value(snapshot.dashboard()).unwrap();

        assert!(value.get("daily").is_some());
        assert!(value.get("weekly").is_some());
        assert!(value.get("monthly").is_some());
        assert!(value.get("series").is_none());
    }
}
