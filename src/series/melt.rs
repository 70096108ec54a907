//! Wide → long reshaping for chronological chart rendering.

use crate::model::{LongRecord, WideTable};

/// Flattens the table into one record per (region, date) pair, sorted
/// ascending by date then region.
///
/// All dates share the reference year attached at load; series spanning a
/// year boundary are not supported.
pub fn melt(table: &WideTable) -> Vec<LongRecord> {
    let mut records = Vec::with_capacity(table.rows.len() * table.columns.len());

    for row in &table.rows {
        for (date, change) in table.dated_values(row) {
            records.push(LongRecord {
                region: row.region.clone(),
                date,
                change,
            });
        }
    }

    records.sort_by(|a, b| (a.date, &a.region).cmp(&(b.date, &b.region)));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DateColumn, RegionRow};
    use chrono::NaiveDate;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn table(labels: &[(u32, u32)], rows: &[(&str, &[f64])]) -> WideTable {
        WideTable {
            reference_year: 2025,
            columns: labels
                .iter()
                .map(|&(m, d)| DateColumn {
                    label: format!("{:02}/{:02}", m, d),
                    date: date(m, d),
                })
                .collect(),
            rows: rows
                .iter()
                .map(|(region, values)| RegionRow {
                    region: region.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_melt_length_is_rows_times_columns() {
        let t = table(
            &[(1, 1), (1, 2), (1, 3)],
            &[("Global", &[1.0, 2.0, 3.0]), ("US", &[4.0, 5.0, 6.0])],
        );
        assert_eq!(melt(&t).len(), 6);
    }

    #[test]
    fn test_melt_sorted_by_date_then_region() {
        // Columns out of chronological order on purpose
        let t = table(
            &[(1, 2), (1, 1)],
            &[("US", &[10.0, 20.0]), ("Global", &[1.0, 2.0])],
        );
        let records = melt(&t);

        let keys: Vec<_> = records
            .iter()
            .map(|r| (r.date, r.region.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (date(1, 1), "Global"),
                (date(1, 1), "US"),
                (date(1, 2), "Global"),
                (date(1, 2), "US"),
            ]
        );
        // Values follow their (region, date) pair through the reshape
        assert_eq!(records[0].change, 2.0);
        assert_eq!(records[3].change, 10.0);
    }

    #[test]
    fn test_melt_dates_non_decreasing() {
        let t = table(
            &[(1, 5), (1, 1), (2, 1)],
            &[("Global", &[1.0, 2.0, 3.0]), ("UK", &[4.0, 5.0, 6.0])],
        );
        let records = melt(&t);
        assert!(records.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_melt_empty_table() {
        let t = table(&[(1, 1)], &[]);
        assert!(melt(&t).is_empty());
    }
}
