//! CSV loader for the wide-format regional change table.
//!
//! Expected layout: header row with `Region` first, then one `MM/DD` column
//! per day. Cells hold percentage strings (`"25%"`) or bare numbers.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use tracing::{debug, info};

use crate::error::TrendsError;
use crate::model::{DateColumn, RegionRow, WideTable};
use crate::percent::parse_percent;

/// Loads the table at `path`, attaching `reference_year` to every `MM/DD`
/// column label so each maps to exactly one calendar date.
///
/// Reads the file once. Column order is preserved as read.
///
/// # Errors
///
/// Fails when the file is absent, the first column is not `Region`, fewer
/// than two columns exist, a region repeats, a date label does not parse,
/// or a cell is not a valid percentage/number.
pub fn load_table(path: &str, reference_year: i32) -> Result<WideTable, TrendsError> {
    if !Path::new(path).exists() {
        return Err(TrendsError::FileNotFound {
            path: path.to_string(),
        });
    }

    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);

    let headers = rdr.headers()?.clone();
    let mut header_iter = headers.iter();

    match header_iter.next() {
        Some("Region") => {}
        Some(other) => {
            return Err(TrendsError::MissingRegionColumn {
                found: other.to_string(),
            });
        }
        None => return Err(TrendsError::TooFewColumns),
    }

    let columns = header_iter
        .map(|label| parse_date_label(label, reference_year))
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(TrendsError::TooFewColumns);
    }

    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for result in rdr.records() {
        let record = result?;
        let mut fields = record.iter();

        let region = fields.next().unwrap_or("").to_string();
        if !seen.insert(region.clone()) {
            return Err(TrendsError::DuplicateRegion(region));
        }

        let values = fields
            .zip(columns.iter())
            .map(|(cell, col)| {
                parse_percent(cell).map_err(|e| TrendsError::BadCell {
                    region: region.clone(),
                    column: col.label.clone(),
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(region = %region, values = values.len(), "Row loaded");
        rows.push(RegionRow { region, values });
    }

    info!(
        path,
        reference_year,
        regions = rows.len(),
        date_columns = columns.len(),
        "Table loaded"
    );

    Ok(WideTable {
        reference_year,
        columns,
        rows,
    })
}

fn parse_date_label(label: &str, year: i32) -> Result<DateColumn, TrendsError> {
    let date = chrono::NaiveDate::parse_from_str(&format!("{label}/{year}"), "%m/%d/%Y").map_err(
        |_| TrendsError::BadDateLabel {
            label: label.to_string(),
            year,
        },
    )?;

    Ok(DateColumn {
        label: label.to_string(),
        date,
    })
}
