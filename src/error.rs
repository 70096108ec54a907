//! Error taxonomy for loading and aggregating the regional change table.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendsError {
    #[error("data file not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("first column must be named 'Region', found '{found}'")]
    MissingRegionColumn { found: String },

    #[error("table needs a Region column and at least one date column")]
    TooFewColumns,

    #[error("duplicate region '{0}'")]
    DuplicateRegion(String),

    #[error("column '{label}' is not a valid MM/DD date for year {year}")]
    BadDateLabel { label: String, year: i32 },

    #[error("'{value}' is not a valid percentage or number")]
    BadValue { value: String },

    #[error("bad cell for region '{region}', column '{column}': {source}")]
    BadCell {
        region: String,
        column: String,
        source: Box<TrendsError>,
    },
}
