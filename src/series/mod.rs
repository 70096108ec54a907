//! Time-series derivations over the wide-format table.
//!
//! This module flattens the table into sorted long format, averages values
//! into anchored 7-day windows, and computes per-month means for a
//! configured set of calendar months.

pub mod melt;
pub mod monthly;
pub mod utility;
pub mod weekly;
