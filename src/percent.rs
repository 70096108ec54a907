//! Parser for percentage-change cells.
//!
//! Source cells are either percentage strings (`"25%"`) or bare numbers
//! (`"-3.5"`). One trailing `%` is stripped before parsing.

use crate::error::TrendsError;

/// Parses a cell value into a float, stripping one trailing `%` if present.
///
/// # Errors
///
/// Returns [`TrendsError::BadValue`] when the residual text is not a finite
/// decimal number.
pub fn parse_percent(raw: &str) -> Result<f64, TrendsError> {
    let trimmed = raw.trim();
    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed);

    let value: f64 = numeric.parse().map_err(|_| TrendsError::BadValue {
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(TrendsError::BadValue {
            value: raw.to_string(),
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_string() {
        assert_eq!(parse_percent("25%").unwrap(), 25.0);
    }

    #[test]
    fn test_parse_negative_bare_number() {
        assert_eq!(parse_percent("-3.5").unwrap(), -3.5);
    }

    #[test]
    fn test_parse_negative_percent_string() {
        assert_eq!(parse_percent("-12%").unwrap(), -12.0);
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse_percent(" 7.25% ").unwrap(), 7.25);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_percent("abc").is_err());
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(parse_percent("").is_err());
    }

    #[test]
    fn test_only_trailing_percent_is_stripped() {
        // A '%' anywhere else is not valid numeric text
        assert!(parse_percent("2%5").is_err());
        assert!(parse_percent("%25").is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(parse_percent("inf").is_err());
        assert!(parse_percent("NaN").is_err());
    }
}
