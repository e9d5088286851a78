// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numeric cell parsing
//!
//! Spreadsheet exports hand us every value as text. A cell counts as numeric
//! only when the whole trimmed string is a finite real number, so partial
//! matches such as `"12abc"` are rejected instead of being read as 12.

/// Parse a cell into a finite `f64`
///
/// Surrounding whitespace is ignored. Empty strings, trailing garbage,
/// `NaN` and infinities all yield `None`.
#[inline]
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match fast_float::parse::<f64, _>(trimmed) {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}

/// Check whether a cell holds a finite number
#[inline]
pub fn is_numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

/// Parse an optional cell, treating absence and non-numeric text alike
#[inline]
pub fn parse_opt(value: Option<&str>) -> Option<f64> {
    value.and_then(parse_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-12.5"), Some(-12.5));
        assert_eq!(parse_number("  7.25 "), Some(7.25));
        assert_eq!(parse_number("1e2"), Some(100.0));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_parse_opt() {
        assert_eq!(parse_opt(None), None);
        assert_eq!(parse_opt(Some("3")), Some(3.0));
        assert!(!is_numeric("x"));
        assert!(is_numeric("0"));
    }
}
