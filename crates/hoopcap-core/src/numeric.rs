// Numeric coercion for spreadsheet-formatted cells.

use crate::table::is_missing;

/// Parse a currency-formatted amount such as `"$51,415,938"`.
///
/// Dollar signs and thousands separators are removed before parsing. Returns
/// `None` for missing, unparseable or non-finite values.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|&c| !matches!(c, '$' | ',')).collect();
    parse_number(&cleaned)
}

/// Parse a plain numeric cell. Returns `None` for missing, unparseable or
/// non-finite values.
pub fn parse_number(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Counting-stat coercion: anything that is not a finite number counts as 0.
pub fn count_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(parse_number).unwrap_or(0.0)
}

/// Format a number for CSV output in shortest round-trip form (`40`, `25.7`).
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Format an optional number; missing values become an empty cell.
pub fn format_opt(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

/// Group an integer count with thousands separators (`12,345`).
pub fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_strips_symbol_and_separators() {
        assert_eq!(parse_currency("$51,415,938"), Some(51_415_938.0));
        assert_eq!(parse_currency("  $1,000.50 "), Some(1000.5));
        assert_eq!(parse_currency("2087519"), Some(2_087_519.0));
    }

    #[test]
    fn currency_unparseable_is_none() {
        assert_eq!(parse_currency("TBD"), None);
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("NaN"), None);
        assert_eq!(parse_currency("inf"), None);
    }

    #[test]
    fn count_defaults_to_zero() {
        assert_eq!(count_or_zero(Some("25.7")), 25.7);
        assert_eq!(count_or_zero(Some("n/a")), 0.0);
        assert_eq!(count_or_zero(None), 0.0);
    }

    #[test]
    fn numbers_format_without_trailing_zero() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(25.7), "25.7");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_opt(None), "");
        assert_eq!(format_opt(Some(55_761_216.0)), "55761216");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1_234_567), "1,234,567");
    }
}
