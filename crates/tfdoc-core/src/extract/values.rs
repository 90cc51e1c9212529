//! Parsing of extracted strings into typed amounts, dates and quantities.

use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::document::{FieldKind, TypedValue};

lazy_static! {
    static ref AMOUNT_PARTS: Regex =
        Regex::new(r"^([A-Z]{3})[ \t]?(\d[\d,]*(?:\.\d+)?)$").unwrap();

    static ref QUANTITY_PARTS: Regex =
        Regex::new(r"^(\d[\d,]*(?:\.\d+)?)[ \t]*([A-Za-z][A-Za-z0-9 ]*)?$").unwrap();

    static ref TWO_DIGIT_YEAR: Regex = Regex::new(r"^\d{1,2}[./\-]\d{1,2}[./\-]\d{2}$").unwrap();
}

/// Day-first layouts are tried before month-first ones.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%m/%d/%Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%B %d %Y",
    "%y%m%d",
];

const SHORT_YEAR_FORMATS: &[&str] = &["%d/%m/%y", "%d.%m.%y", "%d-%m-%y", "%m/%d/%y"];

/// Parse a decimal with thousands separators (e.g. "1,250,000.50").
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.replace(',', "")).ok()
}

/// Parse "USD 1,250.00" into its currency and value.
pub fn parse_amount(s: &str) -> Option<(String, Decimal)> {
    let caps = AMOUNT_PARTS.captures(s.trim())?;
    let value = parse_decimal(&caps[2])?;
    Some((caps[1].to_string(), value))
}

/// Parse the date layouts found on trade documents.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let cleaned = s.trim().replace(',', "").replace('.', " ");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // Dotted numeric dates lost their dots above; try them on the original.
    let original = s.trim();
    let formats = if TWO_DIGIT_YEAR.is_match(original) {
        SHORT_YEAR_FORMATS
    } else {
        DATE_FORMATS
    };

    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(original, fmt)
            .or_else(|_| NaiveDate::parse_from_str(&cleaned, fmt))
            .ok()
    })
}

/// Parse "2,450.5 KGS" into a value and optional unit.
pub fn parse_quantity(s: &str) -> Option<(Decimal, Option<String>)> {
    let caps = QUANTITY_PARTS.captures(s.trim())?;
    let value = parse_decimal(&caps[1])?;
    let unit = caps.get(2).map(|m| m.as_str().trim().to_uppercase());
    Some((value, unit))
}

/// Typed form of `value` for fields of the given kind.
pub fn typed_value(kind: FieldKind, value: &str) -> Option<TypedValue> {
    match kind {
        FieldKind::Amount => {
            parse_amount(value).map(|(currency, value)| TypedValue::Amount { currency, value })
        }
        FieldKind::Date => parse_date(value).map(|value| TypedValue::Date { value }),
        FieldKind::Quantity => {
            parse_quantity(value).map(|(value, unit)| TypedValue::Quantity { value, unit })
        }
        FieldKind::Identifier | FieldKind::Text | FieldKind::Generic => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(
            parse_amount("USD 1,250,000.00"),
            Some(("USD".to_string(), Decimal::from_str("1250000.00").unwrap()))
        );
        assert_eq!(
            parse_amount("EUR500"),
            Some(("EUR".to_string(), Decimal::from(500)))
        );
        assert_eq!(parse_amount("five hundred dollars"), None);
    }

    #[test]
    fn test_parse_date_layouts() {
        assert_eq!(parse_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15/03/2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15.03.2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15-03-2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15 March 2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15-MAR-2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("March 15, 2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("Mar. 15, 2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("240315"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_parse_date_month_first_fallback() {
        assert_eq!(parse_date("03/25/2024"), Some(date(2024, 3, 25)));
    }

    #[test]
    fn test_parse_date_two_digit_year() {
        assert_eq!(parse_date("15/03/24"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15.03.24"), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date("32/13/2024"), None);
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(
            parse_quantity("2,450.5 KGS"),
            Some((Decimal::from_str("2450.5").unwrap(), Some("KGS".to_string())))
        );
        assert_eq!(
            parse_quantity("120 cartons"),
            Some((Decimal::from(120), Some("CARTONS".to_string())))
        );
        assert_eq!(parse_quantity("18"), Some((Decimal::from(18), None)));
    }

    #[test]
    fn test_typed_value_by_kind() {
        assert!(matches!(
            typed_value(FieldKind::Amount, "USD 500.00"),
            Some(TypedValue::Amount { .. })
        ));
        assert_eq!(typed_value(FieldKind::Text, "USD 500.00"), None);
        assert_eq!(typed_value(FieldKind::Date, "not a date"), None);
    }
}
