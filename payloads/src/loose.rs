//! Lenient numeric parsing for backend data.
//!
//! The booking backend stores prices as whatever the last writer sent:
//! numbers, numeric strings, empty strings, `null`, or nothing at all. These
//! helpers never fail on bad numeric input; they yield `None` or a caller
//! supplied fallback instead.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse decimal text, accepting plain and scientific notation.
///
/// Returns `None` for empty, non-numeric, `NaN` and infinite input.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Parse decimal text, substituting `fallback` when it isn't a number.
pub fn safe_decimal(text: &str, fallback: Decimal) -> Decimal {
    parse_decimal(text).unwrap_or(fallback)
}

/// Interpret a JSON value as a decimal.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// [`safe_decimal`] for JSON values; `null` and non-numeric values give
/// `fallback`.
pub fn loose_decimal(value: &Value, fallback: Decimal) -> Decimal {
    decimal_from_value(value).unwrap_or(fallback)
}

/// `deserialize_with` helper yielding `None` for anything unparseable.
pub fn optional_decimal<'de, D>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

/// `deserialize_with` helper yielding zero for anything unparseable.
pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(loose_decimal(&value, Decimal::ZERO))
}
