//! Tolerant serde helpers for payloads produced by hand-edited sheets and a
//! loosely typed backend: counts may arrive as numbers, numeric strings or
//! garbage, ids as numbers or strings, dates with or without a time part.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a count the way a spreadsheet cell is read: trimmed integer, or a
/// finite float truncated toward zero. Anything else, including floats
/// outside the `i64` range, is `0`.
pub fn parse_count(raw: &str) -> i64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    trimmed.parse::<f64>().ok().and_then(float_count).unwrap_or(0)
}

fn float_count(f: f64) -> Option<i64> {
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64)
}

/// Coerce an arbitrary JSON value to a count. `null` means "absent".
pub fn coerce_count(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(
            n.as_i64()
                .or_else(|| n.as_f64().and_then(float_count))
                .unwrap_or(0),
        ),
        Value::String(s) => Some(parse_count(s)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Array(_) | Value::Object(_) => Some(0),
    }
}

pub fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_count))
}

/// Accepts `"42"`, `42` or `null` (empty string).
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Date part of an ISO-8601 date or timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5"), 5);
        assert_eq!(parse_count(" 3 "), 3);
        assert_eq!(parse_count("2.9"), 2);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("NaN"), 0);
        assert_eq!(parse_count("1e30"), 0);
        assert_eq!(parse_count("-1e30"), 0);
        assert_eq!(parse_count("1e3"), 1000);
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(&json!(7)), Some(7));
        assert_eq!(coerce_count(&json!("3")), Some(3));
        assert_eq!(coerce_count(&json!("abc")), Some(0));
        assert_eq!(coerce_count(&json!(4.7)), Some(4));
        assert_eq!(coerce_count(&json!(null)), None);
        assert_eq!(coerce_count(&json!([1, 2])), Some(0));
        assert_eq!(coerce_count(&json!(1e30)), Some(0));
        assert_eq!(coerce_count(&json!(u64::MAX)), Some(0));
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert_eq!(parse_date("2024-01-01"), expected);
        assert_eq!(parse_date("2024-01-01T00:00:00.000Z"), expected);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("01-01-2024"), None);
    }
}
