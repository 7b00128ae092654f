use crate::result_set::Row;
use crate::value::Value;
use chrono::{DateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::str::FromStr;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

impl Value {
    /// Canonical form of a single value.
    ///
    /// Numerics become plain decimal text, temporal values become ISO-8601
    /// text in UTC with millisecond precision, everything else is unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        match self {
            Self::Integer(v) => Self::Decimal(v.to_string()),
            Self::Float(v) => Self::Decimal(canonical_float(*v)),
            Self::Decimal(v) => Self::Decimal(canonical_decimal(v)),
            Self::Timestamp(v) => Self::Text(utc_text(v)),
            Self::Date(v) => Self::Text(utc_text(&v.and_time(NaiveTime::MIN).and_utc())),
            Self::Time(v) => Self::Text(v.format(TIME_FORMAT).to_string()),
            other @ (Self::Null | Self::Boolean(_) | Self::Text(_)) => other.clone(),
        }
    }
}

fn utc_text<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    value
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Plain decimal text without exponent or trailing fractional zeros.
///
/// Text that is not a number is returned as is.
#[must_use]
pub fn canonical_decimal(text: &str) -> String {
    let trimmed = text.trim();
    if let Some(plain) = trim_plain_number(trimmed) {
        return plain;
    }
    Decimal::from_scientific(trimmed)
        .or_else(|_| Decimal::from_str(trimmed))
        .map_or_else(|_| text.to_string(), |d| d.normalize().to_string())
}

fn canonical_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    // f64 Display never uses an exponent
    let display = format!("{value}");
    trim_plain_number(&display).unwrap_or(display)
}

/// Strips redundant zeros from `[+-]digits[.digits]` text without going
/// through a fixed precision type, so every digit survives.
fn trim_plain_number(text: &str) -> Option<String> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let int = match int.trim_start_matches('0') {
        "" => "0",
        digits => digits,
    };
    let frac = frac.trim_end_matches('0');
    let body = if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    };
    Some(if negative && body != "0" {
        format!("-{body}")
    } else {
        body
    })
}

/// Row with sorted column names and normalized values.
#[must_use]
pub fn normalize_row(row: &Row) -> Row {
    let mut entries: Vec<(String, Value)> = row
        .iter()
        .map(|(column, value)| (column.clone(), value.normalized()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().collect()
}

/// Canonical comparable string of a row: a JSON object with sorted keys and
/// normalized values.
#[must_use]
pub fn canonical_row(row: &Row) -> String {
    let normalized = normalize_row(row);
    let body = normalized
        .iter()
        .map(|(column, value)| {
            format!(
                "{}:{}",
                JsonValue::String(column.clone()),
                JsonValue::from(value.clone())
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{body}}}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn decimal_text_is_canonical() {
        assert_eq!(canonical_decimal("100.00"), "100");
        assert_eq!(canonical_decimal("100.0"), "100");
        assert_eq!(canonical_decimal("0.50"), "0.5");
        assert_eq!(canonical_decimal("-0.000"), "0");
        assert_eq!(canonical_decimal("1.5e3"), "1500");
        assert_eq!(canonical_decimal("abc"), "abc");
        assert_eq!(canonical_decimal("+.50"), "0.5");
        assert_eq!(canonical_decimal("-"), "-");
    }

    #[test]
    fn numeric_kinds_conflate() {
        let expected = Value::Decimal("100".to_string());
        assert_eq!(Value::Integer(100).normalized(), expected);
        assert_eq!(Value::Float(100.0).normalized(), expected);
        assert_eq!(Value::Decimal("100.00".to_string()).normalized(), expected);
        assert_eq!(Value::Float(-0.0).normalized(), Value::Decimal("0".to_string()));
        assert_eq!(Value::Float(2.25).normalized(), Value::Decimal("2.25".to_string()));
    }

    #[test]
    fn tiny_values_keep_every_digit() {
        assert_ne!(Value::Float(1e-30).normalized(), Value::Float(0.0).normalized());
        assert_ne!(
            Value::Float(1.2345e-25).normalized(),
            Value::Float(1.2346e-25).normalized()
        );
        assert_eq!(
            Value::Float(-1e-30).normalized(),
            Value::Decimal(format!("-0.{}1", "0".repeat(29)))
        );
        let long = format!("0.{}42000", "0".repeat(40));
        assert_eq!(canonical_decimal(&long), format!("0.{}42", "0".repeat(40)));
    }

    #[test]
    fn temporal_values_become_utc_text() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T10:00:00+02:00").unwrap();
        assert_eq!(
            Value::Timestamp(ts).normalized(),
            Value::Text("2024-03-01T08:00:00.000Z".to_string())
        );
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            Value::Date(date).normalized(),
            Value::Text("2024-03-01T00:00:00.000Z".to_string())
        );
        let time = NaiveTime::from_hms_milli_opt(9, 5, 7, 250).unwrap();
        assert_eq!(
            Value::Time(time).normalized(),
            Value::Text("09:05:07.250".to_string())
        );
    }

    #[test]
    fn canonical_row_sorts_keys() {
        let row = Row::new()
            .with("name", "Alice")
            .with("id", 1)
            .with("active", true)
            .with("note", Value::Null);
        assert_eq!(
            canonical_row(&row),
            r#"{"active":true,"id":"1","name":"Alice","note":null}"#
        );
    }

    #[test]
    fn canonical_row_escapes_keys_and_text() {
        let row = Row::new().with("a\"b", "line\nbreak");
        assert_eq!(canonical_row(&row), r#"{"a\"b":"line\nbreak"}"#);
    }
}
