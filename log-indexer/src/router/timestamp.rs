use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::errors::TimestampError;

/// Field holding the event time, in epoch milliseconds.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Extract the event time of a log line.
///
/// The `timestamp` field may be an integer, a float (truncated) or a string of
/// digits. Milliseconds are truncated toward zero to whole seconds.
///
/// # Returns
///
/// * `Ok(DateTime<Utc>)` - The event time
/// * `Err(TimestampError)` - If the line has no usable timestamp
pub fn extract_timestamp(line: &str) -> Result<DateTime<Utc>, TimestampError> {
    let value: Value =
        serde_json::from_str(line).map_err(|e| TimestampError::InvalidJson(e.to_string()))?;

    let field = value
        .as_object()
        .ok_or(TimestampError::NotAnObject)?
        .get(TIMESTAMP_FIELD)
        .ok_or(TimestampError::MissingField)?;

    let millis = timestamp_millis(field)?;
    DateTime::from_timestamp(millis / 1000, 0).ok_or(TimestampError::OutOfRange(millis))
}

fn timestamp_millis(field: &Value) -> Result<i64, TimestampError> {
    match field {
        Value::Number(number) => number
            .as_i64()
            // Floats and integers beyond i64 saturate; out of range values fail in the conversion above.
            .or_else(|| number.as_f64().map(|millis| millis.trunc() as i64))
            .ok_or_else(|| TimestampError::InvalidValue(number.to_string())),
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| TimestampError::InvalidValue(text.clone())),
        other => Err(TimestampError::InvalidValue(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn date_of(line: &str) -> NaiveDate {
        extract_timestamp(line).unwrap().date_naive()
    }

    #[test]
    fn test_integer_millis() {
        // 2024-01-05T10:20:30.123Z
        let timestamp = extract_timestamp(r#"{"timestamp": 1704450030123}"#).unwrap();
        assert_eq!(timestamp.timestamp(), 1704450030);
        assert_eq!(
            timestamp.date_naive(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_string_millis() {
        assert_eq!(
            date_of(r#"{"timestamp": " 1704450030123 "}"#),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_float_millis_are_truncated() {
        let timestamp = extract_timestamp(r#"{"timestamp": 1704450030999.9}"#).unwrap();
        assert_eq!(timestamp.timestamp(), 1704450030);
    }

    #[test]
    fn test_date_is_computed_in_utc() {
        // 2023-12-31T23:59:59.999Z, one millisecond before the new year
        assert_eq!(
            date_of(r#"{"timestamp": 1704067199999}"#),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(date_of(r#"{"timestamp": 1704067200000}"#).year(), 2024);
    }

    #[test]
    fn test_negative_millis_truncate_toward_zero() {
        let timestamp = extract_timestamp(r#"{"timestamp": -1500}"#).unwrap();
        assert_eq!(timestamp.timestamp(), -1);
    }

    #[test]
    fn test_waf_log_line() {
        let line = r#"{"timestamp":1576280412771,"formatVersion":1,"webaclId":"arn:aws:wafv2:ap-southeast-2:111122223333:regional/webacl/STMTest/1EXAMPLE","action":"BLOCK","httpRequest":{"clientIp":"1.1.1.1","country":"AU"}}"#;
        assert_eq!(date_of(line), NaiveDate::from_ymd_opt(2019, 12, 13).unwrap());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            extract_timestamp("not json"),
            Err(TimestampError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(
            extract_timestamp("[1704450030123]"),
            Err(TimestampError::NotAnObject)
        );
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            extract_timestamp(r#"{"time": 1704450030123}"#),
            Err(TimestampError::MissingField)
        );
    }

    #[test]
    fn test_boolean_is_not_a_timestamp() {
        assert_eq!(
            extract_timestamp(r#"{"timestamp": true}"#),
            Err(TimestampError::InvalidValue("true".to_string()))
        );
    }

    #[test]
    fn test_invalid_values() {
        for line in [
            r#"{"timestamp": null}"#,
            r#"{"timestamp": true}"#,
            r#"{"timestamp": "yesterday"}"#,
            r#"{"timestamp": "1.7e12"}"#,
            r#"{"timestamp": {"ms": 1}}"#,
        ] {
            assert!(
                matches!(extract_timestamp(line), Err(TimestampError::InvalidValue(_))),
                "Expected InvalidValue for {}",
                line
            );
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            extract_timestamp(r#"{"timestamp": 9223372036854775807}"#),
            Err(TimestampError::OutOfRange(_))
        ));
    }
}
