//! Date and timezone filters (`date`, `timezone`)
//!
//! `date` accepts unix timestamps and the common textual forms and normalises them to an
//! RFC 3339 string. `timezone` accepts `UTC` or a fixed offset and normalises it to
//! `UTC` / `±HH:MM`.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use sluice::filters::datetime;
//!
//! assert_eq!(
//!     datetime::date(&json!("2024-02-29 13:45:00"), false, Some("+02:00")).unwrap(),
//!     json!("2024-02-29T13:45:00+02:00")
//! );
//! assert_eq!(datetime::timezone(&json!("gmt"), false).unwrap(), json!("UTC"));
//! ```

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde_json::Value;

use super::{trim_blank, Args};
use crate::value::export;
use crate::Error;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Filter to an RFC 3339 timestamp string.
///
/// Naive inputs (no offset of their own) are read in `timezone`, default UTC.
///
/// # Errors
///
/// [`Error::Configuration`] when `timezone` is not a recognised zone, [`Error::Filter`]
/// when the value is not a date.
pub fn date(value: &Value, allow_null: bool, timezone: Option<&str>) -> Result<Value, Error> {
    if allow_null && value.is_null() {
        return Ok(Value::Null);
    }

    let offset = match timezone {
        Some(zone) => parse_zone(zone).ok_or_else(|| {
            Error::configuration(format!("Unknown or bad timezone ({})", zone))
        })?,
        None => utc(),
    };

    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| from_timestamp(secs, offset))
            .ok_or_else(|| Error::filter(format!("Value '{}' is not a valid timestamp", n)))?,
        Value::String(s) if !trim_blank(s).is_empty() => parse_date(trim_blank(s), offset)?,
        other => {
            return Err(Error::filter(format!(
                "Value '{}' is not a non-empty string",
                export(other)
            )))
        }
    };

    Ok(Value::String(parsed.to_rfc3339()))
}

/// Filter to a normalised timezone name.
pub fn timezone(value: &Value, allow_null: bool) -> Result<Value, Error> {
    match value {
        Value::Null if allow_null => Ok(Value::Null),
        Value::String(s) if !trim_blank(s).is_empty() => {
            let zone = trim_blank(s);
            parse_zone(zone)
                .map(|offset| Value::String(zone_name(offset)))
                .ok_or_else(|| Error::filter(format!("Unknown or bad timezone ({})", zone)))
        }
        other => Err(Error::filter(format!(
            "Value '{}' is not a non-empty string",
            export(other)
        ))),
    }
}

/// The `date` alias: `[allowNull, timezone]`.
pub fn date_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    let args = Args::new("date", args);
    date(
        value,
        args.bool(0, "allowNull", false)?,
        args.str(1, "timezone")?,
    )
}

/// The `timezone` alias: `[allowNull]`.
pub fn timezone_args(value: &Value, args: &[Value]) -> Result<Value, Error> {
    timezone(value, Args::new("timezone", args).bool(0, "allowNull", false)?)
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn from_timestamp(secs: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&offset))
}

fn parse_date(s: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>, Error> {
    if let Ok(secs) = s.strip_prefix('@').unwrap_or(s).parse::<i64>() {
        if let Some(parsed) = from_timestamp(secs, offset) {
            return Ok(parsed);
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Ok(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(s) {
        return Ok(parsed);
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        });

    naive
        .and_then(|naive| offset.from_local_datetime(&naive).single())
        .ok_or_else(|| Error::filter(format!("Value '{}' is not a recognised date", s)))
}

fn parse_zone(zone: &str) -> Option<FixedOffset> {
    if ["utc", "gmt", "z"].contains(&zone.to_lowercase().as_str()) {
        return Some(utc());
    }

    let (sign, rest) = match zone.as_bytes().first()? {
        b'+' => (1, &zone[1..]),
        b'-' => (-1, &zone[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 14 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn zone_name(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    if secs == 0 {
        return "UTC".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.abs();
    format!("{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}
