//! Date and datetime types.
//!
//! Unparsable text casts to nil rather than failing, like blank text does.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{CastError, Value};

use super::TypeOptions;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

builtin_type!(
    /// Calendar date type.
    DateType,
    "date",
    cast_date
);

builtin_type!(
    /// Date and time type (no zone; zoned input is converted to UTC).
    DateTimeType,
    "datetime",
    cast_datetime
);

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| parse_datetime(text).map(|dt| dt.date()))
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}

fn cast_date(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    let date = match value {
        Value::Date(d) => Some(d),
        Value::DateTime(dt) => Some(dt.date()),
        Value::String(s) => parse_date(s.trim()),
        _ => None,
    };
    Ok(date.map_or(Value::Nil, Value::Date))
}

fn cast_datetime(_options: &TypeOptions, value: Value) -> Result<Value, CastError> {
    let datetime = match value {
        Value::DateTime(dt) => Some(dt),
        Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        Value::String(s) => {
            let text = s.trim();
            parse_datetime(text).or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
        }
        _ => None,
    };
    Ok(datetime.map_or(Value::Nil, Value::DateTime))
}
