//! Decoding of driver cells into [`DbValue`].
//!
//! Over the text protocol the driver hands back most non-NULL cells as raw
//! bytes; column metadata (type plus unsigned/binary flags) decides the typed
//! representation. Binary-protocol values arrive already typed and map
//! directly. Undecodable cells fall back to `Bytes` rather than erroring.

use chrono::{NaiveDate, NaiveDateTime};
use mysql::Value;
use mysql::consts::{ColumnFlags, ColumnType};

use crate::types::DbValue;

pub(crate) fn decode_cell(value: Value, column: &mysql::Column) -> DbValue {
    match value {
        Value::NULL => DbValue::Null,
        Value::Int(i) => DbValue::Int(i),
        Value::UInt(u) => DbValue::UInt(u),
        Value::Float(f) => DbValue::Float(f64::from(f)),
        Value::Double(d) => DbValue::Float(d),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            decode_date(year, month, day, hour, minute, second, micros)
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            DbValue::Text(render_time(negative, days, hours, minutes, seconds, micros))
        }
        Value::Bytes(bytes) => decode_bytes(bytes, column),
    }
}

fn decode_bytes(bytes: Vec<u8>, column: &mysql::Column) -> DbValue {
    use ColumnType::{
        MYSQL_TYPE_BIT, MYSQL_TYPE_DATE, MYSQL_TYPE_DATETIME, MYSQL_TYPE_DATETIME2,
        MYSQL_TYPE_DECIMAL, MYSQL_TYPE_DOUBLE, MYSQL_TYPE_FLOAT, MYSQL_TYPE_GEOMETRY,
        MYSQL_TYPE_INT24, MYSQL_TYPE_JSON, MYSQL_TYPE_LONG, MYSQL_TYPE_LONGLONG,
        MYSQL_TYPE_NEWDATE, MYSQL_TYPE_NEWDECIMAL, MYSQL_TYPE_SHORT, MYSQL_TYPE_TIMESTAMP,
        MYSQL_TYPE_TIMESTAMP2, MYSQL_TYPE_TINY, MYSQL_TYPE_YEAR,
    };

    match column.column_type() {
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_LONG | MYSQL_TYPE_LONGLONG
        | MYSQL_TYPE_INT24 | MYSQL_TYPE_YEAR => {
            let unsigned = column.flags().contains(ColumnFlags::UNSIGNED_FLAG);
            decode_integer(bytes, unsigned)
        }
        MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL | MYSQL_TYPE_FLOAT | MYSQL_TYPE_DOUBLE => {
            match text_of(&bytes).and_then(|t| t.parse::<f64>().ok()) {
                Some(f) => DbValue::Float(f),
                None => fallback_text(bytes),
            }
        }
        MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE | MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2
        | MYSQL_TYPE_TIMESTAMP | MYSQL_TYPE_TIMESTAMP2 => {
            match text_of(&bytes).and_then(parse_datetime_text) {
                Some(dt) => DbValue::Timestamp(dt),
                // Zero dates and other oddities keep their textual form.
                None => fallback_text(bytes),
            }
        }
        MYSQL_TYPE_JSON => match serde_json::from_slice(&bytes) {
            Ok(json) => DbValue::Json(json),
            Err(_) => fallback_text(bytes),
        },
        MYSQL_TYPE_BIT | MYSQL_TYPE_GEOMETRY => DbValue::Bytes(bytes),
        _ => {
            if column.flags().contains(ColumnFlags::BINARY_FLAG) {
                DbValue::Bytes(bytes)
            } else {
                fallback_text(bytes)
            }
        }
    }
}

fn decode_integer(bytes: Vec<u8>, unsigned: bool) -> DbValue {
    let Some(text) = text_of(&bytes) else {
        return DbValue::Bytes(bytes);
    };
    if unsigned {
        if let Ok(u) = text.parse::<u64>() {
            return DbValue::UInt(u);
        }
    } else if let Ok(i) = text.parse::<i64>() {
        return DbValue::Int(i);
    }
    fallback_text(bytes)
}

fn decode_date(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    micros: u32,
) -> DbValue {
    let datetime = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .and_then(|date| {
            date.and_hms_micro_opt(
                u32::from(hour),
                u32::from(minute),
                u32::from(second),
                micros,
            )
        });
    match datetime {
        Some(dt) => DbValue::Timestamp(dt),
        // 0000-00-00 and friends have no chrono representation.
        None => DbValue::Null,
    }
}

fn parse_datetime_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn render_time(negative: bool, days: u32, hours: u8, minutes: u8, seconds: u8, micros: u32) -> String {
    let total_hours = days * 24 + u32::from(hours);
    let sign = if negative { "-" } else { "" };
    if micros == 0 {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}")
    }
}

fn text_of(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(bytes).ok()
}

fn fallback_text(bytes: Vec<u8>) -> DbValue {
    match String::from_utf8(bytes) {
        Ok(text) => DbValue::Text(text),
        Err(err) => DbValue::Bytes(err.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_values_map_directly() {
        assert_eq!(decode_date(2024, 3, 1, 10, 30, 0, 0), {
            let dt = NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(10, 30, 0))
                .expect("valid timestamp");
            DbValue::Timestamp(dt)
        });
    }

    #[test]
    fn zero_dates_decode_to_null() {
        assert_eq!(decode_date(0, 0, 0, 0, 0, 0, 0), DbValue::Null);
    }

    #[test]
    fn integer_text_parses_by_signedness() {
        assert_eq!(decode_integer(b"-42".to_vec(), false), DbValue::Int(-42));
        assert_eq!(
            decode_integer(b"18446744073709551615".to_vec(), true),
            DbValue::UInt(u64::MAX)
        );
    }

    #[test]
    fn time_cells_render_as_clock_text() {
        assert_eq!(render_time(false, 0, 10, 30, 0, 0), "10:30:00");
        assert_eq!(render_time(true, 1, 2, 0, 5, 0), "-26:00:05");
        assert_eq!(render_time(false, 0, 0, 0, 1, 250), "00:00:01.000250");
    }

    #[test]
    fn datetime_text_parses_with_and_without_fraction() {
        assert!(parse_datetime_text("2024-03-01 10:30:00").is_some());
        assert!(parse_datetime_text("2024-03-01 10:30:00.123456").is_some());
        assert!(parse_datetime_text("2024-03-01").is_some());
        assert!(parse_datetime_text("not a date").is_none());
    }
}
