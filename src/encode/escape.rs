//! MySQL string-literal escaping and per-value rendering.

use chrono::Timelike;

use crate::types::DbValue;

/// Append `raw` as a double-quoted MySQL string literal, escaping per the
/// server's backslash conventions.
pub(crate) fn push_escaped_quoted(out: &mut String, raw: &str) {
    out.push('"');
    escape_into(out, raw);
    out.push('"');
}

/// Append one argument value as SQL literal text.
pub(crate) fn push_value(out: &mut String, value: &DbValue) {
    match value {
        DbValue::Null => out.push_str("NULL"),
        DbValue::Int(i) => push_plain_quoted(out, &i.to_string()),
        DbValue::UInt(u) => push_plain_quoted(out, &u.to_string()),
        DbValue::Float(f) => push_plain_quoted(out, &f.to_string()),
        DbValue::Bool(b) => push_plain_quoted(out, if *b { "1" } else { "0" }),
        DbValue::Text(s) => push_escaped_quoted(out, s),
        DbValue::Bytes(b) => push_hex(out, b),
        DbValue::Timestamp(ts) => {
            // Fractional seconds only when present; MySQL accepts both forms.
            let rendered = if ts.nanosecond() == 0 {
                ts.format("%Y-%m-%d %H:%M:%S").to_string()
            } else {
                ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
            };
            push_plain_quoted(out, &rendered);
        }
        DbValue::Json(v) => push_escaped_quoted(out, &v.to_string()),
    }
}

// For renderings known to contain no quotable characters.
fn push_plain_quoted(out: &mut String, rendered: &str) {
    out.push('"');
    out.push_str(rendered);
    out.push('"');
}

/// Hexadecimal literal (`X'4142'`). Arbitrary bytes cannot travel inside a
/// quoted text literal because the query string itself must stay UTF-8.
fn push_hex(out: &mut String, bytes: &[u8]) {
    out.push_str("X'");
    for &byte in bytes {
        let hi = char::from_digit(u32::from(byte >> 4), 16);
        let lo = char::from_digit(u32::from(byte & 0x0f), 16);
        if let (Some(hi), Some(lo)) = (hi, lo) {
            out.push(hi.to_ascii_uppercase());
            out.push(lo.to_ascii_uppercase());
        }
    }
    out.push('\'');
}

fn escape_into(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\u{1a}' => out.push_str("\\Z"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(value: &DbValue) -> String {
        let mut out = String::new();
        push_value(&mut out, value);
        out
    }

    #[test]
    fn scalars_render_as_quoted_literals() {
        assert_eq!(rendered(&DbValue::Int(12)), r#""12""#);
        assert_eq!(rendered(&DbValue::UInt(7)), r#""7""#);
        assert_eq!(rendered(&DbValue::Float(1.5)), r#""1.5""#);
        assert_eq!(rendered(&DbValue::Bool(true)), r#""1""#);
        assert_eq!(rendered(&DbValue::Bool(false)), r#""0""#);
        assert_eq!(rendered(&DbValue::Text("abc".into())), r#""abc""#);
    }

    #[test]
    fn null_renders_unquoted() {
        assert_eq!(rendered(&DbValue::Null), "NULL");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(rendered(&DbValue::Text(r#"a"b"#.into())), r#""a\"b""#);
        assert_eq!(rendered(&DbValue::Text("a'b".into())), r#""a\'b""#);
        assert_eq!(rendered(&DbValue::Text(r"a\b".into())), r#""a\\b""#);
    }

    #[test]
    fn control_characters_are_escaped() {
        assert_eq!(
            rendered(&DbValue::Text("a\0b\nc\rd\u{1a}e".into())),
            r#""a\0b\nc\rd\Ze""#
        );
    }

    #[test]
    fn bytes_render_as_hex_literal() {
        assert_eq!(rendered(&DbValue::Bytes(vec![0x41, 0x00, 0xff])), "X'4100FF'");
        assert_eq!(rendered(&DbValue::Bytes(vec![])), "X''");
    }

    #[test]
    fn timestamps_render_in_server_format() {
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .expect("valid timestamp");
        assert_eq!(rendered(&DbValue::Timestamp(dt)), r#""2024-03-01 10:30:00""#);

        let with_micros = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_micro_opt(10, 30, 0, 250))
            .expect("valid timestamp");
        assert_eq!(
            rendered(&DbValue::Timestamp(with_micros)),
            r#""2024-03-01 10:30:00.000250""#
        );
    }

    #[test]
    fn json_renders_compact_and_escaped() {
        let value = serde_json::json!({"k": "v"});
        assert_eq!(rendered(&DbValue::Json(value)), r#""{\"k\":\"v\"}""#);
    }
}
