use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that can appear in a result row or be used as query arguments.
///
/// One enum covers the driver's type repertoire so callers never touch driver
/// types directly:
/// ```rust
/// use mysql_session::DbValue;
///
/// let values = vec![
///     DbValue::Int(1),
///     DbValue::Text("alice".into()),
///     DbValue::Null,
/// ];
/// # let _ = values;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    /// NULL value
    Null,
    /// Signed integer (64-bit)
    Int(i64),
    /// Unsigned integer (64-bit)
    UInt(u64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Text/string value
    Text(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// JSON value
    Json(JsonValue),
}

impl DbValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DbValue::Int(value) => Some(*value),
            DbValue::UInt(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            DbValue::UInt(value) => Some(*value),
            DbValue::Int(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DbValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean view. Integer 0/1 cells also qualify, since MySQL stores
    /// BOOLEAN columns as TINYINT.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DbValue::Bool(value) => Some(*value),
            _ => match self.as_int() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let DbValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let DbValue::Bytes(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Timestamp view. Text cells in the server's datetime formats also
    /// qualify.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let DbValue::Timestamp(value) = self {
            return Some(*value);
        }
        let text = self.as_text()?;
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
            return Some(dt);
        }
        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok()
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let DbValue::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

impl From<i64> for DbValue {
    fn from(value: i64) -> Self {
        DbValue::Int(value)
    }
}

impl From<i32> for DbValue {
    fn from(value: i32) -> Self {
        DbValue::Int(i64::from(value))
    }
}

impl From<u64> for DbValue {
    fn from(value: u64) -> Self {
        DbValue::UInt(value)
    }
}

impl From<u32> for DbValue {
    fn from(value: u32) -> Self {
        DbValue::UInt(u64::from(value))
    }
}

impl From<f64> for DbValue {
    fn from(value: f64) -> Self {
        DbValue::Float(value)
    }
}

impl From<bool> for DbValue {
    fn from(value: bool) -> Self {
        DbValue::Bool(value)
    }
}

impl From<&str> for DbValue {
    fn from(value: &str) -> Self {
        DbValue::Text(value.to_string())
    }
}

impl From<String> for DbValue {
    fn from(value: String) -> Self {
        DbValue::Text(value)
    }
}

impl From<NaiveDateTime> for DbValue {
    fn from(value: NaiveDateTime) -> Self {
        DbValue::Timestamp(value)
    }
}

impl From<JsonValue> for DbValue {
    fn from(value: JsonValue) -> Self {
        DbValue::Json(value)
    }
}

/// A positional query argument: one scalar, or a list that expands to a
/// comma-separated sequence of literals (for `IN (...)` clauses).
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Substituted as one escaped, quoted literal.
    Single(DbValue),
    /// Substituted as a comma-separated list of escaped, quoted literals.
    List(Vec<DbValue>),
}

impl Param {
    /// Build a list argument from any iterable of convertible values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DbValue>,
    {
        Param::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<DbValue> for Param {
    fn from(value: DbValue) -> Self {
        Param::Single(value)
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Single(value.into())
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Single(value.into())
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Param::Single(value.into())
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Single(value.into())
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Single(value.into())
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Single(value.into())
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Single(value.into())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Single(value.into())
    }
}

impl From<NaiveDateTime> for Param {
    fn from(value: NaiveDateTime) -> Self {
        Param::Single(value.into())
    }
}

impl From<JsonValue> for Param {
    fn from(value: JsonValue) -> Self {
        Param::Single(value.into())
    }
}

impl<T: Into<DbValue>> From<Vec<T>> for Param {
    fn from(values: Vec<T>) -> Self {
        Param::list(values)
    }
}

impl<T: Into<DbValue>, const N: usize> From<[T; N]> for Param {
    fn from(values: [T; N]) -> Self {
        Param::list(values)
    }
}

/// Build an argument vector for the query entry points.
///
/// Scalars become [`Param::Single`]; array expressions become [`Param::List`]:
/// ```rust
/// use mysql_session::prelude::*;
///
/// let params = args![1, "alice", [2, 5, 9]];
/// assert_eq!(params.len(), 3);
/// assert!(matches!(params[2], Param::List(_)));
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Param>::new() };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Param::from($value)),+]
    };
}
