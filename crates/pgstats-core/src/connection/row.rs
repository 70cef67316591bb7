//! Driver-neutral result rows.
//!
//! Connections hand rows back as [`StatsRow`]: an ordered list of named
//! [`Value`]s. Records are decoded from it through [`FromStatsRow`], one typed
//! column at a time, so the same decoding code runs against a real server and
//! against [`MockConnection`](super::MockConnection).

use std::net::IpAddr;

use chrono::{DateTime, Utc};

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Inet(IpAddr),
    /// WAL position (`pg_lsn`).
    Lsn(u64),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::Inet(_) => "inet",
            Value::Lsn(_) => "pg_lsn",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<IpAddr> for Value {
    fn from(v: IpAddr) -> Self {
        Value::Inet(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Error raised when a row cannot be decoded into a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("column {0:?} not present in result")]
    MissingColumn(String),
    #[error("column {column:?}: expected {expected}, found {found}")]
    WrongType {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("column {column:?}: {value} does not fit into {expected}")]
    OutOfRange {
        column: String,
        value: i64,
        expected: &'static str,
    },
}

fn wrong_type(column: &str, expected: &'static str, value: &Value) -> DecodeError {
    DecodeError::WrongType {
        column: column.to_string(),
        expected,
        found: value.kind(),
    }
}

/// Conversion from a [`Value`] into a Rust scalar.
pub trait FromValue: Sized {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError>;
}

impl FromValue for bool {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(v) => Ok(*v),
            other => Err(wrong_type(column, "bool", other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Int(v) => Ok(*v),
            other => Err(wrong_type(column, "i64", other)),
        }
    }
}

macro_rules! narrow_int {
    ($ty:ty) => {
        impl FromValue for $ty {
            fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
                match value {
                    Value::Int(v) => <$ty>::try_from(*v).map_err(|_| DecodeError::OutOfRange {
                        column: column.to_string(),
                        value: *v,
                        expected: stringify!($ty),
                    }),
                    other => Err(wrong_type(column, stringify!($ty), other)),
                }
            }
        }
    };
}

narrow_int!(i32);
narrow_int!(u32);

impl FromValue for f64 {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            other => Err(wrong_type(column, "f64", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            other => Err(wrong_type(column, "text", other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Timestamp(v) => Ok(*v),
            other => Err(wrong_type(column, "timestamp", other)),
        }
    }
}

impl FromValue for IpAddr {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Inet(v) => Ok(*v),
            other => Err(wrong_type(column, "inet", other)),
        }
    }
}

impl FromValue for u64 {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Lsn(v) => Ok(*v),
            other => Err(wrong_type(column, "pg_lsn", other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(column: &str, value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(column, other).map(Some),
        }
    }
}

/// One result row: column names paired with values, in select-list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRow {
    columns: Vec<(String, Value)>,
}

impl StatsRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value);
        self
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((column.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in select-list order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn value(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Decodes a column that every variant of the view selects.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T, DecodeError> {
        let value = self
            .value(column)
            .ok_or_else(|| DecodeError::MissingColumn(column.to_string()))?;
        T::from_value(column, value)
    }

    /// Decodes a column that only some variants select.
    ///
    /// Yields `None` both for SQL NULL and for a column the variant left out.
    pub fn get_opt<T: FromValue>(&self, column: &str) -> Result<Option<T>, DecodeError> {
        match self.value(column) {
            Some(value) => Option::<T>::from_value(column, value),
            None => Ok(None),
        }
    }
}

/// Decodes a record from one row of its view.
pub trait FromStatsRow: Sized {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StatsRow {
        StatsRow::new()
            .with("pid", 4242)
            .with("datname", "app")
            .with("idx_scan", Option::<i64>::None)
            .with("blk_read_time", 12)
            .with("huge", i64::MAX)
    }

    #[test]
    fn get_decodes_present_columns() {
        let row = sample();
        assert_eq!(row.get::<i32>("pid").unwrap(), 4242);
        assert_eq!(row.get::<String>("datname").unwrap(), "app");
        assert_eq!(row.get::<Option<i64>>("idx_scan").unwrap(), None);
    }

    #[test]
    fn get_reports_missing_column() {
        let err = sample().get::<i64>("seq_scan").unwrap_err();
        assert_eq!(err, DecodeError::MissingColumn("seq_scan".into()));
    }

    #[test]
    fn null_into_mandatory_field_is_wrong_type() {
        let err = sample().get::<i64>("idx_scan").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::WrongType {
                found: "null",
                ..
            }
        ));
    }

    #[test]
    fn narrowing_checks_range() {
        let err = sample().get::<i32>("huge").unwrap_err();
        assert!(matches!(err, DecodeError::OutOfRange { expected: "i32", .. }));
        assert!(sample().get::<u32>("huge").is_err());
    }

    #[test]
    fn float_accepts_integers() {
        assert_eq!(sample().get::<f64>("blk_read_time").unwrap(), 12.0);
    }

    #[test]
    fn get_opt_treats_absent_column_as_none() {
        let row = sample();
        assert_eq!(row.get_opt::<String>("wait_event").unwrap(), None);
        assert_eq!(row.get_opt::<i64>("idx_scan").unwrap(), None);
        assert_eq!(row.get_opt::<i32>("pid").unwrap(), Some(4242));
    }

    #[test]
    fn get_opt_still_rejects_wrong_types() {
        assert!(sample().get_opt::<bool>("datname").is_err());
    }

    #[test]
    fn column_names_keep_select_order() {
        let row = sample();
        let names: Vec<&str> = row.column_names().collect();
        assert_eq!(names, ["pid", "datname", "idx_scan", "blk_read_time", "huge"]);
    }
}
