use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::conversions::Value;
use crate::schema::FieldType;

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Conversion from a [`Value`] stored under a column of a known declared type.
///
/// Every implementation is tied to exactly one [`FieldType`]; typed access on a
/// row compares that type with the column's declared type before converting.
pub trait FromValue: Sized {
    /// The declared column type this representation reads.
    const FIELD_TYPE: FieldType;

    /// Converts a non-null value, returning [`None`] if its variant does not fit.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const FIELD_TYPE: FieldType = FieldType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl FromValue for Vec<u8> {
    const FIELD_TYPE: FieldType = FieldType::Bytes;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(b.clone()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const FIELD_TYPE: FieldType = FieldType::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const FIELD_TYPE: FieldType = FieldType::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Timestamps are also accepted as seconds since the Unix epoch, which is how
/// query services commonly ship them on the wire.
impl FromValue for DateTime<Utc> {
    const FIELD_TYPE: FieldType = FieldType::Timestamp;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(t) => Some(*t),
            Value::Integer(secs) => DateTime::from_timestamp(*secs, 0),
            Value::Float(secs) if secs.is_finite() => {
                DateTime::from_timestamp_micros((secs * MICROS_PER_SECOND).round() as i64)
            }
            _ => None,
        }
    }
}

impl FromValue for NaiveDate {
    const FIELD_TYPE: FieldType = FieldType::Date;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl FromValue for NaiveTime {
    const FIELD_TYPE: FieldType = FieldType::Time;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl FromValue for NaiveDateTime {
    const FIELD_TYPE: FieldType = FieldType::DateTime;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}
