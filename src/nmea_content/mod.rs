//! # NMEA Content
//!
//! The structured side of the codec: [`Record`] and [`Value`], the field codec
//! and the built-in sentence definitions.
//!
//! A record is an ordered map from field name to value. There is no universal
//! schema; which fields are present depends on the sentence type. Decoded
//! records always carry a `sentence` field holding the 5-character identifier.

pub mod field;
pub mod sentences;

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// A single field value of a [`Record`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Decimal number
    Float(f64),
    /// Integer number
    Int(i64),
    /// Text or single-letter indicator
    Text(String),
    /// UTC time of day
    Time(time::Time),
    /// UTC calendar date
    Date(time::Date),
    /// Full timestamp
    DateTime(time::OffsetDateTime),
    /// Ordered list, e.g. satellite PRNs
    List(Vec<Value>),
    /// Nested record, e.g. one satellite in view
    Record(Record),
}

impl Value {
    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the value as an integer. Floats are not narrowed.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

macro_rules! impl_value_from {
    ($($t:ty => $variant:ident),* $(,)?) => ($(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::$variant(value.into())
            }
        }
    )*)
}

impl_value_from!(
    f64 => Float,
    f32 => Float,
    i64 => Int,
    i32 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    String => Text,
    &str => Text,
    char => Text,
    time::Time => Time,
    time::Date => Date,
    time::OffsetDateTime => DateTime,
    Vec<Value> => List,
    Record => Record,
);

/// Structured field data of one sentence.
///
/// ```rust
/// use nmea0183_codec::Record;
///
/// let record = Record::new()
///     .with("latitude", 52.537525)
///     .with("satellites", 12)
///     .with("fix_type", "fix");
///
/// assert_eq!(record.get_f64("latitude"), Ok(Some(52.537525)));
/// assert_eq!(record.get_i64("satellites"), Ok(Some(12)));
/// assert_eq!(record.get_str("fix_type"), Ok(Some("fix")));
/// assert_eq!(record.get_f64("altitude"), Ok(None));
/// assert!(record.get_f64("fix_type").is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field, returning the value it replaced.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Inserts a field only when `value` is present.
    pub fn insert_opt(&mut self, field: impl Into<String>, value: Option<impl Into<Value>>) {
        if let Some(value) = value {
            self.insert(field, value);
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Reads a numeric field. Integers are widened to floats.
    pub fn get_f64(&self, field: &str) -> Result<Option<f64>, Error> {
        self.typed(field, "a number", Value::as_f64)
    }

    /// Reads an integer field. Floats with no fractional part are accepted.
    pub fn get_i64(&self, field: &str) -> Result<Option<i64>, Error> {
        self.typed(field, "an integer", |value| match value {
            Value::Int(value) => Some(*value),
            Value::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        })
    }

    pub fn get_str(&self, field: &str) -> Result<Option<&str>, Error> {
        self.typed(field, "text", Value::as_str)
    }

    /// Reads a time of day, taking it from a full timestamp when needed.
    pub fn get_time(&self, field: &str) -> Result<Option<time::Time>, Error> {
        self.typed(field, "a time or timestamp", |value| match value {
            Value::Time(time) => Some(*time),
            Value::DateTime(timestamp) => Some(timestamp.to_offset(time::UtcOffset::UTC).time()),
            _ => None,
        })
    }

    /// Reads a date, taking it from a full timestamp when needed.
    pub fn get_date(&self, field: &str) -> Result<Option<time::Date>, Error> {
        self.typed(field, "a date or timestamp", |value| match value {
            Value::Date(date) => Some(*date),
            Value::DateTime(timestamp) => Some(timestamp.to_offset(time::UtcOffset::UTC).date()),
            _ => None,
        })
    }

    pub fn get_datetime(&self, field: &str) -> Result<Option<time::OffsetDateTime>, Error> {
        self.typed(field, "a timestamp", |value| match value {
            Value::DateTime(timestamp) => Some(*timestamp),
            _ => None,
        })
    }

    pub fn get_list(&self, field: &str) -> Result<Option<&[Value]>, Error> {
        self.typed(field, "a list", |value| match value {
            Value::List(values) => Some(values.as_slice()),
            _ => None,
        })
    }

    fn typed<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        f: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>, Error> {
        match self.0.get(field) {
            None => Ok(None),
            Some(value) => f(value).map(Some).ok_or_else(|| Error::InvalidField {
                field: field.into(),
                expected,
            }),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn test_record_time_from_timestamp() {
        let record = Record::new().with("timestamp", datetime!(2016-12-25 21:59:09.285 UTC));

        assert_eq!(record.get_time("timestamp"), Ok(Some(time!(21:59:09.285))));
        assert_eq!(record.get_date("timestamp"), Ok(Some(date!(2016 - 12 - 25))));
        assert!(record.get_datetime("timestamp").unwrap().is_some());
    }

    #[test]
    fn test_record_timestamp_is_converted_to_utc() {
        let record = Record::new().with("timestamp", datetime!(2016-12-26 00:59:09 +03:00));

        assert_eq!(record.get_time("timestamp"), Ok(Some(time!(21:59:09))));
        assert_eq!(record.get_date("timestamp"), Ok(Some(date!(2016 - 12 - 25))));
    }

    #[test]
    fn test_record_wrong_type() {
        let record = Record::new().with("satellites", 1.5).with("status", "valid");

        assert_eq!(
            record.get_i64("satellites"),
            Err(Error::InvalidField {
                field: "satellites".into(),
                expected: "an integer",
            })
        );
        assert!(record.get_time("status").is_err());
        assert!(record.get_list("status").is_err());
    }

    #[test]
    fn test_record_integral_float_as_int() {
        let record = Record::new().with("satellites", 12.0);
        assert_eq!(record.get_i64("satellites"), Ok(Some(12)));
    }
}
