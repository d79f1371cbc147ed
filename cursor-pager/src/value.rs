//! Scalar values stored in records, filters, and cursor boundaries.

use std::cmp::Ordering;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scalar value with an explicit kind tag.
///
/// Records map field names to `Value`s, filters compare fields against
/// `Value`s, and cursor boundaries carry the `Value`s of the sort fields.
/// The tag survives the cursor codec, so `Id`, `Timestamp`, and `String`
/// values stay distinguishable after a decode round trip.
///
/// `Array` only appears as a filter operand (for `$in`/`$nin`); stores are
/// expected to produce scalar field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent or explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Unique record identifier.
    Id(Uuid),
    /// Point in time.
    Timestamp(Timestamp),
    /// List of values; filter operand only.
    Array(Vec<Value>),
}

impl Value {
    /// Compare two values of the same kind.
    ///
    /// Returns `None` when the kinds differ, with one exception: `Int` and
    /// `Float` compare against each other numerically, since both are the
    /// "number" kind as far as sort order is concerned. `Array` never
    /// compares. `Float` comparisons involving NaN also return `None`.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Id(a), Self::Id(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Whether this value equals another under [`compare`](Self::compare)
    /// semantics (same kind, or cross-kind numeric equality).
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Whether this value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Id(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from_conversions() {
        let _: Value = 42i64.into();
        let _: Value = 42i32.into();
        let _: Value = 1.234f64.into();
        let _: Value = "hello".into();
        let _: Value = String::from("world").into();
        let _: Value = true.into();
        let _: Value = Uuid::from_u128(7).into();
        let _: Value = Timestamp::UNIX_EPOCH.into();
    }

    #[test]
    fn test_compare_same_kind() {
        assert_eq!(
            Value::Int(1).compare(&Value::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::String("b".into()).compare(&Value::String("a".into())),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::Id(Uuid::from_u128(1)).compare(&Value::Id(Uuid::from_u128(2))),
            Some(Ordering::Less)
        );
        assert_eq!(Value::Null.compare(&Value::Null), Some(Ordering::Equal));
    }

    #[test]
    fn test_compare_numeric_cross_kind() {
        assert_eq!(
            Value::Int(2).compare(&Value::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(3.0).compare(&Value::Int(3)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_compare_mismatched_kinds() {
        assert_eq!(Value::Int(1).compare(&Value::String("1".into())), None);
        assert_eq!(Value::Null.compare(&Value::Bool(false)), None);
        assert_eq!(
            Value::Array(vec![]).compare(&Value::Array(vec![])),
            None
        );
    }

    #[test]
    fn test_compare_nan_is_unordered() {
        assert_eq!(Value::Float(f64::NAN).compare(&Value::Float(1.0)), None);
    }

    #[test]
    fn test_timestamps_order_chronologically() {
        let early = Timestamp::from_second(1_000).unwrap();
        let late = Timestamp::from_second(2_000).unwrap();
        assert_eq!(
            Value::Timestamp(early).compare(&Value::Timestamp(late)),
            Some(Ordering::Less)
        );
    }
}
