//! Runtime JSON parsing for Mongo-style filters.
//!
//! Parse user-provided JSON into a [`FilterExpr`] at runtime. This is the
//! usual way a caller turns an HTTP request body into the base query handed
//! to [`find`](crate::find).
//!
//! # Quick Start
//!
//! ```
//! use cursor_pager::parse_filter;
//!
//! let filter = parse_filter(r#"{"name": "Alice", "age": {"$gte": 18}}"#).unwrap();
//! ```
//!
//! # Supported Syntax
//!
//! | Syntax | Example |
//! |--------|---------|
//! | Implicit `$eq` | `{"name": "Alice"}` |
//! | Explicit operator | `{"age": {"$gte": 18}}` |
//! | Multiple fields | `{"a": 1, "b": 2}` (implicit AND) |
//! | `$and` | `{"$and": [{...}, {...}]}` |
//! | `$or` | `{"$or": [{...}, {...}]}` |
//! | `$not` | `{"$not": {...}}` |
//! | `$in` / `$nin` | `{"status": {"$in": ["a", "b"]}}` |
//! | `$exists` | `{"deleted_at": {"$exists": false}}` |
//!
//! JSON has no identifier or timestamp literal, so parsed operands are
//! never `Value::Id` or `Value::Timestamp`; filters over such fields are
//! built programmatically with [`simple`](crate::simple).

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::types::{CompoundFilter, Filter, FilterExpr, Operator};
use crate::value::Value;

/// Error type for JSON filter parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Invalid JSON syntax or encoding.
    #[error("invalid JSON syntax or encoding")]
    InvalidJson,
    /// Unknown operator (e.g. `$foo`).
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    /// Expected an object but got something else.
    #[error("expected JSON object")]
    ExpectedObject,
    /// Expected an array but got something else.
    #[error("expected JSON array")]
    ExpectedArray,
    /// Expected a value but got something else.
    #[error("expected a value")]
    ExpectedValue,
    /// Field name is empty.
    #[error("field name cannot be empty")]
    EmptyFieldName,
    /// Filter object is empty.
    #[error("filter object cannot be empty")]
    EmptyFilter,
    /// Invalid operator value type.
    #[error("operator '{op}' expects {expected}")]
    InvalidOperatorValue {
        /// The operator that had the wrong value type.
        op: String,
        /// Description of what was expected.
        expected: &'static str,
    },
}

/// Parse a Mongo-style filter from a JSON string.
///
/// # Example
///
/// ```
/// use cursor_pager::parse_filter;
///
/// let filter = parse_filter(r#"{
///     "status": {"$in": ["active", "pending"]},
///     "age": {"$gte": 18}
/// }"#).unwrap();
///
/// let filter = parse_filter(r#"{
///     "$or": [
///         {"role": "admin"},
///         {"role": "moderator"}
///     ]
/// }"#).unwrap();
/// ```
pub fn parse_filter(json_str: &str) -> Result<FilterExpr, ParseError> {
    FilterExpr::parse(json_str)
}

/// Parse a Mongo-style filter from JSON bytes.
///
/// Convenience function for parsing raw request bodies.
pub fn parse_filter_bytes(bytes: &[u8]) -> Result<FilterExpr, ParseError> {
    FilterExpr::parse_bytes(bytes)
}

impl Operator {
    /// Parse from a Mongo-style operator string (e.g. `"$eq"`, `"$gte"`).
    ///
    /// Accepts both with and without the `$` prefix.
    #[must_use]
    pub fn from_mongo(s: &str) -> Option<Self> {
        let s = s.strip_prefix('$').unwrap_or(s);

        match s {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            "nin" => Some(Self::NotIn),
            "exists" => Some(Self::Exists),
            _ => None,
        }
    }
}

impl Value {
    /// Convert from a JSON value; objects are not valid filter operands.
    #[must_use]
    pub fn from_json(json: &JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => Some(Self::Null),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            JsonValue::String(s) => Some(Self::String(s.clone())),
            JsonValue::Array(arr) => {
                let values: Option<Vec<Self>> = arr.iter().map(Self::from_json).collect();
                values.map(Self::Array)
            }
            JsonValue::Object(_) => None,
        }
    }
}

impl FilterExpr {
    /// Parse a Mongo-style filter from a JSON string.
    pub fn parse(json_str: &str) -> Result<Self, ParseError> {
        let json: JsonValue =
            serde_json::from_str(json_str).map_err(|_| ParseError::InvalidJson)?;
        Self::from_json(&json)
    }

    /// Parse a Mongo-style filter from JSON bytes.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let s = std::str::from_utf8(bytes).map_err(|_| ParseError::InvalidJson)?;
        Self::parse(s)
    }

    /// Parse a Mongo-style filter from a parsed JSON value.
    pub fn from_json(json: &JsonValue) -> Result<Self, ParseError> {
        let JsonValue::Object(obj) = json else {
            return Err(ParseError::ExpectedObject);
        };

        if obj.is_empty() {
            return Err(ParseError::EmptyFilter);
        }

        let mut filters = Vec::new();

        for (key, value) in obj {
            if key.is_empty() {
                return Err(ParseError::EmptyFieldName);
            }

            if key.starts_with('$') {
                match key.as_str() {
                    "$and" => {
                        let exprs = parse_filter_array(value)?;
                        filters.push(Self::Compound(CompoundFilter::and(exprs)));
                    }
                    "$or" => {
                        let exprs = parse_filter_array(value)?;
                        filters.push(Self::Compound(CompoundFilter::or(exprs)));
                    }
                    "$not" => {
                        let inner = Self::from_json(value)?;
                        filters.push(Self::Compound(CompoundFilter::not(inner)));
                    }
                    _ => return Err(ParseError::UnknownOperator(key.clone())),
                }
            } else {
                filters.push(parse_field_filter(key, value)?);
            }
        }

        // Combine multiple filters with implicit AND
        Ok(match filters.len() {
            0 => return Err(ParseError::EmptyFilter),
            1 => filters.remove(0),
            _ => Self::Compound(CompoundFilter::and(filters)),
        })
    }
}

/// Parse an array of filter expressions (for $and/$or).
fn parse_filter_array(json: &JsonValue) -> Result<Vec<FilterExpr>, ParseError> {
    let JsonValue::Array(arr) = json else {
        return Err(ParseError::ExpectedArray);
    };

    arr.iter().map(FilterExpr::from_json).collect()
}

/// Parse a field filter: `{"$op": value}` or just `value` (implicit $eq).
fn parse_field_filter(field: &str, value: &JsonValue) -> Result<FilterExpr, ParseError> {
    if let JsonValue::Object(obj) = value {
        if let Some((op_key, op_value)) = obj.iter().next()
            && op_key.starts_with('$')
        {
            let op = Operator::from_mongo(op_key)
                .ok_or_else(|| ParseError::UnknownOperator(op_key.clone()))?;

            let val = parse_operator_value(op, op_value)?;

            return Ok(FilterExpr::Simple(Filter {
                field: field.to_string(),
                op,
                value: val,
            }));
        }
        // Not an operator object, treat as error
        return Err(ParseError::ExpectedValue);
    }

    // Implicit $eq
    let val = Value::from_json(value).ok_or(ParseError::ExpectedValue)?;
    Ok(FilterExpr::Simple(Filter {
        field: field.to_string(),
        op: Operator::Eq,
        value: val,
    }))
}

/// Parse the value for an operator, with type validation.
fn parse_operator_value(op: Operator, value: &JsonValue) -> Result<Value, ParseError> {
    match op {
        // Array operators require arrays
        Operator::In | Operator::NotIn => match value {
            JsonValue::Array(arr) => {
                let values: Option<Vec<Value>> = arr.iter().map(Value::from_json).collect();
                values
                    .map(Value::Array)
                    .ok_or_else(|| ParseError::InvalidOperatorValue {
                        op: "$in/$nin".to_string(),
                        expected: "array of values",
                    })
            }
            _ => Err(ParseError::InvalidOperatorValue {
                op: "$in/$nin".to_string(),
                expected: "array",
            }),
        },

        // Presence checks take a boolean
        Operator::Exists => match value {
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(ParseError::InvalidOperatorValue {
                op: "$exists".to_string(),
                expected: "boolean",
            }),
        },

        // All other operators accept scalar values
        _ => Value::from_json(value).ok_or(ParseError::ExpectedValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::LogicalOp;

    #[test]
    fn test_operator_from_mongo() {
        assert_eq!(Operator::from_mongo("$eq"), Some(Operator::Eq));
        assert_eq!(Operator::from_mongo("$ne"), Some(Operator::Ne));
        assert_eq!(Operator::from_mongo("$gt"), Some(Operator::Gt));
        assert_eq!(Operator::from_mongo("$gte"), Some(Operator::Gte));
        assert_eq!(Operator::from_mongo("$lt"), Some(Operator::Lt));
        assert_eq!(Operator::from_mongo("$lte"), Some(Operator::Lte));
        assert_eq!(Operator::from_mongo("$in"), Some(Operator::In));
        assert_eq!(Operator::from_mongo("$nin"), Some(Operator::NotIn));
        assert_eq!(Operator::from_mongo("$exists"), Some(Operator::Exists));
    }

    #[test]
    fn test_operator_from_mongo_without_prefix() {
        assert_eq!(Operator::from_mongo("eq"), Some(Operator::Eq));
        assert_eq!(Operator::from_mongo("gte"), Some(Operator::Gte));
    }

    #[test]
    fn test_operator_from_mongo_unknown() {
        assert_eq!(Operator::from_mongo("$unknown"), None);
        assert_eq!(Operator::from_mongo("$regex"), None);
    }

    #[test]
    fn test_simple_equality() {
        let filter = parse_filter(r#"{"name": "Alice"}"#).unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Simple(Filter {
                ref field,
                op: Operator::Eq,
                value: Value::String(ref s),
            }) if field == "name" && s == "Alice"
        ));
    }

    #[test]
    fn test_explicit_operator() {
        let filter = parse_filter(r#"{"age": {"$gte": 18}}"#).unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Simple(Filter {
                ref field,
                op: Operator::Gte,
                value: Value::Int(18),
            }) if field == "age"
        ));
    }

    #[test]
    fn test_float_operand() {
        let filter = parse_filter(r#"{"score": {"$lt": 1.5}}"#).unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Simple(Filter {
                op: Operator::Lt,
                value: Value::Float(_),
                ..
            })
        ));
    }

    #[test]
    fn test_multiple_fields_implicit_and() {
        let filter = parse_filter(r#"{"name": "Alice", "age": 30}"#).unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Compound(CompoundFilter {
                op: LogicalOp::And,
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_logical_operators() {
        let filter = parse_filter(r#"{"$and": [{"name": "Alice"}, {"age": 30}]}"#).unwrap();
        assert!(matches!(
            filter,
            FilterExpr::Compound(CompoundFilter {
                op: LogicalOp::And,
                ..
            })
        ));

        let filter =
            parse_filter(r#"{"$or": [{"status": "active"}, {"status": "pending"}]}"#).unwrap();
        assert!(matches!(
            filter,
            FilterExpr::Compound(CompoundFilter {
                op: LogicalOp::Or,
                ..
            })
        ));

        let filter = parse_filter(r#"{"$not": {"deleted": true}}"#).unwrap();
        assert!(matches!(
            filter,
            FilterExpr::Compound(CompoundFilter {
                op: LogicalOp::Not,
                ..
            })
        ));
    }

    #[test]
    fn test_in_operator() {
        let filter = parse_filter(r#"{"status": {"$in": ["a", "b", "c"]}}"#).unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Simple(Filter {
                op: Operator::In,
                value: Value::Array(ref arr),
                ..
            }) if arr.len() == 3
        ));
    }

    #[test]
    fn test_exists_operator() {
        let filter = parse_filter(r#"{"deleted_at": {"$exists": false}}"#).unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Simple(Filter {
                op: Operator::Exists,
                value: Value::Bool(false),
                ..
            })
        ));
    }

    #[test]
    fn test_nested_logical() {
        let filter = parse_filter(
            r#"{"$and": [{"active": true}, {"$or": [{"role": "admin"}, {"role": "mod"}]}]}"#,
        )
        .unwrap();

        assert!(matches!(
            filter,
            FilterExpr::Compound(CompoundFilter {
                op: LogicalOp::And,
                ..
            })
        ));
    }

    #[test]
    fn test_error_invalid_json() {
        assert_eq!(parse_filter("not json"), Err(ParseError::InvalidJson));
        assert_eq!(
            parse_filter_bytes(&[0xff, 0xfe]),
            Err(ParseError::InvalidJson)
        );
    }

    #[test]
    fn test_error_not_object() {
        assert_eq!(parse_filter("[1, 2, 3]"), Err(ParseError::ExpectedObject));
    }

    #[test]
    fn test_error_empty_filter() {
        assert_eq!(parse_filter("{}"), Err(ParseError::EmptyFilter));
    }

    #[test]
    fn test_error_unknown_operator() {
        assert!(matches!(
            parse_filter(r#"{"field": {"$foo": 1}}"#),
            Err(ParseError::UnknownOperator(_))
        ));
        assert!(matches!(
            parse_filter(r#"{"$xor": []}"#),
            Err(ParseError::UnknownOperator(_))
        ));
    }

    #[test]
    fn test_error_in_not_array() {
        assert!(matches!(
            parse_filter(r#"{"status": {"$in": "not-array"}}"#),
            Err(ParseError::InvalidOperatorValue { .. })
        ));
    }

    #[test]
    fn test_error_exists_not_bool() {
        assert!(matches!(
            parse_filter(r#"{"field": {"$exists": 1}}"#),
            Err(ParseError::InvalidOperatorValue { .. })
        ));
    }
}
