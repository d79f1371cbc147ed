//! Filter evaluation against records.
//!
//! [`FilterExpr::matches`] defines what a predicate means when applied to a
//! [`Record`]. Stores with native query execution are free to evaluate the
//! AST their own way; this implementation is the reference semantics and
//! backs in-memory stores.

use std::cmp::Ordering;

use super::types::{Filter, FilterExpr, LogicalOp, Operator};
use crate::record::Record;
use crate::value::Value;

impl FilterExpr {
    /// Whether a record satisfies this filter.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Simple(filter) => filter.matches(record),
            Self::Compound(compound) => match compound.op {
                LogicalOp::And => compound.filters.iter().all(|f| f.matches(record)),
                LogicalOp::Or => compound.filters.iter().any(|f| f.matches(record)),
                LogicalOp::Not => !compound.filters.iter().all(|f| f.matches(record)),
            },
        }
    }
}

impl Filter {
    /// Whether a record satisfies this condition.
    ///
    /// A missing field behaves as `Null` for equality and `Exists`, and
    /// never satisfies an ordering operator. Cross-kind comparisons (other
    /// than `Int`/`Float`) never match.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        let field_value = record.get(&self.field);

        match self.op {
            Operator::Eq => eq_matches(field_value, &self.value),
            Operator::Ne => !eq_matches(field_value, &self.value),
            Operator::Gt => ordering_matches(field_value, &self.value, Ordering::is_gt),
            Operator::Gte => ordering_matches(field_value, &self.value, Ordering::is_ge),
            Operator::Lt => ordering_matches(field_value, &self.value, Ordering::is_lt),
            Operator::Lte => ordering_matches(field_value, &self.value, Ordering::is_le),
            Operator::In => in_matches(field_value, &self.value),
            Operator::NotIn => !in_matches(field_value, &self.value),
            Operator::Exists => match self.value {
                Value::Bool(expected) => field_value.is_some() == expected,
                _ => false,
            },
        }
    }
}

fn eq_matches(field_value: Option<&Value>, operand: &Value) -> bool {
    match field_value {
        Some(value) => value.same_as(operand),
        None => operand.is_null(),
    }
}

fn ordering_matches(
    field_value: Option<&Value>,
    operand: &Value,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    field_value
        .and_then(|value| value.compare(operand))
        .is_some_and(accept)
}

fn in_matches(field_value: Option<&Value>, operand: &Value) -> bool {
    match operand {
        Value::Array(items) => items.iter().any(|item| eq_matches(field_value, item)),
        _ => false,
    }
}
