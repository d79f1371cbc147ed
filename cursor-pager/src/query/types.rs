//! Core types for the query predicate model.

use crate::value::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Operator {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Value is one of the operand array's elements.
    In,
    /// Value is none of the operand array's elements.
    NotIn,
    /// Field presence; operand is `true` or `false`.
    Exists,
}

/// Logical operators for compound filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogicalOp {
    /// All conditions must match.
    And,
    /// At least one condition must match.
    Or,
    /// Negate the condition.
    Not,
}

/// A filter expression that can be simple or compound.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// A simple field comparison.
    Simple(Filter),
    /// A compound filter with logical operator.
    Compound(CompoundFilter),
}

impl FilterExpr {
    /// Conjoin this expression with another.
    ///
    /// An existing top-level AND is extended in place instead of nesting.
    /// The pager uses this to merge the caller's base filter with the
    /// keyset condition.
    #[must_use]
    pub fn and_with(self, other: Self) -> Self {
        match self {
            Self::Compound(CompoundFilter {
                op: LogicalOp::And,
                mut filters,
            }) => {
                filters.push(other);
                Self::Compound(CompoundFilter {
                    op: LogicalOp::And,
                    filters,
                })
            }
            expr => and(vec![expr, other]),
        }
    }
}

/// A compound filter combining multiple expressions with a logical operator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundFilter {
    /// The logical operator.
    pub op: LogicalOp,
    /// The combined expressions.
    pub filters: Vec<FilterExpr>,
}

impl CompoundFilter {
    /// Create an AND compound filter.
    #[must_use]
    pub fn and(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::And,
            filters,
        }
    }

    /// Create an OR compound filter.
    #[must_use]
    pub fn or(filters: Vec<FilterExpr>) -> Self {
        Self {
            op: LogicalOp::Or,
            filters,
        }
    }

    /// Create a NOT compound filter (wraps a single filter).
    #[must_use]
    pub fn not(filter: FilterExpr) -> Self {
        Self {
            op: LogicalOp::Not,
            filters: vec![filter],
        }
    }
}

/// Filter condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Field to compare.
    pub field: String,
    /// Comparison operator.
    pub op: Operator,
    /// Operand value.
    pub value: Value,
}

/// Helper function to create a simple filter expression.
pub fn simple(field: impl Into<String>, op: Operator, value: impl Into<Value>) -> FilterExpr {
    FilterExpr::Simple(Filter {
        field: field.into(),
        op,
        value: value.into(),
    })
}

/// Helper function to create an AND compound filter.
#[must_use]
pub fn and(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::and(filters))
}

/// Helper function to create an OR compound filter.
#[must_use]
pub fn or(filters: Vec<FilterExpr>) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::or(filters))
}

/// Helper function to create a NOT filter.
#[must_use]
pub fn not(filter: FilterExpr) -> FilterExpr {
    FilterExpr::Compound(CompoundFilter::not(filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_helper() {
        let expr = simple("age", Operator::Gte, 18);

        assert!(matches!(
            expr,
            FilterExpr::Simple(Filter {
                ref field,
                op: Operator::Gte,
                value: Value::Int(18),
            }) if field == "age"
        ));
    }

    #[test]
    fn test_and_with_flattens_top_level_and() {
        let base = and(vec![
            simple("active", Operator::Eq, true),
            simple("age", Operator::Gte, 18),
        ]);
        let merged = base.and_with(simple("name", Operator::Eq, "Jane"));

        match merged {
            FilterExpr::Compound(compound) => {
                assert_eq!(compound.op, LogicalOp::And);
                assert_eq!(compound.filters.len(), 3);
            }
            FilterExpr::Simple(_) => panic!("expected compound filter"),
        }
    }

    #[test]
    fn test_and_with_wraps_simple() {
        let merged =
            simple("active", Operator::Eq, true).and_with(simple("age", Operator::Gt, 21));

        match merged {
            FilterExpr::Compound(compound) => {
                assert_eq!(compound.op, LogicalOp::And);
                assert_eq!(compound.filters.len(), 2);
            }
            FilterExpr::Simple(_) => panic!("expected compound filter"),
        }
    }

    #[test]
    fn test_and_with_does_not_flatten_or() {
        let base = or(vec![
            simple("role", Operator::Eq, "admin"),
            simple("role", Operator::Eq, "mod"),
        ]);
        let merged = base.and_with(simple("active", Operator::Eq, true));

        match merged {
            FilterExpr::Compound(compound) => {
                assert_eq!(compound.op, LogicalOp::And);
                assert_eq!(compound.filters.len(), 2);
            }
            FilterExpr::Simple(_) => panic!("expected compound filter"),
        }
    }
}
