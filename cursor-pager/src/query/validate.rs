//! Validation for user-provided filters.

use thiserror::Error;

use super::types::{Filter, FilterExpr, Operator};

/// Validation configuration for user-provided filters.
///
/// Three layers of protection:
/// 1. Field allow-list: only specific fields can be queried
/// 2. Operator deny-list: expensive operators can be blocked
/// 3. Nesting depth limit: caps complex compound filters
///
/// # Example
///
/// ```
/// use cursor_pager::{FilterValidator, parse_filter};
///
/// let validator = FilterValidator::new()
///     .allow_fields(&["name", "email", "status"])
///     .max_depth(3);
///
/// let filter = parse_filter(r#"{"status": "active"}"#).unwrap();
/// assert!(validator.validate(&filter).is_ok());
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FilterValidator {
    /// Allowed field names (allow-list). Empty = allow all fields.
    pub allowed_fields: Vec<String>,
    /// Denied operators (deny-list).
    pub denied_operators: Vec<Operator>,
    /// Maximum nesting depth for compound filters.
    pub max_depth: usize,
}

impl FilterValidator {
    /// Create a validator with defaults: all fields, all operators,
    /// nesting depth capped at 5.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allowed_fields: Vec::new(),
            denied_operators: Vec::new(),
            max_depth: 5,
        }
    }

    /// Set allowed fields (allow-list).
    ///
    /// Only fields in this list can be used in user filters.
    /// If empty, all fields are allowed.
    #[must_use]
    pub fn allow_fields(mut self, fields: &[&str]) -> Self {
        self.allowed_fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set denied operators (deny-list).
    #[must_use]
    pub fn deny_operators(mut self, ops: &[Operator]) -> Self {
        self.denied_operators = ops.to_vec();
        self
    }

    /// Set maximum nesting depth. Default is 5.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate a filter expression against the configured rules.
    ///
    /// Returns an error if:
    /// - A field is not in the allow-list (when the list is not empty)
    /// - An operator is in the deny-list
    /// - Compound nesting exceeds the maximum depth
    pub fn validate(&self, expr: &FilterExpr) -> Result<(), ValidationError> {
        self.validate_with_depth(expr, 0)
    }

    fn validate_with_depth(
        &self,
        expr: &FilterExpr,
        depth: usize,
    ) -> Result<(), ValidationError> {
        if depth > self.max_depth {
            return Err(ValidationError::TooDeep {
                max: self.max_depth,
            });
        }

        match expr {
            FilterExpr::Simple(filter) => self.validate_filter(filter),
            FilterExpr::Compound(compound) => compound
                .filters
                .iter()
                .try_for_each(|inner| self.validate_with_depth(inner, depth + 1)),
        }
    }

    fn validate_filter(&self, filter: &Filter) -> Result<(), ValidationError> {
        if !self.allowed_fields.is_empty()
            && !self.allowed_fields.iter().any(|f| f == &filter.field)
        {
            return Err(ValidationError::FieldNotAllowed {
                field: filter.field.clone(),
            });
        }

        if self.denied_operators.contains(&filter.op) {
            return Err(ValidationError::OperatorDenied { op: filter.op });
        }

        Ok(())
    }
}

impl Default for FilterValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from filter validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A filtered field is not in the allow-list.
    #[error("field '{field}' is not allowed in filters")]
    FieldNotAllowed {
        /// The rejected field name.
        field: String,
    },
    /// A filter uses a denied operator.
    #[error("operator {op:?} is denied in filters")]
    OperatorDenied {
        /// The rejected operator.
        op: Operator,
    },
    /// The filter nests deeper than the configured maximum.
    #[error("filter nesting exceeds maximum depth of {max}")]
    TooDeep {
        /// The configured maximum depth.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::{and, not, simple};

    #[test]
    fn test_allow_list() {
        let validator = FilterValidator::new().allow_fields(&["name", "age"]);

        assert!(validator.validate(&simple("name", Operator::Eq, "x")).is_ok());
        assert_eq!(
            validator.validate(&simple("password", Operator::Eq, "x")),
            Err(ValidationError::FieldNotAllowed {
                field: "password".to_string()
            })
        );
    }

    #[test]
    fn test_empty_allow_list_allows_all() {
        let validator = FilterValidator::new();
        assert!(validator.validate(&simple("anything", Operator::Eq, 1)).is_ok());
    }

    #[test]
    fn test_deny_operators() {
        let validator = FilterValidator::new().deny_operators(&[Operator::In, Operator::NotIn]);

        assert_eq!(
            validator.validate(&simple("status", Operator::In, crate::Value::Array(vec![]))),
            Err(ValidationError::OperatorDenied { op: Operator::In })
        );
        assert!(validator.validate(&simple("status", Operator::Eq, "a")).is_ok());
    }

    #[test]
    fn test_compound_filters_validated_recursively() {
        let validator = FilterValidator::new().allow_fields(&["name"]);
        let expr = and(vec![
            simple("name", Operator::Eq, "x"),
            not(simple("secret", Operator::Eq, "y")),
        ]);

        assert_eq!(
            validator.validate(&expr),
            Err(ValidationError::FieldNotAllowed {
                field: "secret".to_string()
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let validator = FilterValidator::new().max_depth(2);

        let mut expr = simple("a", Operator::Eq, 1);
        for _ in 0..3 {
            expr = not(expr);
        }

        assert_eq!(
            validator.validate(&expr),
            Err(ValidationError::TooDeep { max: 2 })
        );
    }
}
