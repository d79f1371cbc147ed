//! Store-agnostic query predicates.
//!
//! A query is an AST of [`FilterExpr`] nodes built from Mongo-style
//! operators. Predicates are handed to a [`Store`](crate::Store) for
//! execution; [`FilterExpr::matches`] defines the reference semantics.

mod eval;
mod parse;
mod types;
mod validate;

pub use parse::{ParseError, parse_filter, parse_filter_bytes};
pub use types::{
    CompoundFilter, Filter, FilterExpr, LogicalOp, Operator, and, not, or, simple,
};
pub use validate::{FilterValidator, ValidationError};
