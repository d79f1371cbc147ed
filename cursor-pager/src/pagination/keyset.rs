//! Keyset pagination condition generation.

use thiserror::Error;

use super::cursor::Cursor;
use crate::query::{FilterExpr, Operator, and, or, simple};
use crate::sort::{SortDir, SortField, SortSpec, SortSpecError};
use crate::value::Value;

/// Paging direction relative to a cursor boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDirection {
    /// Paginate forward (strictly after the boundary in sort order).
    After,
    /// Paginate backward (strictly before the boundary in sort order).
    Before,
}

/// Errors building a keyset condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeysetError {
    /// The sort spec is structurally invalid.
    #[error(transparent)]
    SortSpec(#[from] SortSpecError),
    /// The cursor boundary lacks a field the effective sort spec requires.
    ///
    /// This happens when a cursor produced under one sort spec is replayed
    /// under another; the mismatch is rejected rather than silently
    /// filtering on stale fields.
    #[error("cursor boundary is missing sort field '{field}'")]
    MissingField {
        /// The absent field name.
        field: String,
    },
}

/// Keyset pagination condition.
///
/// Turns a sort spec plus a boundary descriptor into the row-value style
/// predicate `(a, b) > (va, vb)`, expanded into the disjunction stores can
/// evaluate: `(a > va) OR (a = va AND b > vb)`. This anchors the page at a
/// key instead of an offset, so concurrent inserts and deletes can not
/// shift, duplicate, or drop rows relative to the sort order at fetch time.
#[derive(Debug, Clone, PartialEq)]
pub struct KeysetCondition {
    fields: Vec<SortField>,
    values: Vec<Value>,
    direction: CursorDirection,
}

impl KeysetCondition {
    /// Build the condition for paginating after a cursor boundary.
    pub fn after(sort: &SortSpec, cursor: &Cursor) -> Result<Self, KeysetError> {
        Self::new(sort, cursor, CursorDirection::After)
    }

    /// Build the condition for paginating before a cursor boundary.
    pub fn before(sort: &SortSpec, cursor: &Cursor) -> Result<Self, KeysetError> {
        Self::new(sort, cursor, CursorDirection::Before)
    }

    fn new(
        sort: &SortSpec,
        cursor: &Cursor,
        direction: CursorDirection,
    ) -> Result<Self, KeysetError> {
        let fields = sort.effective()?;

        let values = fields
            .iter()
            .map(|f| {
                cursor
                    .get(&f.field)
                    .cloned()
                    .ok_or_else(|| KeysetError::MissingField {
                        field: f.field.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fields,
            values,
            direction,
        })
    }

    /// The effective sort fields this condition was built for.
    #[must_use]
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// Convert to a filter expression.
    ///
    /// Built as a reduction over the effective key list: key `i`
    /// contributes the branch "equal on keys `0..i`, strictly past on key
    /// `i`", and the branches are OR-ed. With the arity cap this yields
    /// `f > v` for one key and `(p > vp) OR (p = vp AND k > vk)` for two,
    /// comparators flipped per direction and per-key sort order.
    #[must_use]
    pub fn to_filter_expr(&self) -> FilterExpr {
        let mut branches: Vec<FilterExpr> = Vec::new();

        for (i, (field, value)) in self.fields.iter().zip(&self.values).enumerate() {
            let mut clauses: Vec<FilterExpr> = self
                .fields
                .iter()
                .zip(&self.values)
                .take(i)
                .map(|(f, v)| simple(&f.field, Operator::Eq, v.clone()))
                .collect();

            clauses.push(simple(
                &field.field,
                self.comparator(field.dir),
                value.clone(),
            ));

            branches.push(match clauses.len() {
                1 => clauses.remove(0),
                _ => and(clauses),
            });
        }

        match branches.len() {
            1 => branches.remove(0),
            _ => or(branches),
        }
    }

    const fn comparator(&self, dir: SortDir) -> Operator {
        match (self.direction, dir) {
            (CursorDirection::After, SortDir::Asc) | (CursorDirection::Before, SortDir::Desc) => {
                Operator::Gt
            }
            (CursorDirection::After, SortDir::Desc) | (CursorDirection::Before, SortDir::Asc) => {
                Operator::Lt
            }
        }
    }
}
