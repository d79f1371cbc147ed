//! Paginated find orchestration.

use thiserror::Error;
use tracing::debug;

use super::cursor::{Cursor, CursorError};
use super::keyset::{KeysetCondition, KeysetError};
use super::page::{Page, PageInfo};
use crate::query::FilterExpr;
use crate::record::Record;
use crate::sort::{SortDir, SortField, SortSpec};
use crate::store::Store;

/// A paginated query: base filter, sort spec, page size, and at most one
/// cursor token from a prior page.
///
/// `after` and `before` are mutually exclusive in intended use; when a
/// caller supplies both, `after` wins. That precedence is documented
/// behavior, not an error.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a page query does nothing until passed to find()"]
pub struct PageQuery {
    filter: Option<FilterExpr>,
    sort: SortSpec,
    limit: usize,
    after: Option<String>,
    before: Option<String>,
    projection: Option<Vec<String>>,
}

impl PageQuery {
    /// Create a query for pages of at most `limit` records.
    pub fn new(limit: usize) -> Self {
        Self {
            filter: None,
            sort: SortSpec::default(),
            limit,
            after: None,
            before: None,
            projection: None,
        }
    }

    /// Set the base filter conjoined with the keyset condition.
    pub fn filter(mut self, filter: FilterExpr) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Append a sort field.
    pub fn sort(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.sort = self.sort.then(field, dir);
        self
    }

    /// Replace the whole sort spec.
    pub fn sort_spec(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Page forward from a `next_cursor` token of a prior page.
    pub fn after(mut self, token: impl Into<String>) -> Self {
        self.after = Some(token.into());
        self
    }

    /// Page backward from a `prev_cursor` token of a prior page.
    pub fn before(mut self, token: impl Into<String>) -> Self {
        self.before = Some(token.into());
        self
    }

    /// Restrict returned records to the named fields.
    ///
    /// The effective sort fields are merged in before the store fetch so
    /// boundary records can still produce cursors.
    pub fn projection(mut self, fields: &[&str]) -> Self {
        self.projection = Some(fields.iter().map(|f| (*f).to_string()).collect());
        self
    }

    /// The requested page size.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Errors from [`find`].
///
/// A call either fully succeeds with a [`Page`] or fails with exactly one
/// of these; partial results are never returned alongside an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FindError<E>
where
    E: std::error::Error + 'static,
{
    /// The requested limit was zero.
    #[error("page limit must be greater than zero")]
    InvalidLimit,
    /// The supplied cursor token was malformed.
    #[error(transparent)]
    Cursor(#[from] CursorError),
    /// The sort spec was invalid or the cursor did not match it.
    #[error(transparent)]
    Keyset(#[from] KeysetError),
    /// A boundary record lacks a field the effective sort spec names.
    #[error("record is missing sort field '{field}'")]
    MissingField {
        /// The absent field name.
        field: String,
    },
    /// The store fetch failed; the store's error passes through unchanged.
    #[error(transparent)]
    Store(E),
}

/// Where the requested page is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOrigin {
    /// No cursor supplied: the first page.
    First,
    /// Forward from a `next_cursor` boundary.
    After,
    /// Backward from a `prev_cursor` boundary.
    Before,
}

/// Fetch one page of records from a store.
///
/// Performs exactly one store fetch of `limit + 1` records: the overflow
/// record proves more data exists past the page and is trimmed before the
/// page is returned. When paging backward the store is asked for the
/// reversed sort order, so the `limit + 1` records nearest the boundary are
/// fetched, and the result is re-reversed to canonical order.
///
/// The engine holds no state across calls; correctness rests on the
/// snapshot of the single fetch plus keyset comparison, so concurrent
/// writes between page requests cannot skip or duplicate rows relative to
/// the sort order at fetch time.
///
/// # Example
///
/// ```ignore
/// let query = PageQuery::new(20)
///     .filter(parse_filter(r#"{"active": true}"#)?)
///     .sort("created_at", SortDir::Desc);
///
/// let page = find(&store, &query)?;
/// let next = page.info.next_cursor; // echo back via .after(..) for page 2
/// ```
pub fn find<S: Store>(store: &S, query: &PageQuery) -> Result<Page, FindError<S::Error>> {
    if query.limit == 0 {
        return Err(FindError::InvalidLimit);
    }

    let effective = query.sort.effective().map_err(KeysetError::from)?;

    let (origin, keyset) = if let Some(token) = &query.after {
        let cursor = Cursor::decode(token)?;
        let condition = KeysetCondition::after(&query.sort, &cursor)?;
        (PageOrigin::After, Some(condition))
    } else if let Some(token) = &query.before {
        let cursor = Cursor::decode(token)?;
        let condition = KeysetCondition::before(&query.sort, &cursor)?;
        (PageOrigin::Before, Some(condition))
    } else {
        (PageOrigin::First, None)
    };

    let filter = match (query.filter.clone(), keyset.map(|k| k.to_filter_expr())) {
        (Some(base), Some(keyset)) => Some(base.and_with(keyset)),
        (Some(base), None) => Some(base),
        (None, Some(keyset)) => Some(keyset),
        (None, None) => None,
    };

    let backward = origin == PageOrigin::Before;
    let fetch_sort: Vec<SortField> = if backward {
        effective.iter().map(SortField::reversed).collect()
    } else {
        effective.clone()
    };

    let projection = query
        .projection
        .as_ref()
        .map(|fields| merge_projection(fields, &effective));

    debug!(limit = query.limit, backward, "running paginated find");

    let mut records = store
        .find(
            filter.as_ref(),
            &fetch_sort,
            query.limit + 1,
            projection.as_deref(),
        )
        .map_err(FindError::Store)?;

    if backward {
        records.reverse();
    }

    let overflow = records.len() > query.limit;
    if overflow {
        if backward {
            records.remove(0);
        } else {
            records.truncate(query.limit);
        }
    }

    debug!(returned = records.len(), overflow, "store fetch complete");

    if records.is_empty() {
        return Ok(Page::empty());
    }

    let (has_next, has_previous) = match origin {
        PageOrigin::First => (overflow, false),
        // A supplied next-cursor implies earlier pages exist
        PageOrigin::After => (overflow, true),
        // A backward page that does not overflow has reached the start of
        // the result set and reports the same flags as a fresh first page
        PageOrigin::Before => (overflow, overflow),
    };

    let mut info = PageInfo {
        has_next,
        has_previous,
        next_cursor: None,
        prev_cursor: None,
    };

    if has_next && let Some(last) = records.last() {
        info.next_cursor = Some(boundary_cursor(last, &effective)?.encode()?);
    }
    if has_previous && let Some(first) = records.first() {
        info.prev_cursor = Some(boundary_cursor(first, &effective)?.encode()?);
    }

    Ok(Page {
        data: records,
        info,
    })
}

/// Extract a boundary descriptor holding exactly the effective sort fields.
fn boundary_cursor<E>(record: &Record, fields: &[SortField]) -> Result<Cursor, FindError<E>>
where
    E: std::error::Error + 'static,
{
    fields
        .iter()
        .map(|f| {
            record
                .get(&f.field)
                .cloned()
                .map(|value| (f.field.clone(), value))
                .ok_or_else(|| FindError::MissingField {
                    field: f.field.clone(),
                })
        })
        .collect()
}

/// Union of a caller projection and the effective sort fields.
fn merge_projection(fields: &[String], sort: &[SortField]) -> Vec<String> {
    let mut merged = fields.to_vec();
    for key in sort {
        if !merged.iter().any(|f| f == &key.field) {
            merged.push(key.field.clone());
        }
    }
    merged
}
