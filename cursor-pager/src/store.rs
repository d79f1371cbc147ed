//! Store collaborator interface.

use crate::query::FilterExpr;
use crate::record::Record;
use crate::sort::SortField;

/// A queryable record store.
///
/// The pagination engine consumes this interface and owns no query
/// execution of its own: each [`find`](crate::find) call performs exactly
/// one `find` against the store, synchronously, and holds no state across
/// calls. Implementations decide how to evaluate the filter AST; the
/// reference semantics are [`FilterExpr::matches`].
///
/// # Ordering contract
///
/// Returned records must be ordered exactly per `sort`, including a
/// deterministic tie-break on the trailing sort key. The engine relies on
/// this to detect page boundaries; a store with unstable ordering produces
/// unstable pages.
///
/// # Errors
///
/// Store failures propagate to the pagination caller unchanged (wrapped
/// only in [`FindError::Store`](crate::FindError::Store), which forwards
/// display and source transparently). The engine never retries.
pub trait Store {
    /// The store's own error type.
    type Error: std::error::Error + 'static;

    /// Fetch at most `limit` records matching `filter`, ordered per `sort`.
    ///
    /// When `projection` is given, returned records carry only the named
    /// fields. A `None` filter matches every record.
    fn find(
        &self,
        filter: Option<&FilterExpr>,
        sort: &[SortField],
        limit: usize,
        projection: Option<&[String]>,
    ) -> Result<Vec<Record>, Self::Error>;
}
