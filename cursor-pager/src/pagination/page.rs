//! Page result types.

use crate::record::Record;

/// Boundary information for a paginated response.
///
/// Cursors are present exactly when the corresponding flag is set:
/// `next_cursor` when records exist beyond the last returned record,
/// `prev_cursor` when records exist before the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are more records after this page.
    pub has_next: bool,
    /// Whether there are records before this page.
    pub has_previous: bool,
    /// Cursor to fetch the next page.
    pub next_cursor: Option<String>,
    /// Cursor to fetch the previous page.
    pub prev_cursor: Option<String>,
}

impl PageInfo {
    /// Set the next cursor; a present cursor implies `has_next`.
    #[must_use]
    pub fn with_next_cursor(mut self, cursor: Option<String>) -> Self {
        if cursor.is_some() {
            self.has_next = true;
        }
        self.next_cursor = cursor;
        self
    }

    /// Set the previous cursor; a present cursor implies `has_previous`.
    #[must_use]
    pub fn with_prev_cursor(mut self, cursor: Option<String>) -> Self {
        if cursor.is_some() {
            self.has_previous = true;
        }
        self.prev_cursor = cursor;
        self
    }
}

/// One page of records plus boundary information.
///
/// Constructed once per [`find`](crate::find) call and immutable; the only
/// state carried between calls is what the cursor tokens encode, echoed
/// back verbatim by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// The records of this page, in canonical sort order.
    pub data: Vec<Record>,
    /// Boundary flags and cursors.
    pub info: PageInfo,
}

impl Page {
    /// An empty page: no data, no cursors, both flags false.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of records in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
