//! Keyset pagination: cursors, keyset conditions, and the pager.
//!
//! # Why keyset and not offset
//!
//! | Strategy   | Jump to Page | Performance | Stability |
//! |------------|--------------|-------------|-----------|
//! | **Offset** | Yes          | O(n) skip   | Unstable* |
//! | **Keyset** | No           | O(1)        | Stable    |
//!
//! *Unstable = rows shift, duplicate, or vanish when data changes between
//! requests. A keyset page is anchored at "strictly after this record in
//! sort order", which a store can seek to directly, and which concurrent
//! writes cannot move.
//!
//! # Example
//!
//! ```
//! use cursor_pager::{Cursor, KeysetCondition, SortDir, SortSpec};
//!
//! // The boundary of the last page the client saw
//! let cursor = Cursor::new().string("name", "Jane").int("_id", 3);
//!
//! // "strictly after that record" under the given sort
//! let sort = SortSpec::single("name", SortDir::Asc);
//! let condition = KeysetCondition::after(&sort, &cursor).unwrap();
//! let filter = condition.to_filter_expr();
//!
//! // Tokens are opaque and URL-safe
//! let token = cursor.encode().unwrap();
//! assert_eq!(Cursor::decode(&token).unwrap(), cursor);
//! ```
//!
//! The usual entry point is [`find`], which decodes the incoming cursor,
//! merges the keyset condition into the caller's filter, fetches one extra
//! record to detect boundaries, and builds the outgoing cursors.

mod cursor;
mod find;
mod keyset;
mod page;

pub use cursor::{Cursor, CursorError};
pub use find::{FindError, PageQuery, find};
pub use keyset::{CursorDirection, KeysetCondition, KeysetError};
pub use page::{Page, PageInfo};
