// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
// Pedantic lints that are too verbose to fix individually in an AST-heavy crate
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(clippy::missing_panics_doc)] // # Panics sections - doc-heavy
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable
#![allow(clippy::return_self_not_must_use)] // Builder pattern methods return Self by design
#![allow(clippy::must_use_candidate)] // Builder methods - fluent API doesn't need must_use
#![allow(clippy::cast_precision_loss)] // Int/Float cross-kind comparison is intentional

//! # cursor-pager - Keyset Pagination with Opaque Cursors
//!
//! A keyset (seek-based) pagination engine for queryable record stores.
//! Given a filter, a sort spec, and a cursor token from a prior page, it
//! returns the next or previous page plus fresh cursor tokens and boundary
//! flags, without offset arithmetic (which is O(n) and unstable under
//! concurrent writes).
//!
//! ## Quick Start
//!
//! ```
//! use cursor_pager::prelude::*;
//!
//! // An opaque, URL-safe cursor from the last record the client saw
//! let cursor = Cursor::new().string("name", "Jane").int("_id", 3);
//! let token = cursor.encode().unwrap();
//! assert_eq!(Cursor::decode(&token).unwrap(), cursor);
//!
//! // The keyset predicate for "strictly after that record"
//! let sort = SortSpec::single("name", SortDir::Asc);
//! let filter = KeysetCondition::after(&sort, &cursor).unwrap().to_filter_expr();
//! ```
//!
//! ## Paginating a store
//!
//! [`find`] drives a [`Store`] implementation end to end:
//!
//! ```ignore
//! use cursor_pager::prelude::*;
//!
//! // Page 1
//! let query = PageQuery::new(20)
//!     .filter(parse_filter(r#"{"active": true}"#)?)
//!     .sort("created_at", SortDir::Desc);
//! let page = find(&store, &query)?;
//!
//! // Page 2: echo the token back verbatim
//! if let Some(token) = page.info.next_cursor {
//!     let query = PageQuery::new(20)
//!         .filter(parse_filter(r#"{"active": true}"#)?)
//!         .sort("created_at", SortDir::Desc)
//!         .after(token);
//!     let page2 = find(&store, &query)?;
//! }
//! ```
//!
//! ## Mongo-style filters
//!
//! ```
//! use cursor_pager::parse_filter;
//!
//! let filter = parse_filter(r#"{
//!     "status": {"$in": ["active", "pending"]},
//!     "age": {"$gte": 18}
//! }"#).unwrap();
//! ```
//!
//! ## Guarantees and non-guarantees
//!
//! * Cursor tokens round-trip exactly for every scalar kind and contain
//!   only URL-safe characters, never `=`.
//! * Sort specs always end in a unique tie-breaker field (default `_id`),
//!   appended automatically when absent; at most two effective sort keys
//!   are supported.
//! * Tokens are not signed or encrypted; treat them as client-visible.

mod pagination;
mod query;
mod record;
mod sort;
mod store;
mod value;

pub use pagination::{
    Cursor, CursorDirection, CursorError, FindError, KeysetCondition, KeysetError, Page,
    PageInfo, PageQuery, find,
};
pub use query::{
    CompoundFilter, Filter, FilterExpr, FilterValidator, LogicalOp, Operator, ParseError,
    ValidationError, and, not, or, parse_filter, parse_filter_bytes, simple,
};
pub use record::Record;
pub use sort::{DEFAULT_ID_FIELD, SortDir, SortField, SortSpec, SortSpecError};
pub use store::Store;
pub use value::Value;

/// Prelude module for convenient imports.
///
/// ```
/// use cursor_pager::prelude::*;
///
/// let query = PageQuery::new(10).sort("name", SortDir::Asc);
/// assert_eq!(query.limit(), 10);
/// ```
pub mod prelude {
    pub use crate::{
        CompoundFilter, Cursor, CursorDirection, CursorError, Filter, FilterExpr,
        FilterValidator, FindError, KeysetCondition, KeysetError, LogicalOp, Operator, Page,
        PageInfo, PageQuery, ParseError, Record, SortDir, SortField, SortSpec, SortSpecError,
        Store, ValidationError, Value, and, find, not, or, parse_filter, parse_filter_bytes,
        simple,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
