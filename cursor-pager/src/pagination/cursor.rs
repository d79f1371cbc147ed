//! Cursor encoding/decoding for pagination.

use std::collections::BTreeMap;

use base64::prelude::*;
use thiserror::Error;

use crate::value::Value;

/// Maximum allowed cursor token size in bytes (4KB).
/// This prevents DoS attacks via oversized cursor payloads.
const MAX_CURSOR_SIZE: usize = 4 * 1024;

/// A cursor for keyset pagination.
///
/// A cursor wraps a boundary descriptor: the sort-field values of one
/// reference record (the first or last record of a page). The descriptor is
/// an order-independent mapping, so the field set can evolve per query
/// without a token version scheme.
///
/// The wire format is the CBOR encoding of the mapping, base64-encoded with
/// the URL-safe alphabet and `=` padding stripped (padding is not safe in
/// URL query parameters; decoding restores it).
///
/// # Security Note
///
/// Cursors are encoded, **not signed or encrypted**. The content is easily
/// decoded by clients. This is intentional: cursors are opaque pagination
/// tokens, not security mechanisms. Do not include sensitive data in cursor
/// fields, and validate decoded values server-side if tampering matters.
///
/// A cursor is also not validated against the sort spec that produced it.
/// Reusing a token under a sort spec with a different field set fails with
/// [`KeysetError::MissingField`](crate::KeysetError::MissingField); reusing
/// it under the same field set with different directions silently anchors
/// the page at the wrong boundary and is the caller's contract violation.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "cursor must be encoded with .encode() or used with a page query"]
pub struct Cursor {
    fields: BTreeMap<String, Value>,
}

impl Cursor {
    /// Create a new empty cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field value to the boundary descriptor.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add an integer field.
    pub fn int(self, name: impl Into<String>, value: i64) -> Self {
        self.field(name, Value::Int(value))
    }

    /// Add a string field.
    pub fn string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, Value::String(value.into()))
    }

    /// Add an identifier field.
    pub fn id(self, name: impl Into<String>, value: uuid::Uuid) -> Self {
        self.field(name, Value::Id(value))
    }

    /// Add a timestamp field.
    pub fn timestamp(self, name: impl Into<String>, value: jiff::Timestamp) -> Self {
        self.field(name, Value::Timestamp(value))
    }

    /// Look up a boundary field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Number of boundary fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the boundary descriptor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over boundary fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Encode the cursor to an opaque URL-safe token.
    ///
    /// The token contains only URL-safe base64 characters and no `=`.
    pub fn encode(&self) -> Result<String, CursorError> {
        let payload = serde_cbor::to_vec(&self.fields).map_err(|_| CursorError::Serialize)?;
        Ok(BASE64_URL_SAFE_NO_PAD.encode(payload))
    }

    /// Decode a cursor from an opaque token.
    ///
    /// Fails if the token exceeds the size cap, is not valid URL-safe
    /// base64, or does not deserialize into a boundary mapping. A malformed
    /// token is the caller's invalid input; it never silently restarts
    /// pagination from the first page.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        // Check size before decoding to bound untrusted input
        if token.len() > MAX_CURSOR_SIZE {
            return Err(CursorError::TooLarge { len: token.len() });
        }

        let payload = BASE64_URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CursorError::InvalidBase64)?;

        let fields =
            serde_cbor::from_slice(&payload).map_err(|_| CursorError::InvalidPayload)?;

        Ok(Self { fields })
    }
}

impl FromIterator<(String, Value)> for Cursor {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Errors for malformed cursor tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CursorError {
    /// The token is not valid URL-safe base64.
    #[error("cursor token is not valid URL-safe base64")]
    InvalidBase64,
    /// The decoded payload is not a valid boundary mapping.
    #[error("cursor payload is not a valid boundary mapping")]
    InvalidPayload,
    /// The token exceeds the maximum allowed size.
    #[error("cursor token is {len} bytes, limit is {MAX_CURSOR_SIZE}")]
    TooLarge {
        /// Size of the rejected token.
        len: usize,
    },
    /// The boundary mapping could not be serialized.
    #[error("cursor boundary could not be serialized")]
    Serialize,
}
