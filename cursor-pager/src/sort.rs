//! Sort specifications with tie-breaker normalization.

use thiserror::Error;

/// Field name used as the tie-breaker when a sort spec does not name one.
pub const DEFAULT_ID_FIELD: &str = "_id";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDir {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort field with direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Field name.
    pub field: String,
    /// Direction.
    pub dir: SortDir,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }

    /// The same field with the direction flipped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            field: self.field.clone(),
            dir: self.dir.reversed(),
        }
    }
}

/// Errors for structurally invalid sort specifications.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SortSpecError {
    /// More effective sort keys than the keyset engine supports.
    ///
    /// A spec is never silently truncated to fit.
    #[error("sort spec has {count} effective keys, at most 2 are supported")]
    TooManyKeys {
        /// Effective key count after tie-breaker normalization.
        count: usize,
    },
    /// A parsed sort field was not in the allow-list.
    #[error("sort field '{field}' is not allowed")]
    FieldNotAllowed {
        /// The rejected field name.
        field: String,
    },
}

/// An ordered sort specification plus the unique tie-breaker field.
///
/// Keyset pagination needs a deterministic total order, so every spec ends
/// with a unique key. [`effective`](Self::effective) appends the tie-breaker
/// (default [`DEFAULT_ID_FIELD`]) when the caller's fields do not already
/// include it, using the direction of the last supplied field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    fields: Vec<SortField>,
    id_field: String,
}

impl SortSpec {
    /// Create a spec from caller-supplied sort fields.
    #[must_use]
    pub fn new(fields: Vec<SortField>) -> Self {
        Self {
            fields,
            id_field: DEFAULT_ID_FIELD.to_string(),
        }
    }

    /// Create a single-field spec.
    #[must_use]
    pub fn single(field: impl Into<String>, dir: SortDir) -> Self {
        Self::new(vec![SortField::new(field, dir)])
    }

    /// Append a sort field, builder style.
    #[must_use]
    pub fn then(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.fields.push(SortField::new(field, dir));
        self
    }

    /// Override the unique tie-breaker field name.
    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// The unique tie-breaker field name.
    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// The caller-supplied fields, before normalization.
    #[must_use]
    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    /// Parse a sort string like `"name,-created_at"` into a spec.
    ///
    /// Fields prefixed with `-` sort descending. If `allowed` is empty, all
    /// fields are accepted; otherwise each parsed field must appear in it.
    pub fn parse(sort: &str, allowed: &[&str]) -> Result<Self, SortSpecError> {
        let mut fields = Vec::new();

        for part in sort.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (field, dir) = if let Some(stripped) = part.strip_prefix('-') {
                (stripped, SortDir::Desc)
            } else {
                (part, SortDir::Asc)
            };

            // Empty allow-list accepts everything, matching FilterValidator.
            if !allowed.is_empty() && !allowed.contains(&field) {
                return Err(SortSpecError::FieldNotAllowed {
                    field: field.to_string(),
                });
            }

            fields.push(SortField::new(field, dir));
        }

        Ok(Self::new(fields))
    }

    /// Normalize to the effective sort key list.
    ///
    /// Duplicate fields collapse to their first occurrence, so a spec whose
    /// primary field is already the tie-breaker stays single-key. The
    /// tie-breaker is appended when absent. More than 2 effective keys is a
    /// configuration error.
    pub fn effective(&self) -> Result<Vec<SortField>, SortSpecError> {
        let mut fields: Vec<SortField> = Vec::new();

        for field in &self.fields {
            if !fields.iter().any(|f| f.field == field.field) {
                fields.push(field.clone());
            }
        }

        if !fields.iter().any(|f| f.field == self.id_field) {
            let dir = fields.last().map_or(SortDir::Asc, |f| f.dir);
            fields.push(SortField::new(&self.id_field, dir));
        }

        if fields.len() > 2 {
            return Err(SortSpecError::TooManyKeys {
                count: fields.len(),
            });
        }

        Ok(fields)
    }
}

impl Default for SortSpec {
    /// An empty spec: sorts by the tie-breaker field ascending.
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
