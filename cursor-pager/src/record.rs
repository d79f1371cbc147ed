//! Records as dynamic field-to-value mappings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A record returned by a [`Store`](crate::Store): an ordered mapping from
/// field name to scalar [`Value`].
///
/// Field access is explicit. Code that needs a field a sort spec names must
/// handle its absence as a typed error rather than assuming the store
/// produced it; see [`FindError::MissingField`](crate::FindError::MissingField).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Insert a field, returning the previous value if any.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Look up a field value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the record carries the given field.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// A copy of this record restricted to the named fields.
    ///
    /// Fields the record does not carry are skipped, not nulled.
    #[must_use]
    pub fn project(&self, fields: &[String]) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .filter(|(name, _)| fields.iter().any(|f| f == *name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
