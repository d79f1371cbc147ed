//! In-memory store used by the integration tests.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::convert::Infallible;

use cursor_pager::{FilterExpr, Record, SortDir, SortField, Store};

/// A store over a plain vector that evaluates filters with the crate's
/// reference semantics and sorts with [`cursor_pager::Value::compare`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn insert(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl Store for MemoryStore {
    type Error = Infallible;

    fn find(
        &self,
        filter: Option<&FilterExpr>,
        sort: &[SortField],
        limit: usize,
        projection: Option<&[String]>,
    ) -> Result<Vec<Record>, Self::Error> {
        let mut out: Vec<Record> = self
            .records
            .iter()
            .filter(|record| filter.is_none_or(|f| f.matches(record)))
            .cloned()
            .collect();

        out.sort_by(|a, b| compare_records(a, b, sort));
        out.truncate(limit);

        if let Some(fields) = projection {
            out = out.iter().map(|record| record.project(fields)).collect();
        }

        Ok(out)
    }
}

/// Compare two records by successive sort keys.
///
/// Incomparable or missing values rank as equal; the trailing unique key
/// keeps the overall order deterministic for the datasets used in tests.
pub fn compare_records(a: &Record, b: &Record, sort: &[SortField]) -> Ordering {
    for key in sort {
        let ord = match (a.get(&key.field), b.get(&key.field)) {
            (Some(x), Some(y)) => x.compare(y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };

        let ord = if key.dir == SortDir::Desc {
            ord.reverse()
        } else {
            ord
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}
