//! Corpus builder
//!
//! Accumulates image records from all accounts into one deduplicated
//! collection and hands them out in render order. Insertion is idempotent by
//! identifier: the same image reachable from several posts (reposts are the
//! common case) contributes exactly once, first insertion wins.

use crate::corpus::record::ImageRecord;
use std::collections::HashMap;

/// The deduplicated set of image records for one run
#[derive(Debug, Default)]
pub struct Corpus {
    records: HashMap<String, ImageRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, keeping the first one seen per identifier
    ///
    /// Returns whether the record was newly inserted. Duplicates are
    /// silently absorbed, not an error.
    pub fn insert(&mut self, record: ImageRecord) -> bool {
        match self.records.entry(record.id.clone()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the corpus and returns the records in render order
    ///
    /// Newest posts first; within one post, images keep their original
    /// attachment order (timestamp descending, sequence index ascending).
    pub fn finalize(self) -> Vec<ImageRecord> {
        let mut records: Vec<ImageRecord> = self.records.into_values().collect();
        records.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.seq.cmp(&b.seq))
                .then_with(|| a.id.cmp(&b.id))
        });
        records
    }
}
