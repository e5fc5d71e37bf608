use std::collections::HashSet;

use crate::record::DedupKey;

/// Document-wide set of record keys that were already emitted.
///
/// Overlapping bands present the same physical line more than once; this
/// ledger is what keeps the second read from producing a second record.
/// It lives for the whole document and is never cleared between pages.
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: HashSet<DedupKey>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.seen.contains(key)
    }

    /// Record `key`. Returns `false` when it was already present.
    pub fn insert(&mut self, key: DedupKey) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
