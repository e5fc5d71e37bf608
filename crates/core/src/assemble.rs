//! Final pass over the scanned records.

use std::collections::HashSet;

use crate::record::{OutputRow, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    pub records: Vec<Record>,
    /// Records dropped because an earlier record had the same key.
    pub removed: usize,
}

impl Finalized {
    pub fn rows(&self) -> Vec<OutputRow> {
        self.records.iter().map(OutputRow::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Keep the first record for every `(unit_id, subtype)` key, in order.
///
/// The ledger already prevents duplicates during the scan, so `removed` is
/// expected to be zero; a non-zero value is logged.
pub fn finalize(records: Vec<Record>) -> Finalized {
    let total = records.len();
    let mut seen = HashSet::with_capacity(total);
    let records: Vec<Record> = records
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect();

    let removed = total - records.len();
    if removed > 0 {
        log::warn!("dropped {removed} duplicate record(s) that slipped past the ledger");
    }

    Finalized { records, removed }
}
