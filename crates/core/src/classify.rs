//! Line classification and field mapping.
//!
//! Every text line coming out of a band is handed to [`classify`], which
//! decides from its token count alone which grammar applies:
//!
//! ```text
//! > 11 tokens   primary row      <id> <name ...> m0 m1 m2 m3 m4 m5 m6 m7 m8
//! == 11 tokens  subordinate row  --Enrolled in <2YR|4YR> <word> s0 s1 s2 s3 s4 s5 s6
//! otherwise     rejected
//! ```
//!
//! Primary rows surface `m0` as the graduates total and `m2..=m6` as the
//! five metrics. Subordinate rows surface `s0..=s4` and inherit the rest
//! from the active parent in [`PageState`].

use std::fmt;

use crate::ledger::DedupLedger;
use crate::record::{DedupKey, Metrics, Record, RecordSubtype};
use crate::tracker::{PageState, Parent};

/// Primary rows have strictly more tokens than this.
pub const PRIMARY_MIN_EXCLUSIVE: usize = 11;
/// Subordinate rows have exactly this many tokens.
pub const SUBORDINATE_TOKENS: usize = 11;
/// Length of the trailing numeric block on a primary row.
pub const PRIMARY_METRIC_COUNT: usize = 9;
/// Length of the trailing numeric block on a subordinate row.
pub const SUBORDINATE_METRIC_COUNT: usize = 7;
/// The two tokens that open every subordinate row.
pub const SUBORDINATE_MARKER: [&str; 2] = ["--Enrolled", "in"];

/// Positions of the five surfaced metrics inside the primary block.
const PRIMARY_METRIC_SLOTS: [usize; 5] = [2, 3, 4, 5, 6];
/// Positions of the five surfaced metrics inside the subordinate block.
const SUBORDINATE_METRIC_SLOTS: [usize; 5] = [0, 1, 2, 3, 4];

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Primary(Record),
    Subordinate(Record),
    Rejected(Rejection),
}

impl Classification {
    pub fn into_record(self) -> Option<Record> {
        match self {
            Classification::Primary(record) | Classification::Subordinate(record) => Some(record),
            Classification::Rejected(_) => None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, Classification::Rejected(_))
    }
}

/// Why a line did not produce a record.
///
/// None of these are errors: headers, footers and page decorations all land
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Blank,
    TokenCount(usize),
    NonNumericId,
    InvalidMetrics,
    MarkerMismatch,
    UnknownCategory,
    Orphan,
    Duplicate(DedupKey),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Blank => write!(f, "blank line"),
            Rejection::TokenCount(n) => write!(f, "{n} tokens match no row grammar"),
            Rejection::NonNumericId => write!(f, "first token is not a numeric id"),
            Rejection::InvalidMetrics => write!(f, "metric block is not all integers"),
            Rejection::MarkerMismatch => write!(f, "missing sub-entry marker"),
            Rejection::UnknownCategory => write!(f, "unknown sub-entry category"),
            Rejection::Orphan => write!(f, "sub-entry without an active parent"),
            Rejection::Duplicate(key) => write!(f, "duplicate of {key}"),
        }
    }
}

/// Classify one line, updating `state` and `ledger` only when it is
/// accepted.
pub fn classify(
    line: &str,
    state: &mut PageState,
    ledger: &mut DedupLedger,
    year: &str,
) -> Classification {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.len() {
        0 => Classification::Rejected(Rejection::Blank),
        n if n > PRIMARY_MIN_EXCLUSIVE => primary(&tokens, state, ledger, year),
        SUBORDINATE_TOKENS => subordinate(&tokens, state, ledger, year),
        n => Classification::Rejected(Rejection::TokenCount(n)),
    }
}

fn primary(
    tokens: &[&str],
    state: &mut PageState,
    ledger: &mut DedupLedger,
    year: &str,
) -> Classification {
    let unit_id = tokens[0];
    if !is_digit_sequence(unit_id) {
        return Classification::Rejected(Rejection::NonNumericId);
    }

    let split = tokens.len() - PRIMARY_METRIC_COUNT;
    let Some(block) = parse_block(&tokens[split..]) else {
        return Classification::Rejected(Rejection::InvalidMetrics);
    };

    let key = DedupKey::new(unit_id, RecordSubtype::All);
    if !ledger.insert(key.clone()) {
        return Classification::Rejected(Rejection::Duplicate(key));
    }

    let unit_name = tokens[1..split].join(" ");
    let graduates_total = block[0];

    state.set(Parent {
        unit_id: unit_id.to_string(),
        unit_name: unit_name.clone(),
        graduates_total,
    });

    Classification::Primary(Record {
        unit_id: unit_id.to_string(),
        unit_name,
        subtype: RecordSubtype::All,
        year: year.to_string(),
        graduates_total,
        metrics: pick_metrics(&block, &PRIMARY_METRIC_SLOTS),
    })
}

fn subordinate(
    tokens: &[&str],
    state: &PageState,
    ledger: &mut DedupLedger,
    year: &str,
) -> Classification {
    if tokens[..2] != SUBORDINATE_MARKER {
        return Classification::Rejected(Rejection::MarkerMismatch);
    }

    let Some(subtype) = RecordSubtype::from_category(tokens[2]) else {
        return Classification::Rejected(Rejection::UnknownCategory);
    };

    let Some(parent) = state.current() else {
        return Classification::Rejected(Rejection::Orphan);
    };

    let block = &tokens[tokens.len() - SUBORDINATE_METRIC_COUNT..];
    let Some(block) = parse_block(block) else {
        return Classification::Rejected(Rejection::InvalidMetrics);
    };

    let key = DedupKey::new(parent.unit_id.clone(), subtype);
    if !ledger.insert(key.clone()) {
        return Classification::Rejected(Rejection::Duplicate(key));
    }

    Classification::Subordinate(Record {
        unit_id: parent.unit_id.clone(),
        unit_name: parent.unit_name.clone(),
        subtype,
        year: year.to_string(),
        graduates_total: parent.graduates_total,
        metrics: pick_metrics(&block, &SUBORDINATE_METRIC_SLOTS),
    })
}

/// Parse every token of a metric block, or nothing if any token is not an
/// integer.
fn parse_block(tokens: &[&str]) -> Option<Vec<i64>> {
    tokens.iter().map(|t| t.parse::<i64>().ok()).collect()
}

fn pick_metrics(block: &[i64], slots: &[usize; 5]) -> Metrics {
    Metrics::from_slice(&slots.map(|i| block[i]))
}

fn is_digit_sequence(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
