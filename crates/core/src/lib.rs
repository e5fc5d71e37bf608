//! Core library for gradscan
//!
//! This crate implements the **Functional Core** of the gradscan application:
//! recovering school-level remediation records from a report whose rows are
//! only delimited by their position on the page.
//!
//! # Architecture Overview
//!
//! - **`gradscan_core`** (this crate): the record-recovery engine, with zero
//!   knowledge of PDF files
//! - **`pdf_layout`**: turns PDF pages into positioned text lines
//! - **`gradscan`**: I/O and orchestration (the Imperative Shell)
//!
//! The layout engine reaches the core only through the
//! [`scan::LayoutSource`] trait, so every component here can be tested with
//! fixture lines.
//!
//! # Module Organization
//!
//! - [`classify`]: token-count dispatch and field mapping for one line
//! - [`tracker`]: the per-page parent row subordinate rows inherit from
//! - [`ledger`]: document-wide record keys, absorbing overlapping reads
//! - [`scan`]: the band scanner walking each page
//! - [`assemble`]: the final deduplication pass and output rows
//! - [`config`], [`year`]: scan geometry and the document year
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use gradscan_core::{recover, ScanConfig};
//!
//! let config = ScanConfig::default();
//! let year = gradscan_core::year::document_year(path, &config)?;
//! let recovered = recover(&layout, config, &year)?;
//! println!("{} records", recovered.finalized.records.len());
//! ```

pub mod assemble;
pub mod classify;
pub mod config;
pub mod error;
pub mod ledger;
pub mod record;
pub mod scan;
pub mod tracker;
pub mod year;

pub use assemble::{finalize, Finalized};
pub use classify::{classify, Classification, Rejection};
pub use config::ScanConfig;
pub use error::Error;
pub use record::{DedupKey, Metrics, OutputRow, Record, RecordSubtype, OUTPUT_COLUMNS};
pub use scan::{LayoutSource, PageEnd, PageSummary, Region, RegionError, ScanReport, Scanner};

/// Result of a full document scan.
#[derive(Debug, Clone)]
pub struct Recovered {
    pub finalized: Finalized,
    pub pages: Vec<PageSummary>,
    pub ledger_size: usize,
}

/// Scan every page of `source`, run the final pass, and fail with
/// [`Error::NoRecords`] when nothing was recovered.
pub fn recover(
    source: &dyn LayoutSource,
    config: ScanConfig,
    year: &str,
) -> Result<Recovered, Error> {
    config.validate()?;

    let report = Scanner::new(config, year).scan(source);
    let finalized = finalize(report.records);

    if finalized.is_empty() {
        return Err(Error::NoRecords);
    }

    Ok(Recovered {
        finalized,
        pages: report.pages,
        ledger_size: report.ledger_size,
    })
}
