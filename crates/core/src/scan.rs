//! Band scanner.
//!
//! Each page is read as a sequence of fixed-height horizontal bands. The
//! step between two bands equals the band height, but nothing guarantees
//! that a band boundary falls between two text lines, so a line may come
//! back from two neighbouring bands. The [`DedupLedger`] absorbs those
//! repeats; the scanner itself does no geometric bookkeeping.
//!
//! ```text
//! page N:  reset tracker
//!          band 0  [top, top + h)      -> lines -> classify
//!          band 1  [top + h, top + 2h) -> lines -> classify
//!          ...     until no lines, out of range, error, or ceiling
//! ```

use std::fmt;

use crate::classify::{classify, Classification};
use crate::config::ScanConfig;
use crate::ledger::DedupLedger;
use crate::record::Record;
use crate::tracker::PageState;

/// A rectangle in page coordinates, measured from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Region {
    /// Move the region down by `dy` points.
    pub fn shifted(self, dy: f32) -> Self {
        Region {
            top: self.top + dy,
            bottom: self.bottom + dy,
            ..self
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}, {:.1})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Why a region could not be read.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionError {
    /// The region extends past the page. This is how a page normally ends.
    OutOfRange,
    /// The layout engine rejected the region's geometry.
    Geometry(String),
    /// The page itself could not be laid out.
    Unavailable(String),
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::OutOfRange => write!(f, "region lies outside the page"),
            RegionError::Geometry(msg) => write!(f, "unexpected geometry: {msg}"),
            RegionError::Unavailable(msg) => write!(f, "page unavailable: {msg}"),
        }
    }
}

impl std::error::Error for RegionError {}

/// The layout engine as seen by the scanner.
///
/// Pages are numbered from 1. `lines_in` returns the text of every line
/// whose geometry falls inside `region`, top to bottom.
pub trait LayoutSource {
    fn page_count(&self) -> usize;

    fn lines_in(&self, page: usize, region: Region) -> Result<Vec<String>, RegionError>;
}

/// How the scan of a page stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEnd {
    /// A band came back empty.
    Exhausted,
    /// A band reached past the bottom of the page.
    OutOfRange,
    /// The page was given up; records accepted before the failure are kept.
    Aborted(RegionError),
    /// `max_bands_per_page` bands were read without the page ending.
    CeilingReached,
}

impl fmt::Display for PageEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEnd::Exhausted => write!(f, "exhausted"),
            PageEnd::OutOfRange => write!(f, "end of page"),
            PageEnd::Aborted(err) => write!(f, "aborted ({err})"),
            PageEnd::CeilingReached => write!(f, "band ceiling reached"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub page: usize,
    /// Bands that returned lines.
    pub bands: usize,
    pub accepted: usize,
    pub end: PageEnd,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub records: Vec<Record>,
    pub pages: Vec<PageSummary>,
    /// Keys in the ledger at the end of the scan.
    pub ledger_size: usize,
}

/// Walks every page of a document and collects accepted records.
///
/// Owns the per-page [`PageState`] and the per-document [`DedupLedger`].
pub struct Scanner {
    config: ScanConfig,
    year: String,
    state: PageState,
    ledger: DedupLedger,
}

impl Scanner {
    pub fn new(config: ScanConfig, year: impl Into<String>) -> Self {
        Scanner {
            config,
            year: year.into(),
            state: PageState::new(),
            ledger: DedupLedger::new(),
        }
    }

    fn first_band(&self) -> Region {
        Region {
            left: self.config.left,
            top: self.config.initial_top,
            right: self.config.right,
            bottom: self.config.initial_top + self.config.band_height,
        }
    }

    /// Scan the whole document. Never fails; per-page problems end up in the
    /// page summaries.
    pub fn scan(mut self, source: &dyn LayoutSource) -> ScanReport {
        let page_count = source.page_count();
        let mut records = Vec::new();
        let mut pages = Vec::with_capacity(page_count);

        log::info!("scanning {page_count} page(s) for year {}", self.year);

        for page in 1..=page_count {
            let summary = self.scan_page(source, page, &mut records);
            log::info!(
                "page {page}: {} record(s) from {} band(s), {}",
                summary.accepted,
                summary.bands,
                summary.end
            );
            pages.push(summary);
        }

        ScanReport {
            records,
            pages,
            ledger_size: self.ledger.len(),
        }
    }

    /// Scan one page, appending accepted records to `records`.
    pub fn scan_page(
        &mut self,
        source: &dyn LayoutSource,
        page: usize,
        records: &mut Vec<Record>,
    ) -> PageSummary {
        self.state.reset();

        let mut region = self.first_band();
        let mut bands = 0;
        let mut accepted = 0;

        for band in 0..self.config.max_bands_per_page {
            let lines = match source.lines_in(page, region) {
                Ok(lines) => lines,
                Err(RegionError::OutOfRange) => {
                    log::debug!("page {page} band {band}: {region} is past the page end");
                    return summary(page, bands, accepted, PageEnd::OutOfRange);
                }
                Err(err) => {
                    log::warn!("page {page} band {band}: aborting page, {err}");
                    return summary(page, bands, accepted, PageEnd::Aborted(err));
                }
            };

            if lines.is_empty() {
                log::debug!("page {page} band {band}: {region} is empty");
                return summary(page, bands, accepted, PageEnd::Exhausted);
            }

            bands += 1;
            log::debug!("page {page} band {band}: {} line(s) in {region}", lines.len());

            for line in &lines {
                match classify(line, &mut self.state, &mut self.ledger, &self.year) {
                    Classification::Rejected(reason) => {
                        log::trace!("page {page} band {band}: skipped '{line}': {reason}");
                    }
                    Classification::Primary(record) | Classification::Subordinate(record) => {
                        records.push(record);
                        accepted += 1;
                    }
                }
            }

            region = region.shifted(self.config.band_height);
        }

        log::warn!(
            "page {page}: stopped after {} band(s) without reaching the end of the page",
            self.config.max_bands_per_page
        );
        summary(page, bands, accepted, PageEnd::CeilingReached)
    }
}

fn summary(page: usize, bands: usize, accepted: usize, end: PageEnd) -> PageSummary {
    PageSummary {
        page,
        bands,
        accepted,
        end,
    }
}
