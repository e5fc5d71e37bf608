//! Laid-out pages and rectangular crops over them.

use std::fmt;

use thiserror::Error;

use crate::parser::layout::{PlacedSpan, SpanRow, TextLine};

/// A rectangle in page space: origin top-left, Y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CropBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        CropBox {
            left,
            top,
            right,
            bottom,
        }
    }

    fn is_degenerate(&self) -> bool {
        let finite = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite());
        !finite || self.left >= self.right || self.top >= self.bottom
    }

    /// Half-open vertical test on the row's centre.
    fn holds_row(&self, row: &SpanRow) -> bool {
        let cy = row.centre_y();
        cy >= self.top && cy < self.bottom
    }

    fn spans_column(&self, span: &PlacedSpan) -> bool {
        let cx = (span.x0 + span.x1) / 2.0;
        cx >= self.left && cx <= self.right
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.1}, {:.1}, {:.1}, {:.1}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    #[error("crop box {bbox} is not inside page {page} ({width:.1} x {height:.1})")]
    OutOfBounds {
        page: usize,
        bbox: CropBox,
        width: f32,
        height: f32,
    },
    #[error("crop box {0} has no area")]
    InvalidBox(CropBox),
    #[error("page {page} could not be laid out: {reason}")]
    PageFailed { page: usize, reason: String },
    #[error("no page {0}")]
    NoSuchPage(usize),
}

/// One page after layout. A page whose content stream could not be read is
/// kept so that page numbering stays aligned with the document.
#[derive(Debug, Clone)]
pub(crate) enum LaidPage {
    Ready {
        width: f32,
        height: f32,
        rows: Vec<SpanRow>,
    },
    Failed(String),
}

impl LaidPage {
    /// The rows whose vertical centre falls in `bbox`, each reduced to the
    /// spans whose horizontal centre is between its left and right edges.
    ///
    /// The box must lie within the page. The vertical test is half-open, so
    /// stacked boxes sharing an edge never return the same row twice, and a
    /// row is never split between them.
    pub(crate) fn crop(&self, page: usize, bbox: CropBox) -> Result<Vec<TextLine>, CropError> {
        let (width, height, rows) = match self {
            LaidPage::Ready {
                width,
                height,
                rows,
            } => (*width, *height, rows),
            LaidPage::Failed(reason) => {
                return Err(CropError::PageFailed {
                    page,
                    reason: reason.clone(),
                })
            }
        };

        if bbox.is_degenerate() {
            return Err(CropError::InvalidBox(bbox));
        }

        if bbox.left < 0.0 || bbox.top < 0.0 || bbox.right > width || bbox.bottom > height {
            return Err(CropError::OutOfBounds {
                page,
                bbox,
                width,
                height,
            });
        }

        Ok(rows
            .iter()
            .filter(|row| bbox.holds_row(row))
            .filter_map(|row| row.assemble(|span| bbox.spans_column(span)))
            .collect())
    }
}
