//! Positioned text lines from PDF pages.
//!
//! Every page is laid out once, when the document is opened. Callers then
//! ask for the lines inside a rectangle with [`LaidOutDocument::crop_lines`].

use std::path::Path;

use thiserror::Error;

use parser::backend::{LopdfBackend, PageId, PdfBackend};
use parser::layout::{extract_page_spans, group_into_rows, PlacedSpan};

pub mod page;
pub mod parser;

pub use page::{CropBox, CropError};
pub use parser::layout::TextLine;

use page::LaidPage;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// A PDF document with the text of every page placed in page space.
///
/// Pages are numbered from 1, as printed.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    pages: Vec<LaidPage>,
}

impl LaidOutDocument {
    /// Read and lay out the PDF at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PdfError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes)
    }

    /// Parse PDF bytes and lay out every page.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PdfError> {
        let backend = LopdfBackend::load_bytes(bytes)?;
        Ok(Self::from_backend(&backend))
    }

    /// Lay out every page the backend knows about.
    ///
    /// A page that fails is kept as a failed page and reported on every crop
    /// instead of failing the whole document.
    pub fn from_backend(backend: &dyn PdfBackend) -> Self {
        let pages = backend
            .pages()
            .into_iter()
            .map(|(number, id)| match lay_out_page(backend, id) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("page {number}: {e}");
                    LaidPage::Failed(e.to_string())
                }
            })
            .collect();

        LaidOutDocument { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The lines of `page` whose text falls inside `bbox`, top to bottom.
    pub fn crop_lines(&self, page: usize, bbox: CropBox) -> Result<Vec<TextLine>, CropError> {
        let laid = page
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .ok_or(CropError::NoSuchPage(page))?;
        laid.crop(page, bbox)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn lay_out_page(backend: &dyn PdfBackend, page: PageId) -> Result<LaidPage, PdfError> {
    let media_box = backend.page_box(page)?;
    let [llx, lly, urx, ury] = media_box;

    let spans = extract_page_spans(backend, page)?
        .iter()
        .map(|span| PlacedSpan::place(span, media_box))
        .collect();

    Ok(LaidPage::Ready {
        width: urx - llx,
        height: ury - lly,
        rows: group_into_rows(spans),
    })
}
