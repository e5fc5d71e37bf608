//! Bridge between the PDF layout engine and the record scanner.

use gradscan_core::{LayoutSource, Region, RegionError};
use pdf_layout::{CropBox, CropError, LaidOutDocument};

/// A laid-out PDF seen as a [`LayoutSource`].
pub struct PdfPages(pub LaidOutDocument);

impl LayoutSource for PdfPages {
    fn page_count(&self) -> usize {
        self.0.page_count()
    }

    fn lines_in(&self, page: usize, region: Region) -> Result<Vec<String>, RegionError> {
        let bbox = CropBox::new(region.left, region.top, region.right, region.bottom);
        let lines = self.0.crop_lines(page, bbox).map_err(region_error)?;
        Ok(lines.into_iter().map(|line| line.text).collect())
    }
}

fn region_error(err: CropError) -> RegionError {
    match err {
        CropError::OutOfBounds { .. } => RegionError::OutOfRange,
        CropError::InvalidBox(_) => RegionError::Geometry(err.to_string()),
        CropError::PageFailed { .. } | CropError::NoSuchPage(_) => {
            RegionError::Unavailable(err.to_string())
        }
    }
}
