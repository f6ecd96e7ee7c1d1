pub mod field;
pub mod pdftotext;
pub mod table;

use crate::error::FakturaError;

/// A single word with its bounding box, in points from the top-left corner
/// of the page.
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Word {
    pub fn x_center(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    pub fn y_center(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct Page {
    pub number: usize,
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    pub words: Vec<Word>,
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned words from PDF bytes, returning one Page per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<Page>, FakturaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
