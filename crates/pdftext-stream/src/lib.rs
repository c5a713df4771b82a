use std::path::Path;

use pdftext_core::{BackendError, PdfBackend};

/// Whole-document implementation of [`PdfBackend`] built on pdf-extract.
///
/// pdf-extract can panic on malformed input; callers going through
/// [`pdftext_core::Dispatcher`] get that turned into a
/// [`BackendError::Panicked`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamBackend;

impl StreamBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for StreamBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        pdf_extract::extract_text(path).map_err(|e| BackendError::Extraction(e.to_string()))
    }
}
