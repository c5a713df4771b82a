use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
    #[error("backend panicked: {0}")]
    Panicked(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for PDF text extraction backends.
///
/// Each implementor wraps exactly one third-party library. Backends report
/// failures through [`BackendError`]; turning those into "try the next
/// strategy" is the job of [`crate::Dispatcher`].
pub trait PdfBackend: Send + Sync {
    /// Extract the full text content of a PDF file.
    ///
    /// An `Ok("")` return is legal and means the document carried no text
    /// layer (e.g. a scanned image).
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
