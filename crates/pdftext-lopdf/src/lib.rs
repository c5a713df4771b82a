use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lopdf::Document;

use pdftext_core::{BackendError, PdfBackend};

/// Generic page-reader implementation of [`PdfBackend`] built on lopdf.
///
/// The file is opened in binary mode and handed to lopdf as a byte stream;
/// text is then pulled one page at a time in page-number order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfBackend;

impl LopdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for LopdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let file = File::open(path)?;
        let document = Document::load_from(BufReader::new(file))
            .map_err(|e| BackendError::Open(e.to_string()))?;
        read_pages(&document)
    }
}

/// Concatenate the text of every page, in page order.
fn read_pages(document: &Document) -> Result<String, BackendError> {
    let pages = document.get_pages();
    tracing::trace!(pages = pages.len(), "lopdf document loaded");

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| BackendError::Extraction(format!("page {page_number}: {e}")))?;
        text.push_str(&page_text);
    }
    Ok(text)
}
