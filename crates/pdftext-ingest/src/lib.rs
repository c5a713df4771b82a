use std::path::Path;

pub use pdftext_core::{
    Attempt, BackendError, ChainEntry, Dispatcher, ExtractError, Extraction, Outcome, PdfBackend,
    Strategy,
};

/// Backend for `strategy`, or `None` if its library was not compiled in.
///
/// Availability is fixed at build time by this crate's `mupdf`, `lopdf` and
/// `stream` features.
pub fn backend_for(strategy: Strategy) -> Option<Box<dyn PdfBackend>> {
    match strategy {
        Strategy::Layout => layout_backend(),
        Strategy::PageReader => page_reader_backend(),
        Strategy::Stream => stream_backend(),
    }
}

/// The full chain in [`Strategy::ORDER`], with unavailable backends as `None`.
pub fn available_backends() -> Vec<ChainEntry> {
    Strategy::ORDER
        .iter()
        .map(|&strategy| (strategy, backend_for(strategy)))
        .collect()
}

pub fn default_dispatcher() -> Dispatcher {
    let chain = available_backends();
    for (strategy, backend) in &chain {
        if backend.is_none() {
            tracing::debug!(
                strategy = %strategy,
                library = strategy.library(),
                "backend not compiled in"
            );
        }
    }
    Dispatcher::new(chain)
}

/// Extract text from a PDF using every available strategy in order.
///
/// - layout-aware (MuPDF)
/// - generic page reader (lopdf)
/// - whole-document stream (pdf-extract)
pub fn extract_text(path: &Path) -> Result<Extraction, ExtractError> {
    default_dispatcher().extract(path)
}

#[cfg(feature = "mupdf")]
fn layout_backend() -> Option<Box<dyn PdfBackend>> {
    Some(Box::new(pdftext_mupdf::MupdfBackend::new()))
}

#[cfg(not(feature = "mupdf"))]
fn layout_backend() -> Option<Box<dyn PdfBackend>> {
    None
}

#[cfg(feature = "lopdf")]
fn page_reader_backend() -> Option<Box<dyn PdfBackend>> {
    Some(Box::new(pdftext_lopdf::LopdfBackend::new()))
}

#[cfg(not(feature = "lopdf"))]
fn page_reader_backend() -> Option<Box<dyn PdfBackend>> {
    None
}

#[cfg(feature = "stream")]
fn stream_backend() -> Option<Box<dyn PdfBackend>> {
    Some(Box::new(pdftext_stream::StreamBackend::new()))
}

#[cfg(not(feature = "stream"))]
fn stream_backend() -> Option<Box<dyn PdfBackend>> {
    None
}
