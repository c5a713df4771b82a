use std::fmt;

use crate::BackendError;

/// One way of extracting text from a PDF, backed by a specific library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Page-by-page extraction that walks text blocks and lines (MuPDF).
    Layout,
    /// Reader built over the raw file stream, text pulled page by page (lopdf).
    PageReader,
    /// Whole-document extraction in a single call (pdf-extract).
    Stream,
}

impl Strategy {
    /// Fixed priority order. Strict fallback, no scoring.
    pub const ORDER: [Strategy; 3] = [Strategy::Layout, Strategy::PageReader, Strategy::Stream];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Layout => "layout",
            Strategy::PageReader => "page-reader",
            Strategy::Stream => "stream",
        }
    }

    /// Name of the crate providing this strategy.
    pub fn library(self) -> &'static str {
        match self {
            Strategy::Layout => "mupdf",
            Strategy::PageReader => "lopdf",
            Strategy::Stream => "pdf-extract",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running a single strategy.
///
/// Only `Text` stops the fallback chain; every other variant advances to the
/// next strategy.
#[derive(Debug)]
pub enum Outcome {
    Text(String),
    /// The backend ran but produced zero characters.
    Empty,
    /// The backing library was not compiled in.
    Unavailable,
    Failed(BackendError),
}

impl Outcome {
    /// Classify a backend return value.
    pub fn from_result(result: Result<String, BackendError>) -> Self {
        match result {
            Ok(text) if text.is_empty() => Outcome::Empty,
            Ok(text) => Outcome::Text(text),
            Err(e) => Outcome::Failed(e),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Outcome::Text(_))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Text(_) => "text",
            Outcome::Empty => "empty",
            Outcome::Unavailable => "unavailable",
            Outcome::Failed(_) => "failed",
        }
    }
}
