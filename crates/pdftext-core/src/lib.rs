//! Core types for fallback PDF text extraction.
//!
//! A [`Dispatcher`] holds an ordered chain of [`Strategy`]s, each backed by an
//! optional [`PdfBackend`]. It returns the text of the first strategy that
//! produces any, and otherwise reports why every strategy came up empty.

pub mod backend;
pub mod dispatch;
pub mod quiet;
pub mod strategy;

pub use backend::{BackendError, PdfBackend};
pub use dispatch::{Attempt, ChainEntry, Dispatcher, ExtractError, Extraction, run_strategy};
pub use quiet::Quiet;
pub use strategy::{Outcome, Strategy};
