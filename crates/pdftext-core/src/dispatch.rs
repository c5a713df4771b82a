use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::quiet::Quiet;
use crate::{BackendError, Outcome, PdfBackend, Strategy};

/// Record of one strategy tried during a dispatch.
#[derive(Debug)]
pub struct Attempt {
    pub strategy: Strategy,
    pub outcome: Outcome,
}

/// Successful extraction.
#[derive(Debug)]
pub struct Extraction {
    pub text: String,
    /// The strategy that produced `text`.
    pub strategy: Strategy,
    /// Strategies tried before `strategy`, in order. All of them produced no text.
    pub attempts: Vec<Attempt>,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("no strategy produced text for {}", .path.display())]
    Exhausted { path: PathBuf, attempts: Vec<Attempt> },
}

/// A strategy paired with its backend. `None` means the library is not available.
pub type ChainEntry = (Strategy, Option<Box<dyn PdfBackend>>);

/// Runs strategies in order until one returns non-empty text.
pub struct Dispatcher {
    chain: Vec<ChainEntry>,
}

impl Dispatcher {
    pub fn new(chain: Vec<ChainEntry>) -> Self {
        Self { chain }
    }

    /// Strategies in chain order with their availability.
    pub fn strategies(&self) -> impl Iterator<Item = (Strategy, bool)> + '_ {
        self.chain
            .iter()
            .map(|(strategy, backend)| (*strategy, backend.is_some()))
    }

    /// Extract text from `path`.
    ///
    /// Fails with [`ExtractError::NotFound`] before any backend runs if the
    /// path does not exist, and with [`ExtractError::Exhausted`] when every
    /// strategy comes back without text. Individual backend errors never
    /// escape this function.
    pub fn extract(&self, path: &Path) -> Result<Extraction, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let mut attempts = Vec::with_capacity(self.chain.len());
        for (strategy, backend) in &self.chain {
            let outcome = run_strategy(*strategy, backend.as_deref(), path);
            match outcome {
                Outcome::Text(text) => {
                    tracing::info!(
                        strategy = %strategy,
                        chars = text.chars().count(),
                        "extracted text"
                    );
                    return Ok(Extraction {
                        text,
                        strategy: *strategy,
                        attempts,
                    });
                }
                other => attempts.push(Attempt {
                    strategy: *strategy,
                    outcome: other,
                }),
            }
        }

        tracing::info!(path = %path.display(), "all strategies exhausted");
        Err(ExtractError::Exhausted {
            path: path.to_path_buf(),
            attempts,
        })
    }
}

/// Run one strategy and classify what it returned.
///
/// The backend runs with stdout and stderr silenced (see [`Quiet`]). Panics
/// raised inside it are caught and reported as [`BackendError::Panicked`].
pub fn run_strategy(
    strategy: Strategy,
    backend: Option<&dyn PdfBackend>,
    path: &Path,
) -> Outcome {
    let Some(backend) = backend else {
        tracing::debug!(
            strategy = %strategy,
            library = strategy.library(),
            "library unavailable"
        );
        return Outcome::Unavailable;
    };

    let result = {
        let _quiet = Quiet::new();
        panic::catch_unwind(AssertUnwindSafe(|| backend.extract_text(path)))
    }
    .unwrap_or_else(|payload| Err(BackendError::Panicked(panic_message(payload))));

    let outcome = Outcome::from_result(result);
    match &outcome {
        Outcome::Failed(e) => tracing::debug!(
            strategy = %strategy,
            library = strategy.library(),
            error = %e,
            "strategy failed"
        ),
        Outcome::Empty => tracing::debug!(
            strategy = %strategy,
            library = strategy.library(),
            "strategy returned no text"
        ),
        _ => {}
    }
    outcome
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted backend that counts how many times it was called.
    struct MockBackend {
        reply: Reply,
        calls: Arc<AtomicUsize>,
    }

    enum Reply {
        Text(&'static str),
        Fail,
        Panic,
    }

    impl PdfBackend for MockBackend {
        fn extract_text(&self, _path: &Path) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Text(t) => Ok(t.to_string()),
                Reply::Fail => Err(BackendError::Extraction("encrypted document".into())),
                Reply::Panic => panic!("corrupt xref table"),
            }
        }
    }

    fn mock(reply: Reply) -> (Option<Box<dyn PdfBackend>>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let backend = MockBackend {
            reply,
            calls: Arc::clone(&calls),
        };
        (Some(Box::new(backend)), calls)
    }

    fn existing_file() -> tempfile::NamedTempFile {
        tempfile::NamedTempFile::new().unwrap()
    }

    #[test]
    fn missing_path_fails_without_calling_backends() {
        let (b1, c1) = mock(Reply::Text("adobo"));
        let dispatcher = Dispatcher::new(vec![(Strategy::Layout, b1)]);

        let err = dispatcher
            .extract(Path::new("/definitely/not/here/recipes.pdf"))
            .unwrap_err();

        assert!(matches!(err, ExtractError::NotFound(_)));
        assert_eq!(c1.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn first_strategy_wins_and_later_ones_are_not_called() {
        let file = existing_file();
        let (b1, c1) = mock(Reply::Text("Chicken Adobo"));
        let (b2, c2) = mock(Reply::Text("Sinigang"));
        let (b3, c3) = mock(Reply::Text("Kare-Kare"));
        let dispatcher = Dispatcher::new(vec![
            (Strategy::Layout, b1),
            (Strategy::PageReader, b2),
            (Strategy::Stream, b3),
        ]);

        let extraction = dispatcher.extract(file.path()).unwrap();

        assert_eq!(extraction.text, "Chicken Adobo");
        assert_eq!(extraction.strategy, Strategy::Layout);
        assert!(extraction.attempts.is_empty());
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 0);
        assert_eq!(c3.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_first_result_falls_through_to_second() {
        let file = existing_file();
        let (b1, _) = mock(Reply::Text(""));
        let (b2, _) = mock(Reply::Text("Sinigang na baboy"));
        let (b3, c3) = mock(Reply::Text("unused"));
        let dispatcher = Dispatcher::new(vec![
            (Strategy::Layout, b1),
            (Strategy::PageReader, b2),
            (Strategy::Stream, b3),
        ]);

        let extraction = dispatcher.extract(file.path()).unwrap();

        assert_eq!(extraction.text, "Sinigang na baboy");
        assert_eq!(extraction.strategy, Strategy::PageReader);
        assert_eq!(extraction.attempts.len(), 1);
        assert!(matches!(extraction.attempts[0].outcome, Outcome::Empty));
        assert_eq!(c3.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn all_empty_or_failing_is_exhausted() {
        let file = existing_file();
        let (b1, c1) = mock(Reply::Fail);
        let (b2, c2) = mock(Reply::Text(""));
        let (b3, c3) = mock(Reply::Panic);
        let dispatcher = Dispatcher::new(vec![
            (Strategy::Layout, b1),
            (Strategy::PageReader, b2),
            (Strategy::Stream, b3),
        ]);

        let err = dispatcher.extract(file.path()).unwrap_err();

        let attempts = match err {
            ExtractError::Exhausted { attempts, .. } => attempts,
            other => panic!("expected Exhausted, got {other:?}"),
        };
        let labels: Vec<_> = attempts.iter().map(|a| a.outcome.label()).collect();
        assert_eq!(labels, ["failed", "empty", "failed"]);
        assert_eq!(c1.load(Ordering::SeqCst), 1);
        assert_eq!(c2.load(Ordering::SeqCst), 1);
        assert_eq!(c3.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unavailable_and_failed_both_advance() {
        let file = existing_file();

        let (fail, _) = mock(Reply::Fail);
        let (ok_a, _) = mock(Reply::Text("Pancit"));
        let with_failure = Dispatcher::new(vec![
            (Strategy::Layout, fail),
            (Strategy::PageReader, ok_a),
        ]);

        let (ok_b, _) = mock(Reply::Text("Pancit"));
        let with_missing = Dispatcher::new(vec![
            (Strategy::Layout, None),
            (Strategy::PageReader, ok_b),
        ]);

        let a = with_failure.extract(file.path()).unwrap();
        let b = with_missing.extract(file.path()).unwrap();

        assert_eq!(a.text, b.text);
        assert_eq!(a.strategy, b.strategy);
        assert!(matches!(b.attempts[0].outcome, Outcome::Unavailable));
    }

    #[test]
    fn panicking_backend_is_reported_as_failure() {
        let file = existing_file();
        let (b1, _) = mock(Reply::Panic);

        let outcome = run_strategy(Strategy::Stream, b1.as_deref(), file.path());

        match outcome {
            Outcome::Failed(BackendError::Panicked(msg)) => {
                assert!(msg.contains("corrupt xref table"))
            }
            other => panic!("expected panic failure, got {other:?}"),
        }
    }

    #[test]
    fn repeated_extraction_is_identical() {
        let file = existing_file();
        let (b1, _) = mock(Reply::Text("Lumpiang Shanghai"));
        let dispatcher = Dispatcher::new(vec![(Strategy::Layout, b1)]);

        let first = dispatcher.extract(file.path()).unwrap();
        let second = dispatcher.extract(file.path()).unwrap();

        assert_eq!(first.text, second.text);
    }

    #[test]
    fn strategies_reports_availability() {
        let (b2, _) = mock(Reply::Text("x"));
        let dispatcher = Dispatcher::new(vec![
            (Strategy::Layout, None),
            (Strategy::PageReader, b2),
        ]);

        let report: Vec<_> = dispatcher.strategies().collect();

        assert_eq!(
            report,
            [(Strategy::Layout, false), (Strategy::PageReader, true)]
        );
    }
}
