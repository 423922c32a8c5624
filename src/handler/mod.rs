//! Record sinks and the filtered-delivery decorator.
//!
//! A handler is the single extension point for external disposition of log
//! records (console, file, whatever the host wires in). The dispatcher
//! guarantees a failing handler never suppresses delivery to the handlers
//! registered after it; implementations own their I/O failures beyond that.

mod console;
mod file;
mod tracing_bridge;

pub use console::{ConsoleHandler, ConsoleStream};
pub use file::FileHandler;
pub use tracing_bridge::TracingHandler;

use std::sync::Arc;

use thiserror::Error;

use crate::filter::LevelFilter;
use crate::record::Record;

/// Errors a sink can surface from [`Handler::accept`].
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Sink I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sink failure: {0}")]
    Sink(String),
}

/// A consumer of published records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; delivery happens on whichever
/// thread emitted the record.
pub trait Handler: Send + Sync {
    /// Dispose of one record. May perform arbitrary I/O.
    fn accept(&self, record: &Record) -> Result<(), HandlerError>;
}

/// Decorator that gates an inner handler behind a level filter.
///
/// On rejection the wrapped handler is simply skipped; no error, no side
/// effect.
pub struct FilteredHandler {
    filter: LevelFilter,
    inner: Arc<dyn Handler>,
}

impl FilteredHandler {
    pub fn new(inner: Arc<dyn Handler>, filter: LevelFilter) -> Self {
        Self { filter, inner }
    }

    pub fn filter(&self) -> LevelFilter {
        self.filter
    }
}

impl Handler for FilteredHandler {
    fn accept(&self, record: &Record) -> Result<(), HandlerError> {
        if !self.filter.accepts(record.level) {
            return Ok(());
        }
        self.inner.accept(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::record::Origin;
    use chrono::Utc;
    use parking_lot::Mutex;

    struct Recording(Mutex<Vec<Level>>);

    impl Handler for Recording {
        fn accept(&self, record: &Record) -> Result<(), HandlerError> {
            self.0.lock().push(record.level);
            Ok(())
        }
    }

    fn record(level: Level) -> Record {
        Record::new(level, "x", Utc::now(), Origin::new("t", "op", 1))
    }

    #[test]
    fn rejection_skips_inner_without_error() {
        let inner = Arc::new(Recording(Mutex::new(Vec::new())));
        let filtered =
            FilteredHandler::new(inner.clone(), LevelFilter::exactly(Level::Warning));

        filtered.accept(&record(Level::Error)).unwrap();
        assert!(inner.0.lock().is_empty());

        filtered.accept(&record(Level::Warning)).unwrap();
        assert_eq!(*inner.0.lock(), vec![Level::Warning]);
    }
}
