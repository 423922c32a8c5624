//! Record fan-out and the optional history buffer.
//!
//! Uses `parking_lot` for fast synchronous locking; publish snapshots the
//! handler list before fanning out, so an in-flight delivery sees the list
//! either before or after a concurrent mutation, never a torn state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::filter::LevelFilter;
use crate::handler::{FilteredHandler, Handler};
use crate::record::Record;

/// Owns the ordered handler collection and fans each published record out
/// to every handler in registration order.
pub struct Dispatcher {
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    history: RwLock<Vec<Record>>,
    store_history: AtomicBool,
    history_limit: Option<usize>,
}

impl Dispatcher {
    /// History retention defaults to off; when switched on, the buffer grows
    /// without bound unless a limit was set at construction.
    pub fn new() -> Self {
        Self::with_history_limit(None)
    }

    /// A `Some` limit caps the history buffer; the oldest records are
    /// drained once the cap is exceeded.
    pub fn with_history_limit(history_limit: Option<usize>) -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            history: RwLock::new(Vec::new()),
            store_history: AtomicBool::new(false),
            history_limit,
        }
    }

    /// Register a sink. Delivery order equals registration order; nothing
    /// deduplicates repeated registrations.
    pub fn add_handler(&self, handler: Arc<dyn Handler>) -> &Self {
        self.handlers.write().push(handler);
        self
    }

    /// Register a sink gated behind a level filter.
    pub fn add_filtered_handler(
        &self,
        handler: Arc<dyn Handler>,
        filter: LevelFilter,
    ) -> &Self {
        self.add_handler(Arc::new(FilteredHandler::new(handler, filter)))
    }

    /// Remove a previously registered sink by handle identity. Returns
    /// whether anything was removed; unknown handles are a silent no-op.
    pub fn remove_handler(&self, handler: &Arc<dyn Handler>) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| !Arc::ptr_eq(h, handler));
        handlers.len() != before
    }

    /// Number of currently registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Toggle whether published records are retained for enumeration.
    pub fn set_store_history(&self, store: bool) {
        self.store_history.store(store, Ordering::Relaxed);
    }

    pub fn store_history(&self) -> bool {
        self.store_history.load(Ordering::Relaxed)
    }

    /// Order-preserving snapshot of the retained records.
    pub fn history(&self) -> Vec<Record> {
        self.history.read().clone()
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    /// Fan a record out to every registered handler in registration order.
    ///
    /// A handler failure is reported through `tracing` and never suppresses
    /// delivery to the handlers after it.
    pub fn publish(&self, record: &Record) {
        if self.store_history.load(Ordering::Relaxed) {
            let mut history = self.history.write();
            history.push(record.clone());
            if let Some(limit) = self.history_limit {
                if history.len() > limit {
                    let excess = history.len() - limit;
                    history.drain(0..excess);
                }
            }
        }

        let handlers: Vec<Arc<dyn Handler>> = self.handlers.read().clone();
        for handler in handlers {
            if let Err(err) = handler.accept(record) {
                tracing::warn!("log handler failed, continuing fan-out: {}", err);
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
