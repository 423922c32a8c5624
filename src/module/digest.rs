//! Digest module: turns recent activity into a deliverable summary.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::format::{DefaultFormatter, Formatter};
use crate::module::{Module, ModuleError};
use crate::record::Record;

const DEFAULT_CAPACITY: usize = 100;

/// Delivery seam for a rendered digest (mail relay, ticket system, a file;
/// transport is the sink's business).
pub trait DigestSink: Send + Sync {
    fn deliver(&self, subject: &str, body: &str) -> Result<(), ModuleError>;
}

/// Keeps a bounded ring of recently observed records and, when an error is
/// routed through the exception entry, renders them into a digest and hands
/// it to the configured sink.
///
/// Invoking the exception hook with no sink configured is a hard failure
/// surfaced to the caller, not a silent skip.
pub struct DigestModule {
    subject: String,
    capacity: usize,
    recent: Mutex<VecDeque<Record>>,
    formatter: Box<dyn Formatter>,
    sink: Option<Arc<dyn DigestSink>>,
}

impl DigestModule {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            capacity: DEFAULT_CAPACITY,
            recent: Mutex::new(VecDeque::new()),
            formatter: Box::new(DefaultFormatter),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DigestSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    fn render_body(&self, error: &(dyn std::error::Error)) -> String {
        let recent = self.recent.lock();
        let mut body = String::new();
        body.push_str(&format!("Exception: {}\n\n", error));
        for record in recent.iter() {
            body.push_str(&self.formatter.render(record));
            body.push('\n');
        }
        body
    }
}

impl Module for DigestModule {
    fn name(&self) -> &str {
        "digest"
    }

    fn after_log(&self, record: &Record) -> Result<(), ModuleError> {
        let mut recent = self.recent.lock();
        recent.push_back(record.clone());
        while recent.len() > self.capacity {
            recent.pop_front();
        }
        Ok(())
    }

    fn on_exception(&self, error: &(dyn std::error::Error)) -> Result<(), ModuleError> {
        let sink = self.sink.as_ref().ok_or_else(|| {
            ModuleError::Misconfigured("digest module has no delivery sink".to_string())
        })?;
        sink.deliver(&self.subject, &self.render_body(error))
    }
}
