//! Sink that forwards records into the `tracing` facade.

use crate::format::{DefaultFormatter, Formatter};
use crate::handler::{Handler, HandlerError};
use crate::level::Level;
use crate::record::Record;

/// Maps record levels onto `tracing` events, letting a host that already
/// runs a subscriber collect pipeline output without a second sink stack.
pub struct TracingHandler {
    formatter: Box<dyn Formatter>,
}

impl TracingHandler {
    pub fn new() -> Self {
        Self {
            formatter: Box::new(DefaultFormatter),
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Default for TracingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for TracingHandler {
    fn accept(&self, record: &Record) -> Result<(), HandlerError> {
        let line = self.formatter.render(record);
        match record.level {
            Level::Severe | Level::Error => tracing::error!("{}", line),
            Level::Warning => tracing::warn!("{}", line),
            Level::Info => tracing::info!("{}", line),
            Level::Fine | Level::Debug => tracing::debug!("{}", line),
            Level::None => tracing::trace!("{}", line),
        }
        Ok(())
    }
}
