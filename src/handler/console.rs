//! Console sink.

use std::io::Write;

use crate::format::{DefaultFormatter, Formatter};
use crate::handler::{Handler, HandlerError};
use crate::record::Record;

/// Which standard stream the handler writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

/// Writes one rendered line per record to stdout or stderr.
pub struct ConsoleHandler {
    formatter: Box<dyn Formatter>,
    stream: ConsoleStream,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            formatter: Box::new(DefaultFormatter),
            stream: ConsoleStream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            formatter: Box::new(DefaultFormatter),
            stream: ConsoleStream::Stderr,
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn accept(&self, record: &Record) -> Result<(), HandlerError> {
        let line = self.formatter.render(record);
        match self.stream {
            ConsoleStream::Stdout => {
                let stdout = std::io::stdout();
                let mut lock = stdout.lock();
                writeln!(lock, "{line}")?;
            }
            ConsoleStream::Stderr => {
                let stderr = std::io::stderr();
                let mut lock = stderr.lock();
                writeln!(lock, "{line}")?;
            }
        }
        Ok(())
    }
}
