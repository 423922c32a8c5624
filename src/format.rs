//! Record rendering for text-oriented sinks.

use crate::record::Record;

/// Renders a record to a single human-readable line.
///
/// Implementations must be pure: no side effects, no interior state. The
/// exact layout is sink-defined.
pub trait Formatter: Send + Sync {
    fn render(&self, record: &Record) -> String;
}

/// Timestamp, level, origin, text on one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn render(&self, record: &Record) -> String {
        format!(
            "[{}] {} {}.{}:{} - {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f UTC"),
            record.level,
            record.origin.type_name,
            record.origin.operation,
            record.origin.line,
            record.text
        )
    }
}

/// Serde representation of the record, one JSON object per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn render(&self, record: &Record) -> String {
        // Record serialization has no fallible shapes, but a formatter must
        // not fail the sink either way.
        serde_json::to_string(record).unwrap_or_else(|_| DefaultFormatter.render(record))
    }
}
