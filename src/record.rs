//! Immutable log records and call-site identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Placeholder used when the originating function cannot be resolved.
pub const UNRESOLVED_OPERATION: &str = "<unresolved>";

/// Identity of the code that emitted a record.
///
/// Preferred construction is static capture at the call site (the `log!`
/// macro family, or an explicit value passed to `log_from` when logging on
/// behalf of another component). [`Origin::caller`] is the fallback for
/// direct method calls: it yields the source file and line but no function
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
    /// Name of the logical origin (module path or type name).
    pub type_name: String,
    /// Name of the originating function or method.
    pub operation: String,
    /// Source line, best-effort.
    pub line: u32,
}

impl Origin {
    pub fn new(
        type_name: impl Into<String>,
        operation: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            operation: operation.into(),
            line,
        }
    }

    /// Best-effort identity derived from the caller's source location.
    ///
    /// The operation field degrades to [`UNRESOLVED_OPERATION`]; resolution
    /// never fails the log call.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self {
            type_name: location.file().to_string(),
            operation: UNRESOLVED_OPERATION.to_string(),
            line: location.line(),
        }
    }
}

/// One log event. Constructed once inside the pipeline; never mutated by
/// any consumer afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub level: Level,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub origin: Origin,
}

impl Record {
    /// Build a record from the resolved inputs. Arbitrary text, including
    /// empty, is accepted.
    pub fn new(
        level: Level,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        origin: Origin,
    ) -> Self {
        Self {
            level,
            text: text.into(),
            timestamp,
            origin,
        }
    }
}
