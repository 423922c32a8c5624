//! logcast: a process-wide log dispatch pipeline.
//!
//! Callers emit leveled messages; the pipeline resolves call-site identity,
//! builds an immutable [`Record`], and fans it out to every registered
//! [`Handler`] in registration order, optionally gated per-sink by a
//! [`LevelFilter`]. Installed [`Module`]s observe each accepted call through
//! lifecycle hooks without participating in delivery.
//!
//! Everything runs synchronously on the calling thread; there is no runtime,
//! no background work, and a plain log call never returns an error.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use logcast::{Level, LevelFilter, Pipeline, PipelineConfig, TracingHandler};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! pipeline
//!     .dispatcher()
//!     .add_handler(Arc::new(TracingHandler::new()))
//!     .add_filtered_handler(
//!         Arc::new(TracingHandler::new()),
//!         LevelFilter::at_or_above(Level::Error),
//!     );
//! pipeline.log(Level::Info, "ready");
//! ```
//!
//! The crate also carries one default pipeline per process, reachable through
//! [`pipeline()`] and the [`log!`] macro:
//!
//! ```
//! logcast::log!(logcast::Level::Info, "cache warmed in {}ms", 12);
//! ```

pub mod config;
pub mod dispatch;
pub mod filter;
pub mod format;
pub mod handler;
pub mod level;
pub mod module;
pub mod pipeline;
pub mod record;

pub use config::PipelineConfig;
pub use dispatch::Dispatcher;
pub use filter::{FilterPolicy, LevelFilter};
pub use format::{DefaultFormatter, Formatter, JsonFormatter};
pub use handler::{
    ConsoleHandler, ConsoleStream, FileHandler, FilteredHandler, Handler, HandlerError,
    TracingHandler,
};
pub use level::{Level, ParseLevelError};
pub use module::{DigestModule, DigestSink, Module, ModuleError, ModuleRegistry};
pub use pipeline::{Pipeline, NO_MESSAGE_TEXT};
pub use record::{Origin, Record, UNRESOLVED_OPERATION};

use std::sync::OnceLock;

/// The process-wide default pipeline.
static PIPELINE: OnceLock<Pipeline> = OnceLock::new();

/// Initialize the default pipeline with an explicit configuration.
///
/// The first initializer wins; if the pipeline was already constructed (by
/// an earlier `init` or any other crate-level call), the existing instance
/// is returned and `config` is dropped.
pub fn init(config: PipelineConfig) -> &'static Pipeline {
    PIPELINE.get_or_init(|| Pipeline::new(config))
}

/// The default pipeline, constructed on first use from `LOGCAST_*`
/// environment variables.
pub fn pipeline() -> &'static Pipeline {
    PIPELINE.get_or_init(|| Pipeline::new(PipelineConfig::from_env()))
}

/// Emit `text` at `level` on the default pipeline.
#[track_caller]
pub fn log(level: Level, text: impl Into<String>) {
    pipeline().log(level, text);
}

/// Emit `text` at the default pipeline's default level.
#[track_caller]
pub fn log_default(text: impl Into<String>) {
    pipeline().log_default(text);
}

/// Emit the fixed placeholder text at the default level.
#[track_caller]
pub fn log_empty() {
    pipeline().log_empty();
}

/// Emit the error at `Error` level, then route it to every installed
/// module's `on_exception` hook.
#[track_caller]
pub fn log_error(error: &(dyn std::error::Error)) -> Result<(), ModuleError> {
    pipeline().log_error(error)
}

/// Emit with a caller-pinned [`Origin`] on the default pipeline.
pub fn log_from(origin: Origin, level: Level, text: impl Into<String>) {
    pipeline().log_from(origin, level, text);
}

/// Enable logging on the default pipeline.
pub fn on() {
    pipeline().on();
}

/// Disable logging on the default pipeline.
pub fn off() {
    pipeline().off();
}

/// Enable `Debug`-level logging on the default pipeline.
pub fn debug_on() {
    pipeline().debug_on();
}

/// Suppress `Debug`-level logging on the default pipeline.
pub fn debug_off() {
    pipeline().debug_off();
}

/// Level used by the default pipeline when a call omits one.
pub fn default_level() -> Level {
    pipeline().default_level()
}

pub fn set_default_level(level: Level) {
    pipeline().set_default_level(level);
}

/// Toggle history retention on the default pipeline.
pub fn set_store_history(store: bool) {
    pipeline().dispatcher().set_store_history(store);
}

/// Order-preserving snapshot of the default pipeline's retained records.
pub fn history() -> Vec<Record> {
    pipeline().dispatcher().history()
}

/// Emit on the default pipeline with statically captured call-site identity
/// (module path, enclosing function, line).
///
/// The format arguments are only evaluated when the gate allows the level.
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)*) => {{
        let __pipeline = $crate::pipeline();
        let __level = $level;
        if __pipeline.enabled_for(__level) {
            __pipeline.log_from($crate::origin!(), __level, format!($($arg)*));
        }
    }};
}

/// Build an [`Origin`] for the enclosing call site.
#[macro_export]
macro_rules! origin {
    () => {
        $crate::Origin::new(module_path!(), $crate::__function_name!(), line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = name.strip_suffix("::f").unwrap_or(name);
        match name.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }};
}
