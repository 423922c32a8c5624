//! The pipeline facade: gating, call-site resolution, record construction,
//! and sequencing of module hooks around handler fan-out.
//!
//! Per accepted call: gate check, timestamp capture, `before_log`, record
//! construction, publish, `after_log`. The gate is evaluated before any
//! resolution work so disabled logging stays cheap.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::RwLock;

use crate::config::PipelineConfig;
use crate::dispatch::Dispatcher;
use crate::handler::{ConsoleHandler, FileHandler, HandlerError};
use crate::level::Level;
use crate::module::{ModuleError, ModuleRegistry};
use crate::record::{Origin, Record};

/// Text emitted by [`Pipeline::log_empty`].
pub const NO_MESSAGE_TEXT: &str = "There is no message";

/// One logging pipeline: global gate flags, the dispatcher, and the module
/// registry.
///
/// Hosts normally construct one per process (or use the crate-level global
/// instance); nothing prevents several independent pipelines.
pub struct Pipeline {
    dispatcher: Dispatcher,
    modules: ModuleRegistry,
    enabled: AtomicBool,
    debug_enabled: AtomicBool,
    default_level: RwLock<Level>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let dispatcher = Dispatcher::with_history_limit(config.history_limit);
        dispatcher.set_store_history(config.store_history);
        Self {
            dispatcher,
            modules: ModuleRegistry::new(),
            enabled: AtomicBool::new(config.enabled),
            debug_enabled: AtomicBool::new(config.debug_enabled),
            default_level: RwLock::new(config.default_level),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Wire a console sink and a file sink, then announce readiness with one
    /// Info record.
    pub fn install_default_handlers(
        &self,
        log_path: impl AsRef<std::path::Path>,
    ) -> Result<(), HandlerError> {
        let file = FileHandler::create(log_path)?;
        self.dispatcher
            .add_handler(std::sync::Arc::new(ConsoleHandler::new()))
            .add_handler(std::sync::Arc::new(file));
        self.log(Level::Info, "Default initialization");
        Ok(())
    }

    // --- gating -----------------------------------------------------------

    /// Enable logging globally.
    pub fn on(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Disable logging globally: subsequent calls build no record, fire no
    /// hook, invoke no handler.
    pub fn off(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    pub fn is_on(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enable `Debug`-level logging.
    pub fn debug_on(&self) {
        self.debug_enabled.store(true, Ordering::Relaxed);
    }

    /// Suppress `Debug`-level calls while leaving other levels delivered.
    pub fn debug_off(&self) {
        self.debug_enabled.store(false, Ordering::Relaxed);
    }

    pub fn is_debug_on(&self) -> bool {
        self.debug_enabled.load(Ordering::Relaxed)
    }

    /// Level used when a call does not name one.
    pub fn default_level(&self) -> Level {
        *self.default_level.read()
    }

    pub fn set_default_level(&self, level: Level) {
        *self.default_level.write() = level;
    }

    /// Whether the gate currently lets `level` through. Evaluated before
    /// any resolution work on every entry point.
    pub fn enabled_for(&self, level: Level) -> bool {
        if !self.enabled.load(Ordering::Relaxed) {
            return false;
        }
        level != Level::Debug || self.debug_enabled.load(Ordering::Relaxed)
    }

    // --- entry points -----------------------------------------------------

    /// Emit `text` at `level`, resolving the call site from the caller's
    /// source location.
    #[track_caller]
    pub fn log(&self, level: Level, text: impl Into<String>) {
        if !self.enabled_for(level) {
            return;
        }
        self.dispatch(Origin::caller(), level, text.into());
    }

    /// Emit `text` at the configured default level.
    #[track_caller]
    pub fn log_default(&self, text: impl Into<String>) {
        let level = self.default_level();
        if !self.enabled_for(level) {
            return;
        }
        self.dispatch(Origin::caller(), level, text.into());
    }

    /// Emit the fixed placeholder text at the default level.
    #[track_caller]
    pub fn log_empty(&self) {
        let level = self.default_level();
        if !self.enabled_for(level) {
            return;
        }
        self.dispatch(Origin::caller(), level, NO_MESSAGE_TEXT.to_string());
    }

    /// Emit the error's display text at `Error`, then route the error to
    /// every module's `on_exception` hook. The first hook failure is
    /// returned after all modules have been visited.
    #[track_caller]
    pub fn log_error(
        &self,
        error: &(dyn std::error::Error),
    ) -> Result<(), ModuleError> {
        if !self.enabled_for(Level::Error) {
            return Ok(());
        }
        self.dispatch(Origin::caller(), Level::Error, error.to_string());
        self.modules.on_exception(error)
    }

    /// Emit with a caller-pinned origin, for logging on behalf of another
    /// component.
    pub fn log_from(&self, origin: Origin, level: Level, text: impl Into<String>) {
        if !self.enabled_for(level) {
            return;
        }
        self.dispatch(origin, level, text.into());
    }

    fn dispatch(&self, origin: Origin, level: Level, text: String) {
        let timestamp = Utc::now();
        self.modules.before_log();
        let record = Record::new(level, text, timestamp, origin);
        self.dispatcher.publish(&record);
        self.modules.after_log(&record);
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}
