//! Lifecycle modules and the name-keyed registry.
//!
//! Modules observe the pipeline without participating in delivery: they are
//! notified before and after every accepted log call and whenever an error
//! value is routed through the exception entry point.

mod digest;

pub use digest::{DigestModule, DigestSink};

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::record::Record;

/// Errors a module can surface from its lifecycle hooks.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Module not configured: {0}")]
    Misconfigured(String),

    #[error("Module I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Module failure: {0}")]
    Failed(String),
}

/// A lifecycle observer. At most one module per [`name`](Module::name) is
/// installed at a time.
///
/// All hooks default to no-ops; implement the ones the module cares about.
pub trait Module: Send + Sync {
    /// Registry key. Reinstalling under an existing name replaces the old
    /// module wholesale.
    fn name(&self) -> &str;

    /// One-time setup, invoked on install (and again on every reinstall).
    fn initialize(&self) -> Result<(), ModuleError> {
        Ok(())
    }

    /// A log call has passed gating; the record does not exist yet.
    fn before_log(&self) -> Result<(), ModuleError> {
        Ok(())
    }

    /// The record has been delivered to every handler.
    fn after_log(&self, _record: &Record) -> Result<(), ModuleError> {
        Ok(())
    }

    /// An error value was routed through the pipeline's exception entry.
    fn on_exception(&self, _error: &(dyn std::error::Error)) -> Result<(), ModuleError> {
        Ok(())
    }
}

/// Name-keyed collection of installed modules.
///
/// Install and uninstall may race with in-flight hook sweeps; a sweep sees
/// the module set before or after a concurrent mutation, never a torn state.
/// Iteration order is unspecified.
pub struct ModuleRegistry {
    modules: DashMap<String, Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: DashMap::new(),
        }
    }

    /// Install a module under its name. An existing module under the same
    /// name is fully uninstalled first; the new module's `initialize` runs
    /// before registration, and an initialize failure leaves the registry
    /// without any entry for that name.
    pub fn install(&self, module: Arc<dyn Module>) -> Result<(), ModuleError> {
        let name = module.name().to_string();
        self.modules.remove(&name);
        module.initialize()?;
        self.modules.insert(name, module);
        Ok(())
    }

    /// Remove the named entry. Silent when absent.
    pub fn uninstall(&self, name: &str) {
        self.modules.remove(name);
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Invoke `before_log` on every installed module. A hook failure is
    /// reported through `tracing` and does not stop the sweep.
    pub fn before_log(&self) {
        for (name, module) in self.snapshot() {
            if let Err(err) = module.before_log() {
                tracing::warn!("before_log hook failed for module {}: {}", name, err);
            }
        }
    }

    /// Invoke `after_log` on every installed module, same isolation as
    /// [`before_log`](Self::before_log).
    pub fn after_log(&self, record: &Record) {
        for (name, module) in self.snapshot() {
            if let Err(err) = module.after_log(record) {
                tracing::warn!("after_log hook failed for module {}: {}", name, err);
            }
        }
    }

    /// Invoke `on_exception` on every installed module. Every module is
    /// visited; the first failure is returned to the caller afterwards,
    /// later failures are reported through `tracing`.
    pub fn on_exception(
        &self,
        error: &(dyn std::error::Error),
    ) -> Result<(), ModuleError> {
        let mut first_failure = None;
        for (name, module) in self.snapshot() {
            if let Err(err) = module.on_exception(error) {
                if first_failure.is_none() {
                    first_failure = Some(err);
                } else {
                    tracing::warn!("on_exception hook failed for module {}: {}", name, err);
                }
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // Hooks run outside the map's shard locks so a module may touch the
    // registry re-entrantly without deadlocking.
    fn snapshot(&self) -> Vec<(String, Arc<dyn Module>)> {
        self.modules
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        name: String,
        initialized: AtomicUsize,
        before: AtomicUsize,
    }

    impl Counting {
        fn new(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                initialized: AtomicUsize::new(0),
                before: AtomicUsize::new(0),
            })
        }
    }

    impl Module for Counting {
        fn name(&self) -> &str {
            &self.name
        }

        fn initialize(&self) -> Result<(), ModuleError> {
            self.initialized.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn before_log(&self) -> Result<(), ModuleError> {
            self.before.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn install_runs_initialize_once() {
        let registry = ModuleRegistry::new();
        let module = Counting::new("audit");
        registry.install(module.clone()).unwrap();
        assert_eq!(module.initialized.load(Ordering::SeqCst), 1);
        assert!(registry.is_installed("audit"));
    }

    #[test]
    fn reinstall_replaces_and_reinitializes() {
        let registry = ModuleRegistry::new();
        let old = Counting::new("audit");
        let new = Counting::new("audit");
        registry.install(old.clone()).unwrap();
        registry.install(new.clone()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(new.initialized.load(Ordering::SeqCst), 1);

        registry.before_log();
        assert_eq!(old.before.load(Ordering::SeqCst), 0);
        assert_eq!(new.before.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_initialize_leaves_nothing_installed() {
        struct Failing;
        impl Module for Failing {
            fn name(&self) -> &str {
                "failing"
            }
            fn initialize(&self) -> Result<(), ModuleError> {
                Err(ModuleError::Failed("no backing store".into()))
            }
        }

        let registry = ModuleRegistry::new();
        assert!(registry.install(Arc::new(Failing)).is_err());
        assert!(!registry.is_installed("failing"));
    }

    #[test]
    fn uninstall_unknown_name_is_silent() {
        let registry = ModuleRegistry::new();
        registry.uninstall("never-installed");
        assert!(registry.is_empty());
    }
}
