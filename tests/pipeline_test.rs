//! Pipeline gating, sequencing, and entry-point tests.

use std::sync::Arc;

use parking_lot::Mutex;

use logcast::{
    Handler, HandlerError, Level, LevelFilter, Module, ModuleError, Origin, Pipeline,
    PipelineConfig, Record, NO_MESSAGE_TEXT,
};

/// Captures every delivered record.
#[derive(Default)]
struct Capturing {
    records: Mutex<Vec<Record>>,
}

impl Handler for Capturing {
    fn accept(&self, record: &Record) -> Result<(), HandlerError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Journals hook invocations alongside deliveries to prove sequencing.
struct Observing {
    name: String,
    journal: Arc<Mutex<Vec<String>>>,
}

impl Module for Observing {
    fn name(&self) -> &str {
        &self.name
    }

    fn before_log(&self) -> Result<(), ModuleError> {
        self.journal.lock().push(format!("{}:before", self.name));
        Ok(())
    }

    fn after_log(&self, _record: &Record) -> Result<(), ModuleError> {
        self.journal.lock().push(format!("{}:after", self.name));
        Ok(())
    }

    fn on_exception(&self, error: &(dyn std::error::Error)) -> Result<(), ModuleError> {
        self.journal
            .lock()
            .push(format!("{}:exception:{}", self.name, error));
        Ok(())
    }
}

/// Delivery journaler sharing the module journal.
struct Delivering {
    journal: Arc<Mutex<Vec<String>>>,
}

impl Handler for Delivering {
    fn accept(&self, _record: &Record) -> Result<(), HandlerError> {
        self.journal.lock().push("deliver".to_string());
        Ok(())
    }
}

fn pipeline_with_capture() -> (Pipeline, Arc<Capturing>) {
    let pipeline = Pipeline::new(PipelineConfig::default());
    let capture = Arc::new(Capturing::default());
    pipeline.dispatcher().add_handler(capture.clone());
    (pipeline, capture)
}

// =============================================================================
// Gating Tests
// =============================================================================

#[test]
fn disabled_pipeline_invokes_nothing() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let (pipeline, capture) = pipeline_with_capture();
    pipeline.dispatcher().add_handler(Arc::new(Delivering {
        journal: journal.clone(),
    }));
    pipeline
        .modules()
        .install(Arc::new(Observing {
            name: "watcher".to_string(),
            journal: journal.clone(),
        }))
        .unwrap();

    pipeline.off();
    pipeline.log(Level::Severe, "into the void");
    pipeline.log_default("also the void");
    assert!(capture.records.lock().is_empty());
    assert!(journal.lock().is_empty());

    pipeline.on();
    pipeline.log(Level::Severe, "heard again");
    assert_eq!(capture.records.lock().len(), 1);
}

#[test]
fn debug_off_suppresses_only_debug_level() {
    let (pipeline, capture) = pipeline_with_capture();
    pipeline.debug_off();

    pipeline.log(Level::Debug, "suppressed");
    pipeline.log(Level::Info, "delivered");
    pipeline.log(Level::Error, "also delivered");

    let levels: Vec<Level> = capture.records.lock().iter().map(|r| r.level).collect();
    assert_eq!(levels, vec![Level::Info, Level::Error]);
}

#[test]
fn disabled_pipeline_skips_exception_hooks_too() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let pipeline = Pipeline::new(PipelineConfig::default());
    pipeline
        .modules()
        .install(Arc::new(Observing {
            name: "watcher".to_string(),
            journal: journal.clone(),
        }))
        .unwrap();

    pipeline.off();
    let err = std::io::Error::other("boom");
    pipeline.log_error(&err).unwrap();
    assert!(journal.lock().is_empty());
}

// =============================================================================
// Entry Point Tests
// =============================================================================

#[test]
fn default_level_scenario() {
    let (pipeline, capture) = pipeline_with_capture();
    pipeline.set_default_level(Level::Info);

    pipeline.log_default("ready");

    let records = capture.records.lock();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].text, "ready");
    assert!(records[0].timestamp.timestamp() > 0);
}

#[test]
fn empty_call_uses_placeholder_text() {
    let (pipeline, capture) = pipeline_with_capture();
    pipeline.log_empty();
    assert_eq!(capture.records.lock()[0].text, NO_MESSAGE_TEXT);
}

#[test]
fn pinned_origin_is_carried_verbatim() {
    let (pipeline, capture) = pipeline_with_capture();
    pipeline.log_from(
        Origin::new("ReplicationWorker", "sync_shard", 311),
        Level::Warning,
        "lag detected",
    );

    let records = capture.records.lock();
    assert_eq!(records[0].origin.type_name, "ReplicationWorker");
    assert_eq!(records[0].origin.operation, "sync_shard");
    assert_eq!(records[0].origin.line, 311);
}

#[test]
fn direct_call_resolves_caller_file_and_line() {
    let (pipeline, capture) = pipeline_with_capture();
    pipeline.log(Level::Info, "where am I");

    let records = capture.records.lock();
    assert!(records[0].origin.type_name.ends_with("pipeline_test.rs"));
    assert!(records[0].origin.line > 0);
}

#[test]
fn log_error_emits_record_then_routes_exception() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let (pipeline, capture) = pipeline_with_capture();
    pipeline
        .modules()
        .install(Arc::new(Observing {
            name: "watcher".to_string(),
            journal: journal.clone(),
        }))
        .unwrap();

    let err = std::io::Error::other("disk offline");
    pipeline.log_error(&err).unwrap();

    let records = capture.records.lock();
    assert_eq!(records[0].level, Level::Error);
    assert_eq!(records[0].text, "disk offline");
    assert!(journal
        .lock()
        .iter()
        .any(|entry| entry == "watcher:exception:disk offline"));
}

#[test]
fn exact_warning_filter_sees_no_error_records() {
    let pipeline = Pipeline::new(PipelineConfig::default());
    let capture = Arc::new(Capturing::default());
    pipeline
        .dispatcher()
        .add_filtered_handler(capture.clone(), LevelFilter::exactly(Level::Warning));

    pipeline.log(Level::Error, "boom");
    assert!(capture.records.lock().is_empty());
}

// =============================================================================
// Sequencing Tests
// =============================================================================

#[test]
fn hooks_straddle_delivery_exactly_once() {
    let journal = Arc::new(Mutex::new(Vec::new()));
    let pipeline = Pipeline::new(PipelineConfig::default());
    pipeline.dispatcher().add_handler(Arc::new(Delivering {
        journal: journal.clone(),
    }));
    pipeline
        .modules()
        .install(Arc::new(Observing {
            name: "m".to_string(),
            journal: journal.clone(),
        }))
        .unwrap();

    pipeline.log(Level::Info, "one event");

    assert_eq!(*journal.lock(), vec!["m:before", "deliver", "m:after"]);
}

#[test]
fn default_handlers_announce_readiness_in_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pipeline.log");
    let pipeline = Pipeline::new(PipelineConfig::default());

    pipeline.install_default_handlers(&path).unwrap();

    assert_eq!(pipeline.dispatcher().handler_count(), 2);
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Default initialization"));
    assert!(contents.contains("INFO"));
}

#[test]
fn history_snapshot_is_reachable_through_the_pipeline() {
    let pipeline = Pipeline::new(PipelineConfig {
        store_history: true,
        ..PipelineConfig::default()
    });

    pipeline.log(Level::Info, "first");
    pipeline.log(Level::Warning, "second");

    let history = pipeline.dispatcher().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text, "first");
    assert_eq!(history[1].text, "second");
}
