use bridge_core::{
    ScopeRegistry, TriggerOutcome, Wrapper, WrapperOptions, NO_CHILD_AVAILABLE, WRAPPER_READY,
};
use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;
use std::sync::{Mutex, Once};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Lazy<CaptureLogger> = Lazy::new(|| CaptureLogger {
    records: Mutex::new(Vec::new()),
});

static INSTALL: Once = Once::new();

fn capture() -> &'static CaptureLogger {
    INSTALL.call_once(|| {
        log::set_logger(&*LOGGER).expect("no other logger in this test binary");
        log::set_max_level(LevelFilter::Trace);
    });
    &LOGGER
}

fn warnings_for(logger: &CaptureLogger, scope: &str) -> Vec<String> {
    logger
        .records
        .lock()
        .expect("capture lock")
        .iter()
        .filter(|(level, message)| {
            *level == Level::Warn
                && message.contains("event=bridge_missing")
                && message.contains(scope)
        })
        .map(|(_, message)| message.clone())
        .collect()
}

#[test]
fn both_triggers_warn_but_only_load_updates_status() {
    let logger = capture();
    let registry = ScopeRegistry::new();
    let scope = registry.create_scope(None).expect("scope");
    let wrapper = Wrapper::new(&registry, scope, Vec::new()).expect("wrapper");

    assert_eq!(wrapper.refresh(), TriggerOutcome::Missing);
    assert_eq!(wrapper.status(), WRAPPER_READY);

    assert_eq!(wrapper.load(), TriggerOutcome::Missing);
    assert_eq!(wrapper.status(), NO_CHILD_AVAILABLE);

    let warnings = warnings_for(logger, &scope.to_string());
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("op=refresh"));
    assert!(warnings[1].contains("op=load"));
}

#[test]
fn symmetric_wrapper_warns_and_updates_status_on_refresh() {
    let logger = capture();
    let registry = ScopeRegistry::new();
    let scope = registry.create_scope(None).expect("scope");
    let wrapper = Wrapper::new(&registry, scope, Vec::new())
        .expect("wrapper")
        .with_options(WrapperOptions {
            report_missing_on_refresh: true,
        });

    assert_eq!(wrapper.refresh(), TriggerOutcome::Missing);
    assert_eq!(wrapper.status(), NO_CHILD_AVAILABLE);
    assert_eq!(warnings_for(logger, &scope.to_string()).len(), 1);
}
