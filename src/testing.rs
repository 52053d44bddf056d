//! Log capture for unit tests.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static CAPTURED: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

/// Routes records into the capture buffer of the logging thread, if any.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Run `f` and return what it logged on the current thread.
pub(crate) fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<(Level, String)>) {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });

    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let result = f();
    let records = CAPTURED.with(|captured| captured.borrow_mut().take().unwrap_or_default());
    (result, records)
}

/// Messages logged at warn level.
pub(crate) fn warnings(records: &[(Level, String)]) -> Vec<&str> {
    records
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, message)| message.as_str())
        .collect()
}
