use crate::prelude::PollError;
use log::{debug, error};

/// Prefix of the one diagnostic line written per failed poll.
pub const POLL_FAILURE_PREFIX: &str = "Server not reachable:";

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn poll_failed(&self, err: &PollError) {
        error!("{}", poll_failure_line(err));
    }

    pub fn record(&self, message: &str) {
        debug!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats the diagnostic line for a failed poll.
pub fn poll_failure_line(err: &PollError) -> String {
    format!("{} {}", POLL_FAILURE_PREFIX, err)
}

/// Test logger that keeps records per thread, so concurrently running tests
/// only see their own lines.
#[cfg(test)]
pub(crate) mod capture {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()));
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;
    static INSTALL: Once = Once::new();

    /// Installs the logger once per test binary and clears this thread's log.
    pub(crate) fn start() {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).expect("no other logger in unit tests");
            log::set_max_level(LevelFilter::Trace);
        });
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    /// Drains the lines logged on this thread at `level`.
    pub(crate) fn take(level: Level) -> Vec<String> {
        RECORDS.with(|records| {
            let mut records = records.borrow_mut();
            let (matched, rest): (Vec<_>, Vec<_>) =
                records.drain(..).partition(|(lvl, _)| *lvl == level);
            *records = rest;
            matched.into_iter().map(|(_, line)| line).collect()
        })
    }
}
