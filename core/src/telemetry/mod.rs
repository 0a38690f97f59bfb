pub mod log;
pub mod metrics;

pub use self::log::{poll_failure_line, LogManager, POLL_FAILURE_PREFIX};
pub use self::metrics::{Metrics, PollMetrics};
