pub mod clock;
pub mod config;
pub mod poller;

pub use clock::ClockTicker;
pub use config::{DashboardConfig, DEFAULT_API_URL, TICK_PERIOD};
pub use poller::DataPoller;
