use std::time::Duration;

/// Data endpoint used when nothing overrides `API_URL`.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/data";

/// Fixed cadence of both the clock and the poller.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Replaces the endpoint when `candidate` holds a non-blank URL.
    pub fn override_api_url(mut self, candidate: Option<&str>) -> Self {
        if let Some(url) = candidate.map(str::trim).filter(|url| !url.is_empty()) {
            self.api_url = url.to_string();
        }
        self
    }

    pub fn tick_period(&self) -> Duration {
        TICK_PERIOD
    }
}
