use crate::poll::DashboardConfig;
use crate::prelude::{Fetcher, PollResult, Surface};
use crate::snapshot::decode_response;
use crate::telemetry::{LogManager, Metrics, PollMetrics};
use crate::view::Projection;

/// Fetches snapshots from the data endpoint and projects them onto a surface.
///
/// A poll is split in two: [`fetch`](Self::fetch) owns the only suspension
/// point, [`complete`](Self::complete) is synchronous. Overlapping polls can
/// therefore share one surface and the last response to arrive wins.
pub struct DataPoller<F> {
    fetcher: F,
    endpoint: String,
    metrics: PollMetrics,
    logger: LogManager,
}

impl<F: Fetcher> DataPoller<F> {
    pub fn new(fetcher: F, config: &DashboardConfig) -> Self {
        Self {
            fetcher,
            endpoint: config.api_url.clone(),
            metrics: PollMetrics::new(),
            logger: LogManager::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics.snapshot()
    }

    /// One round-trip plus decoding; nothing is written yet.
    pub async fn fetch(&self) -> PollResult<Projection> {
        let response = self.fetcher.get(&self.endpoint).await?;
        let snapshot = decode_response(&response)?;
        self.logger.record(&format!(
            "snapshot: lane {} at {}%",
            snapshot.optimal_lane, snapshot.lane_capacity
        ));
        Ok(Projection::from_snapshot(&snapshot))
    }

    /// Writes a successful poll, or logs a failed one and leaves the surface
    /// untouched. Returns whether the surface was updated.
    pub fn complete<S: Surface + ?Sized>(
        &self,
        outcome: PollResult<Projection>,
        surface: &mut S,
    ) -> bool {
        match outcome {
            Ok(projection) => {
                projection.apply(surface);
                self.metrics.record_success();
                true
            }
            Err(err) => {
                self.logger.poll_failed(&err);
                self.metrics.record_failure();
                false
            }
        }
    }

    pub async fn poll_into<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        let outcome = self.fetch().await;
        self.complete(outcome, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{PollError, RawResponse};
    use crate::telemetry::log::capture;
    use crate::telemetry::POLL_FAILURE_PREFIX;
    use crate::view::{Handle, MemorySurface};
    use log::Level;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::time::Duration;

    fn document(total: u32) -> String {
        format!(
            r#"{{"optimal_lane": 3, "optimization_note": "Shift to lane 3",
                "total_vehicles": {total}, "traffic_status": "Moderate",
                "active_vehicles": 42, "lane_capacity": 65, "emergency_lane": 1}}"#
        )
    }

    type Scripted = (Duration, PollResult<RawResponse>);

    #[derive(Default)]
    struct ScriptedFetcher {
        script: RefCell<VecDeque<Scripted>>,
        requested: RefCell<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn push(&self, delay: Duration, outcome: PollResult<RawResponse>) {
            self.script.borrow_mut().push_back((delay, outcome));
        }
    }

    impl Fetcher for ScriptedFetcher {
        async fn get(&self, url: &str) -> PollResult<RawResponse> {
            self.requested.borrow_mut().push(url.to_string());
            let next = self.script.borrow_mut().pop_front();
            let (delay, outcome) =
                next.unwrap_or((Duration::ZERO, Err(PollError::Transport("script empty".into()))));
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            outcome
        }
    }

    fn ok(body: String) -> PollResult<RawResponse> {
        Ok(RawResponse::new(200, body))
    }

    #[tokio::test]
    async fn successful_poll_updates_every_handle() {
        let fetcher = ScriptedFetcher::default();
        fetcher.push(Duration::ZERO, ok(document(127)));
        let poller = DataPoller::new(fetcher, &DashboardConfig::default());
        let mut surface = MemorySurface::new();
        capture::start();

        assert!(poller.poll_into(&mut surface).await);
        assert!(capture::take(Level::Error).is_empty());
        assert_eq!(surface.text(Handle::TotalVehicles), Some("127"));
        assert_eq!(surface.text(Handle::FooterTotalVehicles), Some("127"));
        assert_eq!(surface.width(Handle::LaneCapacityBar), Some("65%"));
        assert_eq!(
            poller.fetcher.requested.borrow().as_slice(),
            ["http://127.0.0.1:5000/data".to_string()]
        );
    }

    #[tokio::test]
    async fn every_failure_kind_leaves_the_surface_alone() {
        let fetcher = ScriptedFetcher::default();
        fetcher.push(Duration::ZERO, ok(document(127)));
        fetcher.push(
            Duration::ZERO,
            Err(PollError::Transport("connection refused".into())),
        );
        fetcher.push(Duration::ZERO, Ok(RawResponse::new(500, "oops")));
        fetcher.push(Duration::ZERO, ok("not json".into()));
        fetcher.push(Duration::ZERO, ok(r#"{"optimal_lane": 1}"#.into()));
        let poller = DataPoller::new(fetcher, &DashboardConfig::default());
        let mut surface = MemorySurface::new();

        assert!(poller.poll_into(&mut surface).await);
        let rendered = surface.clone();

        for failures in 1..=4 {
            assert!(!poller.poll_into(&mut surface).await);
            assert_eq!(surface, rendered);
            assert_eq!(poller.metrics().failed, failures);
        }
        assert_eq!(poller.metrics().succeeded, 1);
    }

    #[tokio::test]
    async fn each_failed_poll_logs_exactly_one_error_with_its_cause() {
        let fetcher = ScriptedFetcher::default();
        fetcher.push(
            Duration::ZERO,
            Err(PollError::Transport("connection refused".into())),
        );
        fetcher.push(Duration::ZERO, Ok(RawResponse::new(503, "down")));
        fetcher.push(Duration::ZERO, ok("not json".into()));
        fetcher.push(Duration::ZERO, ok(r#"{"optimal_lane": 1}"#.into()));
        fetcher.push(Duration::ZERO, ok(document(127)));
        let poller = DataPoller::new(fetcher, &DashboardConfig::default());
        let mut surface = MemorySurface::new();
        capture::start();

        let causes = [
            "connection refused",
            "unexpected HTTP status 503",
            "malformed document",
            "unexpected document shape",
        ];
        for cause in causes {
            assert!(!poller.poll_into(&mut surface).await);
            let errors = capture::take(Level::Error);
            assert_eq!(errors.len(), 1, "{errors:?}");
            assert!(errors[0].starts_with(POLL_FAILURE_PREFIX), "{}", errors[0]);
            assert!(errors[0].contains(cause), "{}", errors[0]);
        }

        assert!(poller.poll_into(&mut surface).await);
        assert!(capture::take(Level::Error).is_empty());
    }

    #[tokio::test]
    async fn recovers_on_the_next_good_poll() {
        let fetcher = ScriptedFetcher::default();
        fetcher.push(
            Duration::ZERO,
            Err(PollError::Transport("connection refused".into())),
        );
        fetcher.push(Duration::ZERO, ok(document(127)));
        let poller = DataPoller::new(fetcher, &DashboardConfig::default());
        let mut surface = MemorySurface::new();

        assert!(!poller.poll_into(&mut surface).await);
        assert_eq!(surface.write_count(), 0);
        assert!(poller.poll_into(&mut surface).await);
        assert_eq!(surface.text(Handle::OptimalLane), Some("Lane 3"));
        assert_eq!(surface.text(Handle::EmergencyLane), Some("Lane 1"));
    }

    #[tokio::test]
    async fn late_response_overwrites_newer_one() {
        let fetcher = ScriptedFetcher::default();
        fetcher.push(Duration::from_millis(60), ok(document(100)));
        fetcher.push(Duration::ZERO, ok(document(200)));
        let poller = DataPoller::new(fetcher, &DashboardConfig::default());
        let surface = RefCell::new(MemorySurface::new());
        let order = RefCell::new(Vec::new());

        let poll = |label: &'static str| {
            let poller = &poller;
            let surface = &surface;
            let order = &order;
            async move {
                let outcome = poller.fetch().await;
                order.borrow_mut().push(label);
                poller.complete(outcome, &mut *surface.borrow_mut());
            }
        };
        tokio::join!(poll("a"), poll("b"));

        assert_eq!(order.into_inner(), vec!["b", "a"]);
        let surface = surface.into_inner();
        assert_eq!(surface.text(Handle::TotalVehicles), Some("100"));
        assert_eq!(surface.text(Handle::FooterTotalVehicles), Some("100"));
    }
}
