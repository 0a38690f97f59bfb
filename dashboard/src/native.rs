use chrono::Local;
use lanecore::poll::{ClockTicker, DashboardConfig, DataPoller};
use lanecore::telemetry::Metrics;
use lanecore::view::MemorySurface;
use lanecore::{Fetcher, TimeSource};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

/// Local time of day via `chrono`, formatted with `%X`.
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn time_of_day(&self) -> String {
        Local::now().format("%X").to_string()
    }
}

/// The dashboard without a browser: same clock and poller, writing into a
/// [`MemorySurface`]. Polls are spawned onto the current `LocalSet`, so
/// [`run_until`](Self::run_until) must be driven from inside one.
pub struct HeadlessDashboard<F, T> {
    poller: Rc<DataPoller<F>>,
    clock: ClockTicker<T>,
    surface: Rc<RefCell<MemorySurface>>,
    period: Duration,
    echo_view: bool,
}

impl<F, T> HeadlessDashboard<F, T>
where
    F: Fetcher + 'static,
    T: TimeSource,
{
    pub fn new(fetcher: F, time_source: T, config: &DashboardConfig) -> Self {
        Self {
            poller: Rc::new(DataPoller::new(fetcher, config)),
            clock: ClockTicker::new(time_source),
            surface: Rc::new(RefCell::new(MemorySurface::new())),
            period: config.tick_period(),
            echo_view: false,
        }
    }

    /// Print the whole view to stdout after every successful poll.
    pub fn echo_view(mut self, enabled: bool) -> Self {
        self.echo_view = enabled;
        self
    }

    pub fn view(&self) -> MemorySurface {
        self.surface.borrow().clone()
    }

    pub fn metrics(&self) -> Metrics {
        self.poller.metrics()
    }

    /// Ticks the clock and starts a poll once per period, both immediately
    /// on entry, until `shutdown` resolves.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) {
        let clock_loop = async {
            let mut interval = time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.clock.tick(&mut *self.surface.borrow_mut());
            }
        };
        let poll_loop = async {
            let mut interval = time::interval(self.period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self.spawn_poll();
            }
        };

        tokio::select! {
            _ = clock_loop => {}
            _ = poll_loop => {}
            _ = shutdown => {}
        }
    }

    fn spawn_poll(&self) {
        let poller = Rc::clone(&self.poller);
        let surface = Rc::clone(&self.surface);
        let echo_view = self.echo_view;
        tokio::task::spawn_local(async move {
            let outcome = poller.fetch().await;
            let mut surface = surface.borrow_mut();
            if poller.complete(outcome, &mut *surface) && echo_view {
                println!("{}", surface.render_lines().join("\n"));
            }
        });
    }
}
