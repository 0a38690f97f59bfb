use crate::bridge::model::LaneReport;
use crate::bridge::routes::TrafficBridge;
use log::warn;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the synthetic lane-report feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub seed: u64,
    pub lanes: Vec<String>,
    pub max_per_lane: u32,
    /// Probability that a report carries an emergency vehicle.
    pub emergency_chance: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 1000,
            seed: 0,
            lanes: vec!["A".into(), "B".into(), "C".into()],
            max_per_lane: 90,
            emergency_chance: 0.1,
        }
    }
}

/// Seeded source of detector-like lane reports.
pub struct ReportGenerator {
    config: GeneratorConfig,
    rng: StdRng,
}

impl ReportGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn next_report(&mut self) -> LaneReport {
        let lanes = self
            .config
            .lanes
            .iter()
            .map(|lane| (lane.clone(), self.rng.gen_range(0..=self.config.max_per_lane)))
            .collect();
        let emergency_lane = if self
            .rng
            .gen_bool(self.config.emergency_chance.clamp(0.0, 1.0))
        {
            self.pick_lane()
        } else {
            None
        };
        let driver_lane = self.pick_lane();

        LaneReport {
            lanes,
            confidence: (self.rng.gen_range(55.0f32..99.0) * 100.0).round() / 100.0,
            inference_time: (self.rng.gen_range(8.0f32..40.0) * 100.0).round() / 100.0,
            driver_lane,
            emergency_lane,
            driver_in_destination: false,
        }
    }

    fn pick_lane(&mut self) -> Option<String> {
        if self.config.lanes.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.config.lanes.len());
        self.config.lanes.get(index).cloned()
    }
}

/// Feeds generated reports into the bridge until the task is dropped.
pub async fn run_feed(bridge: TrafficBridge, config: GeneratorConfig) {
    let mut generator = ReportGenerator::new(config.clone());
    let mut interval = tokio::time::interval(Duration::from_millis(config.interval_ms.max(1)));
    loop {
        interval.tick().await;
        let report = generator.next_report();
        if let Err(err) = bridge.ingest(&report) {
            warn!("generated report rejected: {:#}", err);
        }
    }
}
