use crate::bridge::model::LaneReport;
use crate::workflow::config::ServiceConfig;
use anyhow::Context;
use lanecore::snapshot::{LaneId, Reading, TrafficSnapshot};

pub const OPTIMIZATION_NOTE: &str = "Least crowded route selected";

/// Turns a detector lane report into the snapshot served on `/data`.
#[derive(Clone)]
pub struct Optimizer {
    config: ServiceConfig,
}

impl Optimizer {
    pub fn new(config: ServiceConfig) -> Self {
        Self { config }
    }

    /// State served before the first report arrives.
    pub fn initial_snapshot(&self) -> TrafficSnapshot {
        TrafficSnapshot {
            optimal_lane: LaneId::from(self.config.fallback_optimal_lane),
            optimization_note: "Waiting for data...".into(),
            total_vehicles: Reading::from(0u32),
            traffic_status: "Unknown".into(),
            active_vehicles: Reading::from(0u32),
            lane_capacity: Reading::from(0u32),
            emergency_lane: LaneId::from(self.config.fallback_emergency_lane),
        }
    }

    pub fn execute(&self, report: &LaneReport) -> anyhow::Result<TrafficSnapshot> {
        // Ties go to the first lane in key order.
        let (letter, optimal_count) = report
            .lanes
            .iter()
            .min_by_key(|(_, count)| **count)
            .context("lane report carries no lanes")?;
        let optimal_count = u64::from(*optimal_count);
        let total: u64 = report.lanes.values().copied().map(u64::from).sum();
        let capacity_percent = optimal_count * 100 / u64::from(self.config.lane_capacity.max(1));

        Ok(TrafficSnapshot {
            optimal_lane: LaneId::from(
                self.config
                    .lane_number(Some(letter.as_str()), self.config.fallback_optimal_lane),
            ),
            optimization_note: OPTIMIZATION_NOTE.into(),
            total_vehicles: Reading::from(total),
            traffic_status: self.traffic_status(optimal_count).into(),
            active_vehicles: Reading::from(optimal_count),
            lane_capacity: Reading::from(capacity_percent),
            emergency_lane: LaneId::from(self.config.lane_number(
                report.emergency_lane.as_deref(),
                self.config.fallback_emergency_lane,
            )),
        })
    }

    fn traffic_status(&self, optimal_count: u64) -> &'static str {
        if optimal_count < u64::from(self.config.low_flow_below) {
            "Low Flow"
        } else if optimal_count < u64::from(self.config.moderate_flow_below) {
            "Moderate Flow"
        } else {
            "Heavy Flow"
        }
    }
}
