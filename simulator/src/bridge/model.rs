use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-frame summary posted by the lane detector to `/api/update`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneReport {
    /// Vehicle count per detector lane letter.
    pub lanes: BTreeMap<String, u32>,
    pub confidence: f32,
    pub inference_time: f32,
    pub driver_lane: Option<String>,
    pub emergency_lane: Option<String>,
    pub driver_in_destination: bool,
}
