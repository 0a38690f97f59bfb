use crate::generator::feed::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Everything the stand-in service can be tuned with.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    /// Vehicles a lane holds at 100% capacity.
    pub lane_capacity: u32,
    /// Detector lane letter to dashboard lane number.
    pub lane_map: BTreeMap<String, u32>,
    pub fallback_optimal_lane: u32,
    pub fallback_emergency_lane: u32,
    pub low_flow_below: u32,
    pub moderate_flow_below: u32,
    pub static_dir: Option<PathBuf>,
    pub generator: GeneratorConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let lane_map = [("A", 4), ("B", 2), ("C", 1)]
            .into_iter()
            .map(|(letter, lane)| (letter.to_string(), lane))
            .collect();
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            lane_capacity: 150,
            lane_map,
            fallback_optimal_lane: 2,
            fallback_emergency_lane: 3,
            low_flow_below: 30,
            moderate_flow_below: 70,
            static_dir: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading service config {}", path_ref.display()))?;
        let config: ServiceConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing service config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn lane_number(&self, letter: Option<&str>, fallback: u32) -> u32 {
        letter
            .and_then(|letter| self.lane_map.get(letter))
            .copied()
            .unwrap_or(fallback)
    }
}
