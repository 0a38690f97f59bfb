use crate::prelude::Surface;
use crate::snapshot::TrafficSnapshot;
use crate::view::Handle;

/// A single assignment to a UI handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Text(Handle, String),
    /// Horizontal extent, as a CSS percentage string.
    Width(Handle, String),
}

impl Write {
    pub fn handle(&self) -> Handle {
        match self {
            Write::Text(handle, _) | Write::Width(handle, _) => *handle,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Write::Text(_, value) | Write::Width(_, value) => value,
        }
    }
}

/// Every write derived from one snapshot.
///
/// Built entirely before anything touches the surface, so a snapshot is
/// applied all at once or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    writes: Vec<Write>,
}

impl Projection {
    pub fn from_snapshot(snapshot: &TrafficSnapshot) -> Self {
        let optimal = format!("Lane {}", snapshot.optimal_lane);
        let total = snapshot.total_vehicles.to_string();
        let capacity = format!("{}%", snapshot.lane_capacity);

        let writes = vec![
            Write::Text(Handle::OptimalLane, optimal.clone()),
            Write::Text(Handle::RecommendedLaneTitle, optimal),
            Write::Text(
                Handle::OptimalFooterText,
                snapshot.optimization_note.clone(),
            ),
            Write::Text(Handle::TotalVehicles, total.clone()),
            Write::Text(Handle::FooterTotalVehicles, total),
            Write::Text(Handle::TrafficStatus, snapshot.traffic_status.clone()),
            Write::Text(
                Handle::ActiveVehicles,
                snapshot.active_vehicles.to_string(),
            ),
            Write::Text(Handle::LaneCapacityText, capacity.clone()),
            Write::Width(Handle::LaneCapacityBar, capacity),
            Write::Text(
                Handle::EmergencyLane,
                format!("Lane {}", snapshot.emergency_lane),
            ),
        ];

        Self { writes }
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    pub fn value_of(&self, handle: Handle) -> Option<&str> {
        self.writes
            .iter()
            .find(|write| write.handle() == handle)
            .map(Write::value)
    }

    /// Applies every write synchronously.
    pub fn apply<S: Surface + ?Sized>(&self, surface: &mut S) {
        for write in &self.writes {
            match write {
                Write::Text(handle, text) => surface.set_text(*handle, text),
                Write::Width(handle, width) => surface.set_width(*handle, width),
            }
        }
    }
}
