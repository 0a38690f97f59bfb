use std::fmt;

/// Addressable elements of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Handle {
    CurrentTime,
    OptimalLane,
    RecommendedLaneTitle,
    OptimalFooterText,
    TotalVehicles,
    FooterTotalVehicles,
    TrafficStatus,
    ActiveVehicles,
    LaneCapacityText,
    LaneCapacityBar,
    EmergencyLane,
}

impl Handle {
    pub const ALL: [Handle; 11] = [
        Handle::CurrentTime,
        Handle::OptimalLane,
        Handle::RecommendedLaneTitle,
        Handle::OptimalFooterText,
        Handle::TotalVehicles,
        Handle::FooterTotalVehicles,
        Handle::TrafficStatus,
        Handle::ActiveVehicles,
        Handle::LaneCapacityText,
        Handle::LaneCapacityBar,
        Handle::EmergencyLane,
    ];

    /// Element id in the host document.
    pub fn id(self) -> &'static str {
        match self {
            Handle::CurrentTime => "current-time",
            Handle::OptimalLane => "optimal-lane",
            Handle::RecommendedLaneTitle => "recommended-lane-title",
            Handle::OptimalFooterText => "optimal-footer-text",
            Handle::TotalVehicles => "total-vehicles",
            Handle::FooterTotalVehicles => "footer-total-vehicles",
            Handle::TrafficStatus => "traffic-status",
            Handle::ActiveVehicles => "active-vehicles",
            Handle::LaneCapacityText => "lane-capacity-text",
            Handle::LaneCapacityBar => "lane-capacity-bar",
            Handle::EmergencyLane => "emergency-lane",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|handle| handle.id() == id)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
