pub mod decode;
pub mod traffic;

pub use decode::{decode_response, decode_snapshot};
pub use traffic::{LaneId, Reading, TrafficSnapshot};
