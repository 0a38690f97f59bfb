//! Polling view-model for the lane-optimization dashboard.
//!
//! The modules keep the dashboard a pure projection of the upstream service:
//! a snapshot is decoded, projected onto named UI handles, and written into a
//! surface in one synchronous step.

pub mod poll;
pub mod prelude;
pub mod snapshot;
pub mod telemetry;
pub mod view;

pub use prelude::{Fetcher, PollError, PollResult, RawResponse, Surface, TimeSource};
