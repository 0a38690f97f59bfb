use crate::view::Handle;
use std::future::Future;

/// Status line and body of one HTTP round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Every way a single poll can fail.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed document: {0}")]
    Decode(String),
    #[error("unexpected document shape: {0}")]
    Shape(String),
}

pub type PollResult<T> = Result<T, PollError>;

/// Transport used by the data poller.
///
/// Implementations perform a plain GET with no body, query or extra headers.
pub trait Fetcher {
    fn get(&self, url: &str) -> impl Future<Output = PollResult<RawResponse>>;
}

/// Destination for projected values.
///
/// Writes to a handle the surface does not know about are silently dropped.
pub trait Surface {
    fn set_text(&mut self, handle: Handle, text: &str);
    fn set_width(&mut self, handle: Handle, width: &str);
}

/// Source of the locale-formatted time of day shown by the clock.
pub trait TimeSource {
    fn time_of_day(&self) -> String;
}
