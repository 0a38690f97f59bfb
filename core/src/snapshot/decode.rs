use crate::prelude::{PollError, PollResult, RawResponse};
use crate::snapshot::TrafficSnapshot;
use serde_json::Value;

/// Checks the status line, then decodes the body.
pub fn decode_response(response: &RawResponse) -> PollResult<TrafficSnapshot> {
    if !response.is_success() {
        return Err(PollError::Status(response.status));
    }
    decode_snapshot(&response.body)
}

/// Decodes a response body into a snapshot.
///
/// Bytes that are not JSON are a [`PollError::Decode`]; a JSON document that
/// lacks a field or carries one of the wrong kind is a [`PollError::Shape`].
pub fn decode_snapshot(body: &[u8]) -> PollResult<TrafficSnapshot> {
    let document: Value =
        serde_json::from_slice(body).map_err(|err| PollError::Decode(err.to_string()))?;
    if !document.is_object() {
        return Err(PollError::Shape(format!(
            "expected an object, found {}",
            kind_of(&document)
        )));
    }
    serde_json::from_value(document).map_err(|err| PollError::Shape(err.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
