use serde::{Deserialize, Serialize};
use std::fmt;

/// One response of the traffic-optimization service.
///
/// Decoded per poll, projected once, then dropped. Range invariants
/// (capacity in `[0, 100]`, non-negative counts) are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    pub optimal_lane: LaneId,
    pub optimization_note: String,
    pub total_vehicles: Reading,
    pub traffic_status: String,
    pub active_vehicles: Reading,
    pub lane_capacity: Reading,
    pub emergency_lane: LaneId,
}

/// Opaque lane identifier: the service may send a number or a short name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LaneId {
    Number(Reading),
    Name(String),
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneId::Number(number) => fmt::Display::fmt(number, f),
            LaneId::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for LaneId {
    fn from(value: u32) -> Self {
        LaneId::Number(Reading::from(value))
    }
}

impl From<&str> for LaneId {
    fn from(value: &str) -> Self {
        LaneId::Name(value.to_string())
    }
}

/// A numeric field, kept exactly as the service sent it.
///
/// Displays like a browser's default number-to-string conversion, so `65.0`
/// renders as `65` and `-0.0` as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reading(serde_json::Number);

impl Reading {
    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }
}

impl From<u32> for Reading {
    fn from(value: u32) -> Self {
        Self(serde_json::Number::from(value))
    }
}

impl From<u64> for Reading {
    fn from(value: u64) -> Self {
        Self(serde_json::Number::from(value))
    }
}

impl From<serde_json::Number> for Reading {
    fn from(value: serde_json::Number) -> Self {
        Self(value)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_f64() {
            Some(value) => write_js_number(f, value),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Writes `value` the way a browser's `Number.prototype.toString()` does:
/// shortest round-trip digits, positional between 1e-7 and 1e21, exponent
/// form (`1e+21`, `1.5e-7`) outside that range.
fn write_js_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value == 0.0 {
        return f.write_str("0");
    }
    if value < 0.0 {
        f.write_str("-")?;
    }
    if value.is_infinite() {
        return f.write_str("Infinity");
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.2345e-7`.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let count = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exponent + 1;

    if count <= point && point <= 21 {
        f.write_str(&digits)?;
        for _ in 0..point - count {
            f.write_str("0")?;
        }
        Ok(())
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(point as usize);
        write!(f, "{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        f.write_str("0.")?;
        for _ in 0..-point {
            f.write_str("0")?;
        }
        f.write_str(&digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        f.write_str(lead)?;
        if !rest.is_empty() {
            write!(f, ".{rest}")?;
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "e{sign}{}", exponent.abs())
    }
}
