//! telemetry/snapshot.rs
//!
//! Immutable view of a session's counters plus elapsed time.

use std::fmt;
use std::time::Duration;
use serde::{Deserialize, Serialize};

use crate::telemetry::counters::CodecCounters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Encode,
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Encode => f.write_str("encode"),
            Direction::Decode => f.write_str("decode"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecSnapshot {
    pub direction: Direction,
    pub counters: CodecCounters,
    pub elapsed: Duration,
    pub throughput_bytes_per_sec: f64,
}

impl CodecSnapshot {
    pub fn from(direction: Direction, counters: &CodecCounters, elapsed: Duration) -> Self {
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            direction,
            counters: counters.clone(),
            elapsed,
            throughput_bytes_per_sec: throughput,
        }
    }

    /// Every token costs at least its tag byte.
    pub fn sanity_check(&self) -> bool {
        let c = &self.counters;
        c.bytes >= c.tokens && self.throughput_bytes_per_sec >= 0.0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
