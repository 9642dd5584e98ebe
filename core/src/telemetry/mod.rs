//! telemetry/mod.rs
//! Per-session counters and immutable snapshots for readers and writers.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
