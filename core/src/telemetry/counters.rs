//! telemetry/counters.rs
//! Mutable counters kept by each reader/writer session.
//!
//! Summary: counts tokens, composites, skipped values and bytes moved.
//! Converted into an immutable `CodecSnapshot` on demand.
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Deterministic counters collected during one encode or decode session.
#[derive(Default, Clone, Debug, Encode, Decode, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecCounters {
    /// Tokens at stream level or inside compounds.
    pub tokens: u64,
    pub compounds: u64,
    pub lists: u64,
    pub pairs: u64,
    pub strings: u64,
    /// Strings dropped by `LengthPolicy::Skip`.
    pub skipped_strings: u64,
    /// Lists dropped by `LengthPolicy::Skip`.
    pub skipped_lists: u64,
    /// Bytes read or written, tags included.
    pub bytes: u64,
}

impl CodecCounters {
    pub fn add_token(&mut self) {
        self.tokens += 1;
    }

    pub fn add_compound(&mut self) {
        self.compounds += 1;
    }

    pub fn add_list(&mut self) {
        self.lists += 1;
    }

    pub fn add_pair(&mut self) {
        self.pairs += 1;
    }

    pub fn add_string(&mut self) {
        self.strings += 1;
    }

    pub fn add_skipped_string(&mut self) {
        self.skipped_strings += 1;
    }

    pub fn add_skipped_list(&mut self) {
        self.skipped_lists += 1;
    }

    pub fn skipped(&self) -> u64 {
        self.skipped_strings + self.skipped_lists
    }

    pub fn merge(&mut self, other: &CodecCounters) {
        self.tokens += other.tokens;
        self.compounds += other.compounds;
        self.lists += other.lists;
        self.pairs += other.pairs;
        self.strings += other.strings;
        self.skipped_strings += other.skipped_strings;
        self.skipped_lists += other.skipped_lists;
        self.bytes += other.bytes;
    }

    /// Compact binary form for persisting counters next to a stream.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::error::EncodeError> {
        bincode::encode_to_vec(self, bincode::config::standard())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::error::DecodeError> {
        let (counters, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(counters)
    }
}
