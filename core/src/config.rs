//! config.rs
//! Codec options shared by `DynaryReader` and `DynaryWriter`.
//!
//! Notes:
//! - Options are plain data with serde derives so they can live in a JSON config file.
//! - Defaults match existing encoded files: UTF-16LE, silent skipping of
//!   out-of-range strings/lists, depth 64.

use serde::{Deserialize, Serialize};

use crate::codec::CharEncoding;
use crate::constants::{MAX_NESTING_DEPTH, MAX_NESTING_DEPTH_LIMIT};
use crate::types::{DynaryError, Result};

/// What the writer does with a string or list it cannot represent
/// (empty / blank, or longer than 255).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthPolicy {
    /// Write nothing; log and count the skip.
    #[default]
    Skip,
    /// Fail with `InvalidLength`.
    Strict,
}

/// How the reader treats End-Of-Stream inside an open compound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundTerminator {
    /// `MalformedStream`.
    #[default]
    Strict,
    /// Accept it as End-Of-Compound.
    Lenient,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub encoding: CharEncoding,
    pub length_policy: LengthPolicy,
    pub compound_terminator: CompoundTerminator,
    pub max_depth: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            encoding: CharEncoding::default(),
            length_policy: LengthPolicy::default(),
            compound_terminator: CompoundTerminator::default(),
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: CharEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    pub fn with_compound_terminator(mut self, terminator: CompoundTerminator) -> Self {
        self.compound_terminator = terminator;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Shorthand for strict lengths and strict compound termination.
    pub fn strict() -> Self {
        Self::default()
            .with_length_policy(LengthPolicy::Strict)
            .with_compound_terminator(CompoundTerminator::Strict)
    }

    /// Shorthand for reading files produced by the legacy writer.
    pub fn legacy() -> Self {
        Self::default()
            .with_length_policy(LengthPolicy::Skip)
            .with_compound_terminator(CompoundTerminator::Lenient)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(DynaryError::Config("max_depth must be at least 1".into()));
        }
        if self.max_depth > MAX_NESTING_DEPTH_LIMIT {
            return Err(DynaryError::Config(format!(
                "max_depth {} exceeds limit {}",
                self.max_depth, MAX_NESTING_DEPTH_LIMIT
            )));
        }
        Ok(())
    }

    /// Parse and validate options from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: CodecOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
