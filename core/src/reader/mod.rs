//! Reader engine.
//!
//! Responsibilities:
//! - Per-tag typed reads (`read_integer`, `read_string`, ...)
//! - Generic tag-dispatched decoding into `Value`
//! - Whole-stream reads up to End-Of-Stream, with truncation detection
//!
//! Non-responsibilities:
//! - Opening or closing the source
//! - Primitive byte layouts (see `codec`)

pub mod engine;

pub use engine::DynaryReader;
