//! Writer engine.
//!
//! Responsibilities:
//! - Per-tag encode operations (`write_integer`, `write_string`, ...)
//! - Recursive pair / list / compound encoding
//! - Whole-stream writes terminated by End-Of-Stream
//!
//! Non-responsibilities:
//! - Opening or closing the sink
//! - Primitive byte layouts (see `codec`)

pub mod engine;

pub use engine::DynaryWriter;
