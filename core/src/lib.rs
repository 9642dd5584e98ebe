//! dynary-core
//!
//! Tagged binary serialization: self-describing token streams with
//! primitives, strings, homogeneous lists, key/value pairs and nested
//! compounds, terminated by an End-Of-Stream marker.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Data model
pub mod tags;
pub mod value;

// Byte layouts
pub mod codec;

// Session plumbing
pub mod cancel;
pub mod config;
pub mod io;
pub mod telemetry;

// Engines
pub mod reader;
pub mod writer;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::codec::CharEncoding;
    pub use crate::config::{CodecOptions, CompoundTerminator, LengthPolicy};
    pub use crate::io::{decode_from_slice, encode_to_vec, InputSource, OutputSink};
    pub use crate::reader::DynaryReader;
    pub use crate::tags::{tag_of, tag_of_name, Tag, WireType};
    pub use crate::telemetry::{CodecCounters, CodecSnapshot, Direction};
    pub use crate::types::{DynaryError, Result};
    pub use crate::value::{Compound, CompoundId, List, Pair, ParentRef, Token, Value};
    pub use crate::writer::DynaryWriter;
}
