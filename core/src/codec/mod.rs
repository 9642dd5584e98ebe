//! Primitive wire codecs shared by the reader and writer.
//!
//! Responsibilities:
//! - Fixed-width little-endian numerics and booleans
//! - Character encodings and string payloads
//!
//! Non-responsibilities:
//! - Tags and recursion (see `writer` / `reader`)
//! - Length policies

pub mod charset;
pub mod encode;
pub mod decode;

pub use charset::CharEncoding;
