use std::fmt;
use std::io;
use thiserror::Error;

use crate::codec::CharEncoding;
use crate::tags::Tag;
use crate::utils::{fmt_bytes, fmt_last_path, tag_name};

pub type Result<T> = std::result::Result<T, DynaryError>;

/// Which length-prefixed shape violated its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    String,
    List,
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthKind::String => f.write_str("string"),
            LengthKind::List => f.write_str("list"),
        }
    }
}

/// Side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    Key,
    Value,
}

impl fmt::Display for PairSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairSide::Key => f.write_str("key"),
            PairSide::Value => f.write_str("value"),
        }
    }
}

/// Unified codec error covering the tag vocabulary, both engines and I/O.
/// - A failed token aborts the current read/write call; the cursor position
///   afterwards is unspecified.
/// - `From<io::Error>` maps `UnexpectedEof` to `UnexpectedEndOfStream` so `?`
///   works on raw reads.
#[derive(Debug, Error)]
pub enum DynaryError {
    /// Tag byte outside the vocabulary, or a reserved tag with no payload codec.
    #[error("unsupported type: {}", tag_name(.raw))]
    UnsupportedType { raw: u8 },

    /// Type name not in the static mapping table.
    #[error("unsupported type name: {name}")]
    UnsupportedTypeName { name: String },

    /// Decode attempted past the end of the byte source.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,

    /// String or list length outside what one length byte can carry.
    #[error("invalid {what} length: {len} (allowed {min}..={max})")]
    InvalidLength {
        what: LengthKind,
        len: usize,
        min: usize,
        max: usize,
    },

    /// Pair written without a key or a value.
    #[error("pair {side} is missing")]
    NullValue { side: PairSide },

    /// Compound / list / pair nesting beyond the configured bound.
    #[error("nesting too deep: {depth} > {max}")]
    NestingTooDeep { depth: usize, max: usize },

    #[error("malformed stream: {0}")]
    MalformedStream(String),

    /// Source ended on a token boundary without an end-of-stream tag.
    #[error("truncated stream: no end-of-stream tag after {tokens_read} tokens{}", fmt_last_path(.last_path))]
    TruncatedStream {
        tokens_read: usize,
        last_path: Option<String>,
    },

    #[error("unexpected tag: expected {expected}, found {}", tag_name(.found))]
    UnexpectedTag { expected: Tag, found: u8 },

    #[error("list element {index} is {found}, list declares {expected}")]
    MixedListElement {
        index: usize,
        expected: Tag,
        found: Tag,
    },

    #[error("character {ch:?} is not a single {encoding} unit")]
    UnencodableChar { ch: char, encoding: CharEncoding },

    #[error("invalid {encoding} character unit: {}", fmt_bytes(.bytes))]
    InvalidChar {
        encoding: CharEncoding,
        bytes: Vec<u8>,
    },

    #[error("cancelled after {tokens} tokens")]
    Cancelled { tokens: usize },

    #[error("deadline exceeded after {tokens} tokens")]
    DeadlineExceeded { tokens: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(io::Error),
}

impl From<io::Error> for DynaryError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => DynaryError::UnexpectedEndOfStream,
            _ => DynaryError::Io(e),
        }
    }
}

impl From<serde_json::Error> for DynaryError {
    fn from(e: serde_json::Error) -> Self {
        DynaryError::Config(e.to_string())
    }
}
