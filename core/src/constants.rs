//! constants.rs
//! Stable wire constants and codec limits.
//!
//! Notes:
//! - Tag codes are wire constants; existing encoded files depend on them bit-for-bit.
//! - All multi-byte numerics are little-endian on the wire.

/// Raw tag bytes (mirrored by `tags::Tag`).
pub mod tag_ids {
    pub const BYTE: u8       = 0x00;
    pub const CHAR: u8       = 0x01;
    pub const SHORT: u8      = 0x02;
    pub const INTEGER: u8    = 0x03;
    pub const LONG: u8       = 0x04;
    pub const FLOAT: u8      = 0x05;
    pub const DOUBLE: u8     = 0x06;
    pub const DECIMAL: u8    = 0x07;
    pub const BOOL: u8       = 0x08;
    pub const SBYTE: u8      = 0x09;
    pub const STRING: u8     = 0x0A;
    pub const USHORT: u8     = 0x0B;
    pub const ULONG: u8      = 0x0C;
    pub const UINT: u8       = 0x0D;
    pub const STRUCT: u8     = 0x0E;
    pub const CLASS: u8      = 0x0F;
    pub const COLLECTION: u8 = 0x10;
    pub const DYNAMIC: u8    = 0x11;
    pub const PAIR: u8       = 0x12;
    pub const COMPOUND: u8   = 0x13;
    pub const LIST: u8       = 0x14;
    pub const EOC: u8        = 0x15; // end of compound
    pub const EOF: u8        = 0x16; // end of stream
}

/// Number of tags in the vocabulary (control markers included).
pub const TAG_COUNT: usize = 23;

/// Max characters in a string payload (length is one byte).
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Max elements in a list payload (count is one byte).
pub const MAX_LIST_LEN: usize = u8::MAX as usize;

/// Default bound on compound / list / pair nesting.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Hard ceiling accepted by `CodecOptions::validate`.
pub const MAX_NESTING_DEPTH_LIMIT: usize = 1024;
