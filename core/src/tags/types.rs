//! tags/types.rs
//! Wire tag vocabulary and the static tag table.
//!
//! Notes:
//! - `#[repr(u8)]` + explicit discriminants pin every tag to its wire byte.
//! - Codes are contiguous (0x00..=0x16), so `TAG_TABLE` is indexed by the code itself.
//! - Decimal, Struct, Class, Collection and Dynamic are reserved: they belong to the
//!   vocabulary but carry no payload codec.

use std::fmt;
use num_enum::TryFromPrimitive;

use crate::constants::{tag_ids, TAG_COUNT};
use crate::types::{DynaryError, Result};

/// One-byte wire code naming how the following payload is encoded.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Tag {
    Byte       = tag_ids::BYTE,
    Char       = tag_ids::CHAR,
    Short      = tag_ids::SHORT,
    Integer    = tag_ids::INTEGER,
    Long       = tag_ids::LONG,
    Float      = tag_ids::FLOAT,
    Double     = tag_ids::DOUBLE,
    Decimal    = tag_ids::DECIMAL,
    Bool       = tag_ids::BOOL,
    SByte      = tag_ids::SBYTE,
    String     = tag_ids::STRING,
    UShort     = tag_ids::USHORT,
    ULong      = tag_ids::ULONG,
    UInt       = tag_ids::UINT,
    Struct     = tag_ids::STRUCT,
    Class      = tag_ids::CLASS,
    Collection = tag_ids::COLLECTION,
    Dynamic    = tag_ids::DYNAMIC,
    Pair       = tag_ids::PAIR,
    Compound   = tag_ids::COMPOUND,
    List       = tag_ids::LIST,
    Eoc        = tag_ids::EOC,
    Eof        = tag_ids::EOF,
}

/// Payload shape that follows a tag on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PayloadKind {
    /// Fixed number of little-endian bytes.
    Fixed(usize),
    /// One unit of the active character encoding.
    Char,
    /// Length byte followed by characters.
    LengthPrefixed,
    /// Pair, Compound or List.
    Composite,
    /// End-Of-Compound / End-Of-Stream: no payload.
    Control,
    /// In the vocabulary, never encoded.
    Reserved,
}

/// One row of the static tag table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagInfo {
    pub tag: Tag,
    pub name: &'static str,
    pub payload: PayloadKind,
}

const fn row(tag: Tag, name: &'static str, payload: PayloadKind) -> TagInfo {
    TagInfo { tag, name, payload }
}

/// Static tag table, indexed by wire code.
pub static TAG_TABLE: [TagInfo; TAG_COUNT] = [
    row(Tag::Byte,       "byte",       PayloadKind::Fixed(1)),
    row(Tag::Char,       "char",       PayloadKind::Char),
    row(Tag::Short,      "short",      PayloadKind::Fixed(2)),
    row(Tag::Integer,    "int",        PayloadKind::Fixed(4)),
    row(Tag::Long,       "long",       PayloadKind::Fixed(8)),
    row(Tag::Float,      "float",      PayloadKind::Fixed(4)),
    row(Tag::Double,     "double",     PayloadKind::Fixed(8)),
    row(Tag::Decimal,    "decimal",    PayloadKind::Reserved),
    row(Tag::Bool,       "bool",       PayloadKind::Fixed(1)),
    row(Tag::SByte,      "sbyte",      PayloadKind::Fixed(1)),
    row(Tag::String,     "string",     PayloadKind::LengthPrefixed),
    row(Tag::UShort,     "ushort",     PayloadKind::Fixed(2)),
    row(Tag::ULong,      "ulong",      PayloadKind::Fixed(8)),
    row(Tag::UInt,       "uint",       PayloadKind::Fixed(4)),
    row(Tag::Struct,     "struct",     PayloadKind::Reserved),
    row(Tag::Class,      "class",      PayloadKind::Reserved),
    row(Tag::Collection, "collection", PayloadKind::Reserved),
    row(Tag::Dynamic,    "dynamic",    PayloadKind::Reserved),
    row(Tag::Pair,       "pair",       PayloadKind::Composite),
    row(Tag::Compound,   "compound",   PayloadKind::Composite),
    row(Tag::List,       "list",       PayloadKind::Composite),
    row(Tag::Eoc,        "eoc",        PayloadKind::Control),
    row(Tag::Eof,        "eof",        PayloadKind::Control),
];

impl Tag {
    /// Every tag in wire-code order.
    pub const ALL: [Tag; TAG_COUNT] = [
        Tag::Byte, Tag::Char, Tag::Short, Tag::Integer, Tag::Long, Tag::Float,
        Tag::Double, Tag::Decimal, Tag::Bool, Tag::SByte, Tag::String, Tag::UShort,
        Tag::ULong, Tag::UInt, Tag::Struct, Tag::Class, Tag::Collection, Tag::Dynamic,
        Tag::Pair, Tag::Compound, Tag::List, Tag::Eoc, Tag::Eof,
    ];

    #[inline(always)]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decode a raw tag byte; bytes outside the vocabulary are `UnsupportedType`.
    #[inline]
    pub fn from_u8(raw: u8) -> Result<Self> {
        Tag::try_from_primitive(raw).map_err(|_| DynaryError::UnsupportedType { raw })
    }

    #[inline]
    pub fn info(self) -> &'static TagInfo {
        &TAG_TABLE[self as usize]
    }

    /// Lower-case type name from the tag table.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn payload(self) -> PayloadKind {
        self.info().payload
    }

    /// Byte width of fixed-size payloads. Char width depends on the encoding,
    /// so it is `None` here.
    pub fn fixed_width(self) -> Option<usize> {
        match self.payload() {
            PayloadKind::Fixed(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_control(self) -> bool {
        matches!(self, Tag::Eoc | Tag::Eof)
    }

    pub fn is_reserved(self) -> bool {
        self.payload() == PayloadKind::Reserved
    }

    /// True when a payload codec exists for this tag.
    pub fn is_encodable(self) -> bool {
        !self.is_control() && !self.is_reserved()
    }

    /// Fail with `UnsupportedType` unless a payload codec exists.
    pub fn ensure_encodable(self) -> Result<Self> {
        if self.is_encodable() {
            Ok(self)
        } else {
            Err(DynaryError::UnsupportedType { raw: self.to_u8() })
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> u8 {
        tag.to_u8()
    }
}
