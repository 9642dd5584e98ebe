//! tags/mapping.rs
//! Static type <-> tag mapping.
//!
//! Notes:
//! - `WireType` is the compile-time half: a Rust type names its tag as an associated
//!   constant, so an unsupported type simply has no impl.
//! - Lists are reachable only through the dedicated list path (`List`, `write_list`),
//!   never through `WireType` or `tag_of_name`.
//! - `tag_of_name` is the runtime half, driven by the names in `TAG_TABLE`.

use crate::tags::types::{Tag, TAG_TABLE};
use crate::types::{DynaryError, Result};
use crate::value::{Compound, Pair, Value};

/// A Rust type with a fixed wire tag.
pub trait WireType: Sized {
    const TAG: Tag;

    fn into_value(self) -> Value;

    /// Unwrap a decoded value; a different variant is `UnexpectedTag`.
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! wire_type {
    ($ty:ty, $tag:ident) => {
        impl WireType for $ty {
            const TAG: Tag = Tag::$tag;

            #[inline]
            fn into_value(self) -> Value {
                Value::$tag(self)
            }

            #[inline]
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$tag(v) => Ok(v),
                    other => Err(DynaryError::UnexpectedTag {
                        expected: Tag::$tag,
                        found: other.tag().to_u8(),
                    }),
                }
            }
        }

        impl From<$ty> for Value {
            #[inline]
            fn from(v: $ty) -> Value {
                Value::$tag(v)
            }
        }
    };
}

wire_type!(u8, Byte);
wire_type!(char, Char);
wire_type!(i16, Short);
wire_type!(i32, Integer);
wire_type!(i64, Long);
wire_type!(f32, Float);
wire_type!(f64, Double);
wire_type!(bool, Bool);
wire_type!(i8, SByte);
wire_type!(String, String);
wire_type!(u16, UShort);
wire_type!(u64, ULong);
wire_type!(u32, UInt);
wire_type!(Compound, Compound);

impl WireType for Pair {
    const TAG: Tag = Tag::Pair;

    fn into_value(self) -> Value {
        Value::Pair(Box::new(self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Pair(p) => Ok(*p),
            other => Err(DynaryError::UnexpectedTag {
                expected: Tag::Pair,
                found: other.tag().to_u8(),
            }),
        }
    }
}

impl From<Pair> for Value {
    fn from(p: Pair) -> Value {
        Value::Pair(Box::new(p))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_owned())
    }
}

/// Tag of a `WireType`.
#[inline]
pub const fn tag_of<T: WireType>() -> Tag {
    T::TAG
}

/// Resolve a type name from the tag table (`"int"`, `"ushort"`, `"compound"`, ...).
///
/// Only names with a payload codec resolve. `"list"` is rejected: lists go through
/// the list path, which carries its own element tag.
pub fn tag_of_name(name: &str) -> Result<Tag> {
    TAG_TABLE
        .iter()
        .find(|info| info.name == name)
        .map(|info| info.tag)
        .filter(|tag| tag.is_encodable() && *tag != Tag::List)
        .ok_or_else(|| DynaryError::UnsupportedTypeName { name: name.to_owned() })
}
