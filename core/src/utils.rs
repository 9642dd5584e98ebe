use std::fmt;
use num_enum::TryFromPrimitive;

use crate::tags::Tag;

/// Variant name for a known raw value, `0x..` otherwise.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Tag name or hex for a raw tag byte (error messages).
pub fn tag_name(raw: &u8) -> String {
    enum_name_or_hex::<Tag>(*raw)
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if !b.is_empty() && b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

pub(crate) fn fmt_last_path(path: &Option<String>) -> String {
    match path {
        Some(p) => format!(" (last token {})", p),
        None => String::new(),
    }
}
