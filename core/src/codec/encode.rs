//! codec/encode.rs
//!
//! Primitive payload encoders shared by the writer.
//!
//! Design notes:
//! - Every multi-byte numeric is little-endian.
//! - Bool is a single byte, 0 or 1.
//! - These functions write payloads only; tags are the writer's job.
//! - Strings are assembled in a scratch buffer first so an unencodable character
//!   leaves the sink untouched.

use std::io::Write;
use byteorder::{LittleEndian, WriteBytesExt};

use crate::codec::CharEncoding;
use crate::constants::MAX_STRING_LEN;
use crate::tags::Tag;
use crate::types::{DynaryError, LengthKind, Result};

#[inline]
pub fn put_tag<W: Write>(w: &mut W, tag: Tag) -> Result<()> {
    w.write_u8(tag.to_u8())?;
    Ok(())
}

#[inline]
pub fn put_u8<W: Write>(w: &mut W, v: u8) -> Result<()> {
    w.write_u8(v)?;
    Ok(())
}

#[inline]
pub fn put_i8<W: Write>(w: &mut W, v: i8) -> Result<()> {
    w.write_i8(v)?;
    Ok(())
}

#[inline]
pub fn put_i16<W: Write>(w: &mut W, v: i16) -> Result<()> {
    w.write_i16::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_u16<W: Write>(w: &mut W, v: u16) -> Result<()> {
    w.write_u16::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_i32<W: Write>(w: &mut W, v: i32) -> Result<()> {
    w.write_i32::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_u32<W: Write>(w: &mut W, v: u32) -> Result<()> {
    w.write_u32::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_i64<W: Write>(w: &mut W, v: i64) -> Result<()> {
    w.write_i64::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_u64<W: Write>(w: &mut W, v: u64) -> Result<()> {
    w.write_u64::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_f32<W: Write>(w: &mut W, v: f32) -> Result<()> {
    w.write_f32::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_f64<W: Write>(w: &mut W, v: f64) -> Result<()> {
    w.write_f64::<LittleEndian>(v)?;
    Ok(())
}

#[inline]
pub fn put_bool<W: Write>(w: &mut W, v: bool) -> Result<()> {
    w.write_u8(v as u8)?;
    Ok(())
}

pub fn put_char<W: Write>(w: &mut W, ch: char, enc: CharEncoding) -> Result<()> {
    let mut buf = Vec::with_capacity(enc.unit_width());
    enc.encode_char(ch, &mut buf)?;
    w.write_all(&buf)?;
    Ok(())
}

/// String payload: `[len: u8][unit; len]`.
///
/// Strict: more than `MAX_STRING_LEN` characters is `InvalidLength`. Empty strings
/// are valid payloads; skipping blank strings is a writer policy, not a codec rule.
pub fn put_str<W: Write>(w: &mut W, text: &str, enc: CharEncoding) -> Result<()> {
    let len = text.chars().count();
    if len > MAX_STRING_LEN {
        return Err(DynaryError::InvalidLength {
            what: LengthKind::String,
            len,
            min: 0,
            max: MAX_STRING_LEN,
        });
    }

    let mut buf = Vec::with_capacity(1 + len * enc.unit_width());
    buf.push(len as u8);
    for ch in text.chars() {
        enc.encode_char(ch, &mut buf)?;
    }
    w.write_all(&buf)?;
    Ok(())
}
