//! codec/decode.rs
//!
//! Primitive payload decoders shared by the reader.
//!
//! Design notes:
//! - Mirrors `encode.rs` field for field, little-endian throughout.
//! - A short read surfaces as `UnexpectedEndOfStream` through `From<io::Error>`.
//! - `try_get_u8` is the only boundary-aware read: it reports a clean end of
//!   source as `None` so the stream loop can tell truncation from corruption.

use std::io::{ErrorKind, Read};
use byteorder::{LittleEndian, ReadBytesExt};

use crate::codec::CharEncoding;
use crate::types::Result;

/// One byte, or `None` when the source is exhausted.
pub fn try_get_u8<R: Read>(r: &mut R) -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

#[inline]
pub fn get_u8<R: Read>(r: &mut R) -> Result<u8> {
    Ok(r.read_u8()?)
}

#[inline]
pub fn get_i8<R: Read>(r: &mut R) -> Result<i8> {
    Ok(r.read_i8()?)
}

#[inline]
pub fn get_i16<R: Read>(r: &mut R) -> Result<i16> {
    Ok(r.read_i16::<LittleEndian>()?)
}

#[inline]
pub fn get_u16<R: Read>(r: &mut R) -> Result<u16> {
    Ok(r.read_u16::<LittleEndian>()?)
}

#[inline]
pub fn get_i32<R: Read>(r: &mut R) -> Result<i32> {
    Ok(r.read_i32::<LittleEndian>()?)
}

#[inline]
pub fn get_u32<R: Read>(r: &mut R) -> Result<u32> {
    Ok(r.read_u32::<LittleEndian>()?)
}

#[inline]
pub fn get_i64<R: Read>(r: &mut R) -> Result<i64> {
    Ok(r.read_i64::<LittleEndian>()?)
}

#[inline]
pub fn get_u64<R: Read>(r: &mut R) -> Result<u64> {
    Ok(r.read_u64::<LittleEndian>()?)
}

#[inline]
pub fn get_f32<R: Read>(r: &mut R) -> Result<f32> {
    Ok(r.read_f32::<LittleEndian>()?)
}

#[inline]
pub fn get_f64<R: Read>(r: &mut R) -> Result<f64> {
    Ok(r.read_f64::<LittleEndian>()?)
}

/// Any non-zero byte is `true`.
#[inline]
pub fn get_bool<R: Read>(r: &mut R) -> Result<bool> {
    Ok(r.read_u8()? != 0)
}

pub fn get_char<R: Read>(r: &mut R, enc: CharEncoding) -> Result<char> {
    let mut unit = [0u8; 4];
    let unit = &mut unit[..enc.unit_width()];
    r.read_exact(unit)?;
    enc.decode_char(unit)
}

/// String payload: `[len: u8][unit; len]`, decoded one character at a time.
pub fn get_str<R: Read>(r: &mut R, enc: CharEncoding) -> Result<String> {
    let len = get_u8(r)? as usize;
    let mut out = String::with_capacity(len);
    for _ in 0..len {
        out.push(get_char(r, enc)?);
    }
    Ok(out)
}
