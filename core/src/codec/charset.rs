//! codec/charset.rs
//! Fixed-width character encodings for Char and String payloads.
//!
//! The encoding is not recorded in the stream. Reader and writer must agree on it
//! out-of-band; a mismatch decodes garbage or fails with `InvalidChar`.

use std::fmt;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::types::{DynaryError, Result};

/// Character encoding; every character is exactly one code unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharEncoding {
    /// UTF-16 little-endian, BMP only.
    #[default]
    Utf16Le,
    /// UTF-16 big-endian, BMP only.
    Utf16Be,
    /// UTF-32 little-endian.
    Utf32Le,
    /// ISO-8859-1, U+0000..=U+00FF.
    Latin1,
}

impl CharEncoding {
    /// Bytes per character.
    #[inline]
    pub const fn unit_width(self) -> usize {
        match self {
            CharEncoding::Utf16Le | CharEncoding::Utf16Be => 2,
            CharEncoding::Utf32Le => 4,
            CharEncoding::Latin1 => 1,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CharEncoding::Utf16Le => "UTF-16LE",
            CharEncoding::Utf16Be => "UTF-16BE",
            CharEncoding::Utf32Le => "UTF-32LE",
            CharEncoding::Latin1 => "Latin-1",
        }
    }

    /// Append the single code unit for `ch`.
    pub fn encode_char(self, ch: char, out: &mut Vec<u8>) -> Result<()> {
        let cp = ch as u32;
        match self {
            CharEncoding::Utf16Le | CharEncoding::Utf16Be => {
                let unit = u16::try_from(cp)
                    .map_err(|_| DynaryError::UnencodableChar { ch, encoding: self })?;
                let mut buf = [0u8; 2];
                if self == CharEncoding::Utf16Le {
                    LittleEndian::write_u16(&mut buf, unit);
                } else {
                    BigEndian::write_u16(&mut buf, unit);
                }
                out.extend_from_slice(&buf);
            }
            CharEncoding::Utf32Le => {
                out.extend_from_slice(&cp.to_le_bytes());
            }
            CharEncoding::Latin1 => {
                let unit = u8::try_from(cp)
                    .map_err(|_| DynaryError::UnencodableChar { ch, encoding: self })?;
                out.push(unit);
            }
        }
        Ok(())
    }

    /// Decode one code unit; `unit.len()` must equal `unit_width()`.
    pub fn decode_char(self, unit: &[u8]) -> Result<char> {
        debug_assert_eq!(unit.len(), self.unit_width());
        let cp = match self {
            CharEncoding::Utf16Le => LittleEndian::read_u16(unit) as u32,
            CharEncoding::Utf16Be => BigEndian::read_u16(unit) as u32,
            CharEncoding::Utf32Le => LittleEndian::read_u32(unit),
            CharEncoding::Latin1 => unit[0] as u32,
        };
        char::from_u32(cp).ok_or_else(|| DynaryError::InvalidChar {
            encoding: self,
            bytes: unit.to_vec(),
        })
    }
}

impl fmt::Display for CharEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
