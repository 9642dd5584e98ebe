//! reader/engine.rs
//!
//! Sequential decoder mirroring `writer/engine.rs`.
//!
//! Design notes:
//! - Every value starts with a tag byte; the payload routine is chosen from it.
//! - `read_to_end` stops at End-Of-Stream (or a stray End-Of-Compound). A source
//!   that ends cleanly on a token boundary is `TruncatedStream`; one that ends
//!   inside a token is `UnexpectedEndOfStream`. Partial results are never returned
//!   as success.
//! - End-Of-Stream inside an open compound follows `CompoundTerminator`. When it
//!   is accepted, it closes every open compound and ends the stream.
//! - Recursion depth is bounded by `CodecOptions::max_depth`.

use std::io::Read;
use std::time::Instant;
use tracing::{debug, trace, warn};

use crate::cancel::CancelToken;
use crate::codec::decode::*;
use crate::config::{CodecOptions, CompoundTerminator};
use crate::constants::MAX_LIST_LEN;
use crate::io::Counted;
use crate::tags::{Tag, WireType};
use crate::telemetry::{CodecCounters, CodecSnapshot, Direction};
use crate::types::{DynaryError, LengthKind, Result};
use crate::value::{Compound, CompoundId, List, Pair, Token, Value};

/// Reader over an exclusively borrowed byte source.
#[derive(Debug)]
pub struct DynaryReader<R: Read> {
    inner: Counted<R>,
    options: CodecOptions,
    counters: CodecCounters,
    started: Instant,
    depth: usize,
    last_compound_id: u64,
    next_sequence: u64,
    eof_consumed: bool,
}

impl<R: Read> DynaryReader<R> {
    /// Reader with default options (UTF-16LE, strict compound termination).
    pub fn new(inner: R) -> Self {
        Self {
            inner: Counted::new(inner),
            options: CodecOptions::default(),
            counters: CodecCounters::default(),
            started: Instant::now(),
            depth: 0,
            last_compound_id: 0,
            next_sequence: 0,
            eof_consumed: false,
        }
    }

    pub fn with_options(inner: R, options: CodecOptions) -> Result<Self> {
        options.validate()?;
        let mut r = Self::new(inner);
        r.options = options;
        Ok(r)
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn counters(&self) -> CodecCounters {
        let mut c = self.counters.clone();
        c.bytes = self.inner.count();
        c
    }

    pub fn snapshot(&self) -> CodecSnapshot {
        CodecSnapshot::from(Direction::Decode, &self.counters(), self.started.elapsed())
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.inner.count()
    }

    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }

    // ================= Tags =================

    pub fn read_tag(&mut self) -> Result<Tag> {
        Tag::from_u8(get_u8(&mut self.inner)?)
    }

    fn expect_tag(&mut self, expected: Tag) -> Result<()> {
        let found = get_u8(&mut self.inner)?;
        if found != expected.to_u8() {
            return Err(DynaryError::UnexpectedTag { expected, found });
        }
        Ok(())
    }

    // ================= Generic =================

    /// One tagged value. Control tags are not values here.
    pub fn read_value(&mut self) -> Result<Value> {
        let tag = self.read_tag()?;
        self.read_payload(tag)
    }

    /// Payload for an already consumed tag.
    pub fn read_payload(&mut self, tag: Tag) -> Result<Value> {
        let enc = self.options.encoding;
        let r = &mut self.inner;
        let value = match tag {
            Tag::Byte     => Value::Byte(get_u8(r)?),
            Tag::Char     => Value::Char(get_char(r, enc)?),
            Tag::Short    => Value::Short(get_i16(r)?),
            Tag::Integer  => Value::Integer(get_i32(r)?),
            Tag::Long     => Value::Long(get_i64(r)?),
            Tag::Float    => Value::Float(get_f32(r)?),
            Tag::Double   => Value::Double(get_f64(r)?),
            Tag::Bool     => Value::Bool(get_bool(r)?),
            Tag::SByte    => Value::SByte(get_i8(r)?),
            Tag::UShort   => Value::UShort(get_u16(r)?),
            Tag::ULong    => Value::ULong(get_u64(r)?),
            Tag::UInt     => Value::UInt(get_u32(r)?),
            Tag::String   => {
                let s = get_str(r, enc)?;
                self.counters.add_string();
                Value::String(s)
            }
            Tag::Pair     => Value::Pair(Box::new(self.decode_pair()?)),
            Tag::Compound => Value::Compound(self.decode_compound()?),
            Tag::List     => Value::List(self.decode_list()?),
            Tag::Eoc | Tag::Eof => {
                return Err(DynaryError::MalformedStream(format!(
                    "{} marker where a value was expected",
                    tag
                )))
            }
            Tag::Decimal | Tag::Struct | Tag::Class | Tag::Collection | Tag::Dynamic => {
                return Err(DynaryError::UnsupportedType { raw: tag.to_u8() })
            }
        };
        Ok(value)
    }

    /// Tag-checked read of a concrete wire type.
    pub fn read_typed<T: WireType>(&mut self) -> Result<T> {
        self.expect_tag(T::TAG)?;
        T::from_value(self.read_payload(T::TAG)?)
    }

    /// Next token, or `None` at End-Of-Stream / End-Of-Compound.
    /// Sequence ids count the tokens returned by this reader.
    pub fn read_token(&mut self) -> Result<Option<Token>> {
        if self.eof_consumed {
            return Ok(None);
        }
        let tag = self.read_tag()?;
        if tag.is_control() {
            return Ok(None);
        }
        let value = self.read_payload(tag)?;
        let token = Token::with_sequence(value, self.next_sequence);
        self.next_sequence += 1;
        self.counters.add_token();
        Ok(Some(token))
    }

    // ================= Fixed width =================

    pub fn read_byte(&mut self) -> Result<u8> {
        self.read_typed()
    }

    pub fn read_sbyte(&mut self) -> Result<i8> {
        self.read_typed()
    }

    pub fn read_short(&mut self) -> Result<i16> {
        self.read_typed()
    }

    pub fn read_ushort(&mut self) -> Result<u16> {
        self.read_typed()
    }

    pub fn read_integer(&mut self) -> Result<i32> {
        self.read_typed()
    }

    pub fn read_uint(&mut self) -> Result<u32> {
        self.read_typed()
    }

    pub fn read_long(&mut self) -> Result<i64> {
        self.read_typed()
    }

    pub fn read_ulong(&mut self) -> Result<u64> {
        self.read_typed()
    }

    pub fn read_float(&mut self) -> Result<f32> {
        self.read_typed()
    }

    pub fn read_double(&mut self) -> Result<f64> {
        self.read_typed()
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_typed()
    }

    pub fn read_char(&mut self) -> Result<char> {
        self.read_typed()
    }

    // ================= Length-prefixed =================

    pub fn read_string(&mut self) -> Result<String> {
        self.read_typed()
    }

    pub fn read_list(&mut self) -> Result<List> {
        self.expect_tag(Tag::List)?;
        self.decode_list()
    }

    /// List whose element tag must be `T::TAG`.
    pub fn read_list_of<T: WireType>(&mut self) -> Result<Vec<T>> {
        self.read_list()?.into_typed()
    }

    // ================= Composite =================

    pub fn read_pair(&mut self) -> Result<Pair> {
        self.read_typed()
    }

    /// Pair whose key and value tags must be `K::TAG` and `V::TAG`.
    pub fn read_typed_pair<K: WireType, V: WireType>(&mut self) -> Result<(K, V)> {
        self.expect_tag(Tag::Pair)?;
        self.enter()?;
        let res: Result<(K, V)> = (|| {
            let key = self.read_typed::<K>()?;
            let value = self.read_typed::<V>()?;
            Ok((key, value))
        })();
        self.leave();
        if res.is_ok() {
            self.counters.add_pair();
        }
        res
    }

    /// Next compound. `Ok(None)` when the next byte is not the Compound tag
    /// (the byte is consumed).
    pub fn read_compound(&mut self) -> Result<Option<Compound>> {
        let raw = get_u8(&mut self.inner)?;
        if raw != Tag::Compound.to_u8() {
            debug!(found = raw, "expected compound tag");
            return Ok(None);
        }
        self.decode_compound().map(Some)
    }

    // ================= Stream =================

    /// All tokens up to End-Of-Stream, sequence ids in stream order.
    pub fn read_to_end(&mut self) -> Result<Vec<Token>> {
        self.read_to_end_with(&CancelToken::new())
    }

    /// `read_to_end` with cancellation checked between top-level tokens.
    pub fn read_to_end_with(&mut self, cancel: &CancelToken) -> Result<Vec<Token>> {
        let mut tokens: Vec<Token> = Vec::new();
        loop {
            if self.eof_consumed {
                return Ok(tokens);
            }
            cancel.check(tokens.len())?;

            let raw = match try_get_u8(&mut self.inner)? {
                Some(raw) => raw,
                None => {
                    let last_path = tokens.last().map(Token::to_path);
                    warn!(tokens = tokens.len(), "stream ended without end-of-stream tag");
                    return Err(DynaryError::TruncatedStream {
                        tokens_read: tokens.len(),
                        last_path,
                    });
                }
            };

            let tag = Tag::from_u8(raw)?;
            if tag.is_control() {
                debug!(tokens = tokens.len(), terminator = %tag, "stream complete");
                return Ok(tokens);
            }

            let value = self.read_payload(tag)?;
            let token = Token::with_sequence(value, tokens.len() as u64);
            trace!(path = %token.to_path(), "read token");
            self.counters.add_token();
            tokens.push(token);
        }
    }

    // ================= Payloads =================

    fn decode_pair(&mut self) -> Result<Pair> {
        self.enter()?;
        let res = self.decode_pair_body();
        self.leave();
        res
    }

    fn decode_pair_body(&mut self) -> Result<Pair> {
        let key = self.read_value()?;
        let value = self.read_value()?;
        self.counters.add_pair();
        Ok(Pair::new(key, value))
    }

    fn decode_list(&mut self) -> Result<List> {
        self.enter()?;
        let res = self.decode_list_body();
        self.leave();
        res
    }

    fn decode_list_body(&mut self) -> Result<List> {
        let count = get_u8(&mut self.inner)? as usize;
        if count == 0 {
            return Err(DynaryError::InvalidLength {
                what: LengthKind::List,
                len: 0,
                min: 1,
                max: MAX_LIST_LEN,
            });
        }

        let element = self.read_tag()?.ensure_encodable()?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.read_payload(element)?);
        }
        self.counters.add_list();
        Ok(List::from_decoded(element, items))
    }

    fn decode_compound(&mut self) -> Result<Compound> {
        self.enter()?;
        let res = self.decode_compound_body();
        self.leave();
        res
    }

    fn decode_compound_body(&mut self) -> Result<Compound> {
        self.last_compound_id += 1;
        let mut compound = Compound::with_id(CompoundId(self.last_compound_id));

        loop {
            match self.read_tag()? {
                Tag::Eoc => break,
                Tag::Eof => match self.options.compound_terminator {
                    CompoundTerminator::Lenient => {
                        warn!(compound = %compound.id(), "end-of-stream closed an open compound");
                        self.eof_consumed = true;
                        break;
                    }
                    CompoundTerminator::Strict => {
                        return Err(DynaryError::MalformedStream(format!(
                            "end-of-stream inside compound {} after {} tokens",
                            compound.id(),
                            compound.len()
                        )));
                    }
                },
                tag => {
                    let value = self.read_payload(tag)?;
                    compound.push(value);
                    self.counters.add_token();
                    // a nested compound already consumed End-Of-Stream
                    if self.eof_consumed {
                        break;
                    }
                }
            }
        }

        self.counters.add_compound();
        Ok(compound)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            let depth = self.depth;
            self.depth -= 1;
            return Err(DynaryError::NestingTooDeep { depth, max: self.options.max_depth });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
