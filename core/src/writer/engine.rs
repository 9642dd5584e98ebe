//! writer/engine.rs
//!
//! Sequential encoder: appends `[tag][payload]` values to a byte sink.
//!
//! Design notes:
//! - Tagged writes (`write_*`, tokens inside compounds) apply the length policy:
//!   blank or oversized strings and empty or oversized lists are skipped or rejected.
//! - Payloads nested in a list or a pair are strict: skipping one would corrupt the
//!   enclosing count or the key/value shape, so bad lengths are always errors there.
//! - A pair with a missing side is always `NullValue`, never skipped.
//! - Recursion depth is bounded by `CodecOptions::max_depth`.

use std::io::Write;
use std::time::Instant;
use tracing::{debug, trace};

use crate::cancel::CancelToken;
use crate::codec::encode::*;
use crate::config::{CodecOptions, LengthPolicy};
use crate::constants::{MAX_LIST_LEN, MAX_STRING_LEN};
use crate::io::Counted;
use crate::tags::{Tag, WireType};
use crate::telemetry::{CodecCounters, CodecSnapshot, Direction};
use crate::types::{DynaryError, LengthKind, Result};
use crate::value::{Compound, List, Pair, Token, Value};

/// Writer over an exclusively borrowed byte sink.
#[derive(Debug)]
pub struct DynaryWriter<W: Write> {
    inner: Counted<W>,
    options: CodecOptions,
    counters: CodecCounters,
    started: Instant,
    depth: usize,
}

impl<W: Write> DynaryWriter<W> {
    /// Writer with default options (UTF-16LE, skip policy).
    pub fn new(inner: W) -> Self {
        Self {
            inner: Counted::new(inner),
            options: CodecOptions::default(),
            counters: CodecCounters::default(),
            started: Instant::now(),
            depth: 0,
        }
    }

    pub fn with_options(inner: W, options: CodecOptions) -> Result<Self> {
        options.validate()?;
        let mut w = Self::new(inner);
        w.options = options;
        Ok(w)
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
        CodecSnapshot::from(Direction::Encode, &self.counters(), self.started.elapsed())
    }

    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    // ================= Control =================

    /// Raw tag byte, no payload.
    pub fn write_tag(&mut self, tag: Tag) -> Result<()> {
        put_tag(&mut self.inner, tag)
    }

    pub fn end_compound(&mut self) -> Result<()> {
        self.write_tag(Tag::Eoc)
    }

    pub fn end_stream(&mut self) -> Result<()> {
        debug!(tokens = self.counters.tokens, "writing end-of-stream");
        self.write_tag(Tag::Eof)
    }

    // ================= Fixed width =================

    pub fn write_byte(&mut self, v: u8) -> Result<()> {
        self.write_tag(Tag::Byte)?;
        put_u8(&mut self.inner, v)
    }

    pub fn write_sbyte(&mut self, v: i8) -> Result<()> {
        self.write_tag(Tag::SByte)?;
        put_i8(&mut self.inner, v)
    }

    pub fn write_short(&mut self, v: i16) -> Result<()> {
        self.write_tag(Tag::Short)?;
        put_i16(&mut self.inner, v)
    }

    pub fn write_ushort(&mut self, v: u16) -> Result<()> {
        self.write_tag(Tag::UShort)?;
        put_u16(&mut self.inner, v)
    }

    pub fn write_integer(&mut self, v: i32) -> Result<()> {
        self.write_tag(Tag::Integer)?;
        put_i32(&mut self.inner, v)
    }

    pub fn write_uint(&mut self, v: u32) -> Result<()> {
        self.write_tag(Tag::UInt)?;
        put_u32(&mut self.inner, v)
    }

    pub fn write_long(&mut self, v: i64) -> Result<()> {
        self.write_tag(Tag::Long)?;
        put_i64(&mut self.inner, v)
    }

    pub fn write_ulong(&mut self, v: u64) -> Result<()> {
        self.write_tag(Tag::ULong)?;
        put_u64(&mut self.inner, v)
    }

    pub fn write_float(&mut self, v: f32) -> Result<()> {
        self.write_tag(Tag::Float)?;
        put_f32(&mut self.inner, v)
    }

    pub fn write_double(&mut self, v: f64) -> Result<()> {
        self.write_tag(Tag::Double)?;
        put_f64(&mut self.inner, v)
    }

    pub fn write_bool(&mut self, v: bool) -> Result<()> {
        self.write_tag(Tag::Bool)?;
        put_bool(&mut self.inner, v)
    }

    /// Char in the active encoding; an unencodable char writes nothing.
    pub fn write_char(&mut self, ch: char) -> Result<()> {
        let mut unit = Vec::with_capacity(4);
        self.options.encoding.encode_char(ch, &mut unit)?;
        self.write_tag(Tag::Char)?;
        self.inner.write_all(&unit)?;
        Ok(())
    }

    // ================= Length-prefixed =================

    /// String value. Blank strings and strings over 255 characters follow the
    /// length policy. An unencodable character writes nothing.
    pub fn write_string(&mut self, text: &str) -> Result<()> {
        if !self.admit_string(text)? {
            return Ok(());
        }
        let mut payload = Vec::with_capacity(1 + text.len() * self.options.encoding.unit_width());
        put_str(&mut payload, text, self.options.encoding)?;
        self.write_tag(Tag::String)?;
        self.inner.write_all(&payload)?;
        self.counters.add_string();
        Ok(())
    }

    /// List value: `[List][count][element tag][payload; count]`.
    /// Empty lists and lists over 255 elements follow the length policy.
    pub fn write_list(&mut self, list: &List) -> Result<()> {
        if !self.admit_list(list)? {
            return Ok(());
        }
        self.write_tag(Tag::List)?;
        self.encode_list(list)
    }

    /// Typed convenience over `write_list`.
    pub fn write_list_of<T: WireType + Clone>(&mut self, items: &[T]) -> Result<()> {
        let list = List::from_items(items.iter().cloned());
        self.write_list(&list)
    }

    // ================= Composite =================

    /// Pair from optional halves; a missing side is `NullValue` and writes nothing.
    pub fn write_pair_parts(&mut self, key: Option<&Value>, value: Option<&Value>) -> Result<()> {
        let pair = Pair::try_new(key.cloned(), value.cloned())?;
        self.write_pair(&pair)
    }

    /// `[Pair][key tag][key payload][value tag][value payload]`, key first.
    pub fn write_pair(&mut self, pair: &Pair) -> Result<()> {
        self.write_tag(Tag::Pair)?;
        self.encode_pair(pair)
    }

    /// Pair with compile-time key and value types.
    pub fn write_typed_pair<K: WireType, V: WireType>(&mut self, key: K, value: V) -> Result<()> {
        let pair = Pair::new(key.into_value(), value.into_value());
        self.write_pair(&pair)
    }

    /// `[Compound][token...][Eoc]`.
    pub fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        self.write_tag(Tag::Compound)?;
        self.encode_compound(compound)
    }

    // ================= Generic =================

    /// Any value, tagged, under the length policy.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v)     => self.write_byte(*v),
            Value::Char(v)     => self.write_char(*v),
            Value::Short(v)    => self.write_short(*v),
            Value::Integer(v)  => self.write_integer(*v),
            Value::Long(v)     => self.write_long(*v),
            Value::Float(v)    => self.write_float(*v),
            Value::Double(v)   => self.write_double(*v),
            Value::Bool(v)     => self.write_bool(*v),
            Value::SByte(v)    => self.write_sbyte(*v),
            Value::String(v)   => self.write_string(v),
            Value::UShort(v)   => self.write_ushort(*v),
            Value::ULong(v)    => self.write_ulong(*v),
            Value::UInt(v)     => self.write_uint(*v),
            Value::Pair(p)     => self.write_pair(p),
            Value::Compound(c) => self.write_compound(c),
            Value::List(l)     => self.write_list(l),
        }
    }

    /// Counted only when bytes reach the sink; a skipped value is not a token.
    pub fn write_token(&mut self, token: &Token) -> Result<()> {
        let before = self.inner.count();
        self.write_value(token.value())?;
        if self.inner.count() > before {
            trace!(path = %token.to_path(), "wrote token");
            self.counters.add_token();
        }
        Ok(())
    }

    /// Every token, then End-Of-Stream.
    pub fn write_stream<'a, I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Token>,
    {
        self.write_stream_with(tokens, &CancelToken::new())
    }

    /// `write_stream` with cancellation checked between top-level tokens.
    /// A cancelled stream is left without its End-Of-Stream tag.
    pub fn write_stream_with<'a, I>(&mut self, tokens: I, cancel: &CancelToken) -> Result<()>
    where
        I: IntoIterator<Item = &'a Token>,
    {
        for (written, token) in tokens.into_iter().enumerate() {
            cancel.check(written)?;
            self.write_token(token)?;
        }
        self.end_stream()
    }

    // ================= Policy =================

    fn admit_string(&mut self, text: &str) -> Result<bool> {
        let len = text.chars().count();
        if len <= MAX_STRING_LEN && !text.trim().is_empty() {
            return Ok(true);
        }
        match self.options.length_policy {
            LengthPolicy::Skip => {
                debug!(len, "skipping blank or oversized string");
                self.counters.add_skipped_string();
                Ok(false)
            }
            LengthPolicy::Strict => Err(DynaryError::InvalidLength {
                what: LengthKind::String,
                // blank strings report as zero significant characters
                len: if len > MAX_STRING_LEN { len } else { 0 },
                min: 1,
                max: MAX_STRING_LEN,
            }),
        }
    }

    fn admit_list(&mut self, list: &List) -> Result<bool> {
        let len = list.len();
        if (1..=MAX_LIST_LEN).contains(&len) {
            return Ok(true);
        }
        match self.options.length_policy {
            LengthPolicy::Skip => {
                debug!(len, element = %list.element(), "skipping empty or oversized list");
                self.counters.add_skipped_list();
                Ok(false)
            }
            LengthPolicy::Strict => Err(list_length_error(len)),
        }
    }

    // ================= Payloads =================

    /// Payload without tag. Strings and lists here are strict.
    fn encode_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v)     => put_u8(&mut self.inner, *v),
            Value::Char(v)     => put_char(&mut self.inner, *v, self.options.encoding),
            Value::Short(v)    => put_i16(&mut self.inner, *v),
            Value::Integer(v)  => put_i32(&mut self.inner, *v),
            Value::Long(v)     => put_i64(&mut self.inner, *v),
            Value::Float(v)    => put_f32(&mut self.inner, *v),
            Value::Double(v)   => put_f64(&mut self.inner, *v),
            Value::Bool(v)     => put_bool(&mut self.inner, *v),
            Value::SByte(v)    => put_i8(&mut self.inner, *v),
            Value::String(v)   => self.encode_string(v),
            Value::UShort(v)   => put_u16(&mut self.inner, *v),
            Value::ULong(v)    => put_u64(&mut self.inner, *v),
            Value::UInt(v)     => put_u32(&mut self.inner, *v),
            Value::Pair(p)     => self.encode_pair(p),
            Value::Compound(c) => self.encode_compound(c),
            Value::List(l)     => {
                if !(1..=MAX_LIST_LEN).contains(&l.len()) {
                    return Err(list_length_error(l.len()));
                }
                self.encode_list(l)
            }
        }
    }

    fn encode_string(&mut self, text: &str) -> Result<()> {
        put_str(&mut self.inner, text, self.options.encoding)?;
        self.counters.add_string();
        Ok(())
    }

    fn encode_list(&mut self, list: &List) -> Result<()> {
        self.enter()?;
        let res = self.encode_list_body(list);
        self.leave();
        res
    }

    fn encode_list_body(&mut self, list: &List) -> Result<()> {
        put_u8(&mut self.inner, list.len() as u8)?;
        put_tag(&mut self.inner, list.element())?;
        for item in list {
            self.encode_payload(item)?;
        }
        self.counters.add_list();
        Ok(())
    }

    fn encode_pair(&mut self, pair: &Pair) -> Result<()> {
        self.enter()?;
        let res = self.encode_pair_body(pair);
        self.leave();
        res
    }

    fn encode_pair_body(&mut self, pair: &Pair) -> Result<()> {
        put_tag(&mut self.inner, pair.key_tag())?;
        self.encode_payload(pair.key())?;
        put_tag(&mut self.inner, pair.value_tag())?;
        self.encode_payload(pair.value())?;
        self.counters.add_pair();
        Ok(())
    }

    fn encode_compound(&mut self, compound: &Compound) -> Result<()> {
        self.enter()?;
        let res = self.encode_compound_body(compound);
        self.leave();
        res
    }

    fn encode_compound_body(&mut self, compound: &Compound) -> Result<()> {
        for token in compound {
            self.write_token(token)?;
        }
        self.end_compound()?;
        self.counters.add_compound();
        Ok(())
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

fn list_length_error(len: usize) -> DynaryError {
    DynaryError::InvalidLength {
        what: LengthKind::List,
        len,
        min: 1,
        max: MAX_LIST_LEN,
    }
}
