//! io.rs
//! Normalized byte sources and sinks, plus one-shot encode/decode sessions.
//!
//! The engines never open or close anything themselves: the caller acquires the
//! stream, the engine borrows it for one session and hands it back via `into_inner`.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::CodecOptions;
use crate::reader::DynaryReader;
use crate::types::Result;
use crate::value::Token;
use crate::writer::DynaryWriter;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    Memory,
}

/// Shared in-memory sink contents.
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> Result<Box<dyn Read + Send>> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(BufReader::new(File::open(p)?)),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer.
/// `OutputSink::Memory` also returns the buffer the writer appends to.
pub fn open_output(sink: OutputSink) -> Result<(Box<dyn Write + Send>, Option<SharedBuffer>)> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(BufWriter::new(File::create(p)?)), None)),
        OutputSink::Memory => {
            let buf = SharedBuffer::default();
            let writer = SharedBufferWriter { buf: buf.clone() };
            Ok((Box::new(writer), Some(buf)))
        }
    }
}

pub struct SharedBufferWriter {
    buf: SharedBuffer,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Byte-counting adapter used by both engines for telemetry.
#[derive(Debug)]
pub(crate) struct Counted<T> {
    inner: T,
    count: u64,
}

impl<T> Counted<T> {
    pub(crate) fn new(inner: T) -> Self {
        Self { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count
    }

    pub(crate) fn get_ref(&self) -> &T {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> T {
        self.inner
    }
}

impl<R: Read> Read for Counted<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

impl<W: Write> Write for Counted<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

// ================= One-shot sessions =================

/// Encode `tokens` followed by End-Of-Stream into a fresh buffer.
pub fn encode_to_vec(tokens: &[Token], options: CodecOptions) -> Result<Vec<u8>> {
    let mut writer = DynaryWriter::with_options(Vec::new(), options)?;
    writer.write_stream(tokens)?;
    Ok(writer.into_inner())
}

/// Decode a whole stream held in memory.
pub fn decode_from_slice(bytes: &[u8], options: CodecOptions) -> Result<Vec<Token>> {
    let mut reader = DynaryReader::with_options(bytes, options)?;
    reader.read_to_end()
}

/// Write one full stream to `sink`; returns the bytes for `OutputSink::Memory`.
pub fn write_tokens_to(sink: OutputSink, tokens: &[Token], options: CodecOptions) -> Result<Option<Vec<u8>>> {
    let (out, buf) = open_output(sink)?;
    let mut writer = DynaryWriter::with_options(out, options)?;
    writer.write_stream(tokens)?;
    writer.flush()?;
    drop(writer);

    match buf {
        Some(buf) => {
            let guard = buf
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared buffer poisoned"))?;
            Ok(Some(guard.clone()))
        }
        None => Ok(None),
    }
}

/// Read one full stream from `src`.
pub fn read_tokens_from(src: InputSource, options: CodecOptions) -> Result<Vec<Token>> {
    let input = open_input(src)?;
    let mut reader = DynaryReader::with_options(input, options)?;
    reader.read_to_end()
}
