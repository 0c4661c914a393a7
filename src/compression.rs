//! Compression sniffing and gzip/zlib wrapping.
//!
//! NBT files are commonly stored gzip- or zlib-compressed. The filter is
//! chosen from the first two bytes of the stream:
//!
//! | Magic | Filter |
//! |---|---|
//! | `1F 8B` | [`FilterKind::Gzip`] |
//! | `78 ..` | [`FilterKind::Zlib`] |
//! | anything else | [`FilterKind::None`] (pass-through) |
//!
//! [`detect`] peeks those bytes and hands them back to the selected decoder,
//! so nothing is lost from the stream.
//!
//! ```rust
//! use serde_nbt::compression::{select_filter, FilterKind};
//!
//! assert_eq!(select_filter(&[0x1F, 0x8B, 0x08]), FilterKind::Gzip);
//! assert_eq!(select_filter(&[0x78, 0x9C]), FilterKind::Zlib);
//! assert_eq!(select_filter(&[0x0A, 0x00]), FilterKind::None);
//! ```

use crate::{Error, Result};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Cursor, Read, Write};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const ZLIB_MAGIC: u8 = 0x78;

/// Stream filter selected from the leading magic bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    Gzip,
    Zlib,
    #[default]
    None,
}

/// Chooses a filter from the first bytes of a stream. Only the first two
/// bytes are inspected.
#[must_use]
pub fn select_filter(head: &[u8]) -> FilterKind {
    match head {
        [a, b, ..] if [*a, *b] == GZIP_MAGIC => FilterKind::Gzip,
        [ZLIB_MAGIC, ..] => FilterKind::Zlib,
        _ => FilterKind::None,
    }
}

/// Returns `true` if `head` starts with a gzip or zlib header.
#[must_use]
pub fn is_compressed(head: &[u8]) -> bool {
    select_filter(head) != FilterKind::None
}

/// Peeks the magic bytes of `reader` and wraps it in the matching decoder.
///
/// The peeked bytes are replayed in front of the remaining stream.
///
/// # Errors
///
/// [`Error::UnexpectedEof`] if the stream holds fewer than two bytes, or
/// [`Error::Io`] if reading them fails.
pub fn detect<'r, R: Read + 'r>(mut reader: R) -> Result<(FilterKind, Box<dyn Read + 'r>)> {
    let mut magic = [0u8; 2];
    let mut filled = 0;
    while filled < magic.len() {
        match reader.read(&mut magic[filled..]) {
            Ok(0) => return Err(Error::unexpected_eof(0, magic.len(), filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let kind = select_filter(&magic);
    let stream = Cursor::new(magic).chain(reader);
    let decoded: Box<dyn Read + 'r> = match kind {
        FilterKind::Gzip => Box::new(GzDecoder::new(stream)),
        FilterKind::Zlib => Box::new(ZlibDecoder::new(stream)),
        FilterKind::None => Box::new(stream),
    };
    Ok((kind, decoded))
}

/// A writer that compresses with the chosen filter.
///
/// Call [`finish`](CompressedWriter::finish) to write the trailer and get the
/// inner writer back.
pub enum CompressedWriter<W: Write> {
    Gzip(GzEncoder<W>),
    Zlib(ZlibEncoder<W>),
    Plain(W),
}

impl<W: Write> CompressedWriter<W> {
    pub fn new(writer: W, kind: FilterKind) -> Self {
        Self::with_level(writer, kind, Compression::default())
    }

    pub fn with_level(writer: W, kind: FilterKind, level: Compression) -> Self {
        match kind {
            FilterKind::Gzip => CompressedWriter::Gzip(GzEncoder::new(writer, level)),
            FilterKind::Zlib => CompressedWriter::Zlib(ZlibEncoder::new(writer, level)),
            FilterKind::None => CompressedWriter::Plain(writer),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            CompressedWriter::Gzip(_) => FilterKind::Gzip,
            CompressedWriter::Zlib(_) => FilterKind::Zlib,
            CompressedWriter::Plain(_) => FilterKind::None,
        }
    }

    /// Writes any pending compressed data and the stream trailer.
    pub fn finish(self) -> Result<W> {
        let mut writer = match self {
            CompressedWriter::Gzip(encoder) => encoder.finish()?,
            CompressedWriter::Zlib(encoder) => encoder.finish()?,
            CompressedWriter::Plain(writer) => writer,
        };
        writer.flush()?;
        Ok(writer)
    }
}

impl<W: Write> Write for CompressedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            CompressedWriter::Gzip(encoder) => encoder.write(buf),
            CompressedWriter::Zlib(encoder) => encoder.write(buf),
            CompressedWriter::Plain(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            CompressedWriter::Gzip(encoder) => encoder.flush(),
            CompressedWriter::Zlib(encoder) => encoder.flush(),
            CompressedWriter::Plain(writer) => writer.flush(),
        }
    }
}
