//! # serde_nbt
//!
//! A streaming codec for NBT (Named Binary Tag), the tagged binary tree format
//! used to persist structured game and application state, with a Serde bridge
//! for your own types.
//!
//! ## Key Features
//!
//! - **Streaming**: decodes from any `Read` through a fixed-size buffer that
//!   is refilled on demand, or directly from an in-memory slice
//! - **Exact framing**: big-endian primitives, signed lengths, End-terminated
//!   compounds, and precise typed errors carrying byte offsets
//! - **Bounded**: configurable ceilings on list/array lengths and nesting depth
//! - **Compression**: gzip and zlib streams are detected from their magic bytes
//! - **Serde Compatible**: `#[derive(Serialize, Deserialize)]` types map to and
//!   from compounds
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_nbt = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Serde Round-Trip
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_nbt::{from_slice, to_vec};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Player {
//!     name: String,
//!     level: i32,
//!     pos: Vec<f64>,
//! }
//!
//! let player = Player {
//!     name: "Alex".to_string(),
//!     level: 7,
//!     pos: vec![0.5, 64.0, -12.25],
//! };
//!
//! let bytes = to_vec(&player).unwrap();
//! assert_eq!(bytes[0], 0x0A);
//!
//! let back: Player = from_slice(&bytes).unwrap();
//! assert_eq!(player, back);
//! ```
//!
//! ### Working with Tags
//!
//! ```rust
//! use serde_nbt::{decode_slice, encode_to_vec, Compound, Document, Tag};
//!
//! let mut root = Compound::new();
//! root.insert("x", Tag::Int(42));
//! let doc = Document::unnamed(root);
//!
//! let bytes = encode_to_vec(&doc).unwrap();
//! assert_eq!(decode_slice(&bytes).unwrap(), doc);
//! ```
//!
//! ### Compressed Files
//!
//! ```rust
//! use serde_nbt::{decode_detected, encode_compressed, nbt, to_compound, Document, FilterKind};
//!
//! let doc = Document::new("Data", to_compound(&nbt!({ "seed": 12345i64 })).unwrap());
//!
//! let mut file = Vec::new();
//! encode_compressed(&doc, &mut file, FilterKind::Gzip).unwrap();
//! assert_eq!(&file[..2], &[0x1F, 0x8B]);
//!
//! assert_eq!(decode_detected(&file[..]).unwrap(), doc);
//! ```
//!
//! ## Logging
//!
//! Document boundaries are logged at `debug` level through `tracing`; attach
//! a [`TracingHook`] to a [`Decoder`] to log every tag at `trace` level. The
//! library never installs a subscriber.
//!
//! ## Wire Format
//!
//! See the [`format`] module.

pub mod compound;
pub mod compression;
pub mod cursor;
pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod hook;
pub mod macros;
pub mod options;
pub mod registry;
pub mod ser;
pub mod sink;
pub mod tag;

pub use compound::Compound;
pub use compression::{is_compressed, select_filter, FilterKind};
pub use de::{from_tag, TagDeserializer};
pub use decoder::{Decoder, DocumentIter};
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use hook::{TraceHook, TracingHook};
pub use options::NbtOptions;
pub use ser::{to_compound, to_tag, TagSerializer};
pub use tag::{Document, Tag, TypeId};

use compression::CompressedWriter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Decodes one document from a byte source, using a 4096-byte buffer.
///
/// # Examples
///
/// ```rust
/// let bytes: &[u8] = &[0x0A, 0x00, 0x00, 0x00];
/// let doc = serde_nbt::decode(bytes).unwrap();
/// assert!(doc.root.is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if the source fails or the bytes are not a well-formed
/// document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode<R: io::Read>(reader: R) -> Result<Document> {
    decode_with_options(reader, &NbtOptions::default())
}

/// Decodes one document from a byte source with custom options.
///
/// # Errors
///
/// As [`decode`], plus [`Error::BufferTooSmall`] if the configured buffer
/// cannot hold an 8-byte primitive.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options<R: io::Read>(reader: R, options: &NbtOptions) -> Result<Document> {
    Decoder::with_options(reader, options).read_document()
}

/// Decodes one document from an in-memory buffer, without copying it into a
/// streaming buffer first.
///
/// Bytes after the document are ignored.
///
/// # Errors
///
/// Returns an error if the bytes are not a well-formed document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_slice(bytes: &[u8]) -> Result<Document> {
    Decoder::from_slice(bytes).read_document()
}

/// Lazily decodes every document in a byte source.
///
/// Iteration ends when the source is exhausted exactly at a document boundary.
///
/// # Examples
///
/// ```rust
/// let bytes: &[u8] = &[0x0A, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00];
/// let docs = serde_nbt::decode_all(bytes)
///     .collect::<serde_nbt::Result<Vec<_>>>()
///     .unwrap();
/// assert_eq!(docs.len(), 2);
/// ```
pub fn decode_all<R: io::Read>(reader: R) -> DocumentIter<'static, R> {
    decode_all_with_options(reader, &NbtOptions::default())
}

/// [`decode_all`] with custom buffer size and ceilings. The placeholder
/// budget is applied to each document separately.
pub fn decode_all_with_options<R: io::Read>(
    reader: R,
    options: &NbtOptions,
) -> DocumentIter<'static, R> {
    Decoder::with_options(reader, options).into_documents()
}

/// Detects gzip or zlib compression from the first two bytes, then decodes
/// one document from the (decompressed) stream.
///
/// # Errors
///
/// Returns an error if fewer than two bytes are available, decompression
/// fails, or the document is malformed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_detected<R: io::Read>(reader: R) -> Result<Document> {
    let (_, stream) = compression::detect(reader)?;
    decode(stream)
}

/// Encodes a document to a writer.
///
/// # Errors
///
/// Returns an error if writing fails or the tree holds a value that cannot be
/// framed (see [`encoder`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode<W: io::Write>(doc: &Document, writer: W) -> Result<()> {
    let mut encoder = Encoder::new(writer);
    encoder.write_document(&doc.name, &doc.root)?;
    encoder.finish()?;
    Ok(())
}

/// Encodes a document into a new byte vector.
///
/// # Errors
///
/// As [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_to_vec(doc: &Document) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(Vec::with_capacity(256));
    encoder.write_document(&doc.name, &doc.root)?;
    encoder.finish()
}

/// Encodes a document through a gzip or zlib compressor. `FilterKind::None`
/// writes it uncompressed.
///
/// # Errors
///
/// As [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_compressed<W: io::Write>(doc: &Document, writer: W, kind: FilterKind) -> Result<()> {
    let mut encoder = Encoder::new(CompressedWriter::new(writer, kind));
    encoder.write_document(&doc.name, &doc.root)?;
    encoder.finish()?.finish()?;
    Ok(())
}

/// Serializes any `T: Serialize` as an unnamed NBT document.
///
/// The value must serialize to a compound (a struct or a string-keyed map).
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// serde_nbt::to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer[0], 0x0A);
/// ```
///
/// # Errors
///
/// Returns an error if the value is not compound-shaped, holds a value with
/// no NBT representation, or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let root = to_compound(value)?;
    let mut encoder = Encoder::new(writer);
    encoder.write_document("", &root)?;
    encoder.finish()?;
    Ok(())
}

/// Serializes any `T: Serialize` as an unnamed NBT document into a vector.
///
/// # Errors
///
/// As [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(256);
    to_writer(&mut buffer, value)?;
    Ok(buffer)
}

/// Decodes one document from a byte source and deserializes its root
/// compound into `T`.
///
/// # Errors
///
/// Returns an error if decoding fails or the tree does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let doc = decode(reader)?;
    from_tag(Tag::Compound(doc.root))
}

/// Decodes one document from a byte slice and deserializes its root compound
/// into `T`.
///
/// # Errors
///
/// Returns an error if decoding fails or the tree does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let doc = decode_slice(bytes)?;
    from_tag(Tag::Compound(doc.root))
}
