//! Recursive-descent NBT decoder.
//!
//! A [`Decoder`] pulls bytes through a [`ByteCursor`] and builds a [`Tag`]
//! tree top-down. Every type byte is resolved through the
//! [registry](crate::registry), so the decoder itself only knows framing:
//! names, lengths, list headers and compound terminators.
//!
//! ## Limits
//!
//! Lengths read from the wire are checked against
//! [`NbtOptions::max_length`] and nesting against
//! [`NbtOptions::max_depth`] before anything is allocated or recursed into.
//! End-typed lists consume no payload bytes, so the placeholders they expand
//! to are drawn from a per-document budget,
//! [`NbtOptions::max_end_placeholders`].
//! Vectors are pre-allocated for at most [`PREALLOC_LIMIT`] elements and grow
//! as bytes actually arrive.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nbt::decoder::Decoder;
//! use serde_nbt::Tag;
//!
//! // {"": {x: 42}}
//! let bytes = [
//!     0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2A, 0x00,
//! ];
//! let doc = Decoder::from_slice(&bytes).read_document().unwrap();
//! assert_eq!(doc.root.get("x"), Some(&Tag::Int(42)));
//! ```
//!
//! Several documents stored back to back are read with [`DocumentIter`]:
//!
//! ```rust
//! use serde_nbt::decoder::Decoder;
//!
//! let bytes = [0x0A, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00];
//! let docs: Vec<_> = Decoder::new(&bytes[..]).into_documents().collect();
//! assert_eq!(docs.len(), 2);
//! ```

use crate::cursor::ByteCursor;
use crate::hook::TraceHook;
use crate::options::NbtOptions;
use crate::registry::{codec_for, TagReader};
use crate::{Compound, Document, Error, Result, Tag, TypeId};
use std::io::{self, Read};
use std::iter::FusedIterator;
use tracing::debug;

/// Upper bound on elements reserved up front for a single array or list.
pub const PREALLOC_LIMIT: usize = 4096;

/// Decodes NBT documents from a [`ByteCursor`].
pub struct Decoder<'a, R = io::Empty> {
    cursor: ByteCursor<'a, R>,
    max_length: usize,
    max_depth: usize,
    depth: usize,
    max_end_placeholders: usize,
    placeholders_left: usize,
    hook: Option<Box<dyn TraceHook>>,
}

impl<'a> Decoder<'a, io::Empty> {
    /// Creates a decoder over an in-memory buffer.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self::from_slice_with_options(bytes, &NbtOptions::default())
    }

    pub fn from_slice_with_options(bytes: &'a [u8], options: &NbtOptions) -> Self {
        Self::from_cursor(ByteCursor::from_slice(bytes), options)
    }
}

impl<R: Read> Decoder<'static, R> {
    /// Creates a streaming decoder with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, &NbtOptions::default())
    }

    pub fn with_options(reader: R, options: &NbtOptions) -> Self {
        Self::from_cursor(
            ByteCursor::with_capacity(reader, options.buffer_capacity),
            options,
        )
    }
}

impl<'a, R: Read> Decoder<'a, R> {
    pub fn from_cursor(cursor: ByteCursor<'a, R>, options: &NbtOptions) -> Self {
        Decoder {
            cursor,
            max_length: options.max_length,
            max_depth: options.max_depth,
            depth: 0,
            max_end_placeholders: options.max_end_placeholders,
            placeholders_left: options.max_end_placeholders,
            hook: None,
        }
    }

    /// Attaches a hook that observes every decoded tag.
    #[must_use]
    pub fn with_hook<H: TraceHook + 'static>(mut self, hook: H) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Returns `true` if the input is exhausted exactly here.
    pub fn at_end(&mut self) -> Result<bool> {
        self.cursor.at_end()
    }

    /// Reads one document: the Compound type byte, the root name and the
    /// root compound body.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDocument`] if the first byte is not 10
    /// - [`Error::UnknownTypeId`], [`Error::InvalidLength`] or
    ///   [`Error::DepthLimitExceeded`] for bad framing inside the document
    /// - [`Error::UnexpectedEof`] if the input ends mid-document
    pub fn read_document(&mut self) -> Result<Document> {
        let start = self.position();
        match self.read_document_inner() {
            Ok(doc) => {
                debug!(
                    name = %doc.name,
                    entries = doc.root.len(),
                    bytes = self.position() - start,
                    "decoded document"
                );
                Ok(doc)
            }
            Err(error) => {
                if let Some(hook) = self.hook.as_mut() {
                    hook.on_error(&error);
                }
                Err(error)
            }
        }
    }

    fn read_document_inner(&mut self) -> Result<Document> {
        self.placeholders_left = self.max_end_placeholders;
        let offset = self.position();
        let id = self.cursor.read_u8()?;
        if id != TypeId::Compound.as_u8() {
            return Err(Error::malformed_document(offset, id));
        }
        let name = self.read_string()?;
        self.start_tag(TypeId::Compound, Some(&name));
        let root = self.read_compound_body()?;
        self.end_tag(TypeId::Compound);
        Ok(Document { name, root })
    }

    /// Turns the decoder into an iterator over consecutive documents.
    pub fn into_documents(self) -> DocumentIter<'a, R> {
        DocumentIter {
            decoder: self,
            done: false,
        }
    }

    /// Reads named entries until the End byte. A repeated name replaces the
    /// earlier value in place.
    pub fn read_compound_body(&mut self) -> Result<Compound> {
        self.nested(|decoder| {
            let mut compound = Compound::new();
            loop {
                let type_id = decoder.read_type_id()?;
                if type_id == TypeId::End {
                    return Ok(compound);
                }
                let name = decoder.read_string()?;
                decoder.start_tag(type_id, Some(&name));
                let value = codec_for(type_id).decode(decoder)?;
                decoder.end_tag(type_id);
                compound.insert(name, value);
            }
        })
    }

    /// Reads a list header and its elements.
    ///
    /// A list whose element type is End carries no payloads; it decodes to
    /// `length` [`Tag::End`] placeholders, charged against the document's
    /// placeholder budget.
    pub fn read_list_body(&mut self) -> Result<Vec<Tag>> {
        self.nested(|decoder| {
            let element = decoder.read_type_id()?;
            let offset = decoder.position();
            let len = decoder.read_length("list")?;
            if element == TypeId::End {
                if len > decoder.placeholders_left {
                    return Err(Error::invalid_length(offset, len as i64, "End-typed list"));
                }
                decoder.placeholders_left -= len;
                return Ok(vec![Tag::End; len]);
            }

            let codec = codec_for(element);
            let mut elements = Vec::with_capacity(len.min(PREALLOC_LIMIT));
            for _ in 0..len {
                decoder.start_tag(element, None);
                elements.push(codec.decode(decoder)?);
                decoder.end_tag(element);
            }
            Ok(elements)
        })
    }

    fn read_type_id(&mut self) -> Result<TypeId> {
        let offset = self.position();
        let id = self.cursor.read_u8()?;
        TypeId::from_u8(id).ok_or_else(|| Error::unknown_type_id(offset, id))
    }

    /// Reads a signed 32-bit length and checks it against the ceiling.
    fn read_length(&mut self, context: &'static str) -> Result<usize> {
        let offset = self.position();
        let len = self.cursor.read_i32()?;
        match usize::try_from(len) {
            Ok(len) if len <= self.max_length => Ok(len),
            _ => Err(Error::invalid_length(offset, i64::from(len), context)),
        }
    }

    fn nested<T>(&mut self, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                offset: self.position(),
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn start_tag(&mut self, type_id: TypeId, name: Option<&str>) {
        let offset = self.cursor.position();
        if let Some(hook) = self.hook.as_mut() {
            hook.on_tag_start(type_id, name, offset);
        }
    }

    fn end_tag(&mut self, type_id: TypeId) {
        let offset = self.cursor.position();
        if let Some(hook) = self.hook.as_mut() {
            hook.on_tag_end(type_id, offset);
        }
    }
}

impl<R: Read> TagReader for Decoder<'_, R> {
    fn read_i8(&mut self) -> Result<i8> {
        self.cursor.read_i8()
    }

    fn read_i16(&mut self) -> Result<i16> {
        self.cursor.read_i16()
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.cursor.read_i32()
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.cursor.read_i64()
    }

    fn read_f32(&mut self) -> Result<f32> {
        self.cursor.read_f32()
    }

    fn read_f64(&mut self) -> Result<f64> {
        self.cursor.read_f64()
    }

    fn read_string(&mut self) -> Result<String> {
        let len = usize::from(self.cursor.read_u16()?);
        let mut bytes = Vec::with_capacity(len);
        self.cursor.read_bytes_into(len, &mut bytes)?;
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    fn read_byte_array(&mut self) -> Result<Vec<u8>> {
        let len = self.read_length("byte array")?;
        let mut bytes = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        self.cursor.read_bytes_into(len, &mut bytes)?;
        Ok(bytes)
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        let len = self.read_length("int array")?;
        let mut ints = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            ints.push(self.cursor.read_i32()?);
        }
        Ok(ints)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        let len = self.read_length("long array")?;
        let mut longs = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        for _ in 0..len {
            longs.push(self.cursor.read_i64()?);
        }
        Ok(longs)
    }

    fn read_list_body(&mut self) -> Result<Vec<Tag>> {
        Decoder::read_list_body(self)
    }

    fn read_compound_body(&mut self) -> Result<Compound> {
        Decoder::read_compound_body(self)
    }
}

/// Lazily decodes consecutive documents until the input ends.
///
/// Ending exactly at a document boundary finishes the iteration. Any failure
/// is yielded once, after which the iterator returns `None`.
pub struct DocumentIter<'a, R = io::Empty> {
    decoder: Decoder<'a, R>,
    done: bool,
}

impl<R: Read> Iterator for DocumentIter<'_, R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.decoder.at_end() {
            Ok(true) => {
                self.done = true;
                return None;
            }
            Ok(false) => self.decoder.read_document(),
            Err(e) => Err(e),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl<R: Read> FusedIterator for DocumentIter<'_, R> {}
