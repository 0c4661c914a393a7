//! Type-id dispatch.
//!
//! Every [`TypeId`] has exactly one [`TagCodec`] that knows how to read and
//! write its payload. The decoder looks a codec up by the type byte it just
//! read; the encoder looks one up by the type of the value it is about to
//! write. Codecs never see names or type bytes, only payloads.
//!
//! Codecs talk to the byte level through the [`TagReader`] and [`TagWriter`]
//! surfaces, which the [`Decoder`](crate::decoder::Decoder) and
//! [`Encoder`](crate::encoder::Encoder) implement. Container codecs (List and
//! Compound) call back into those surfaces to recurse.
//!
//! ```rust
//! use serde_nbt::registry::{codec_for_id, type_id_for};
//! use serde_nbt::{Tag, TypeId};
//!
//! assert_eq!(codec_for_id(3).unwrap().type_id(), TypeId::Int);
//! assert!(codec_for_id(0xFF).is_err());
//! assert_eq!(type_id_for(Some(&Tag::Int(1))), TypeId::Int);
//! assert_eq!(type_id_for(None), TypeId::End);
//! ```

use crate::{Compound, Error, Result, Tag, TypeId};

/// Primitive read surface exposed to codecs.
pub trait TagReader {
    fn read_i8(&mut self) -> Result<i8>;
    fn read_i16(&mut self) -> Result<i16>;
    fn read_i32(&mut self) -> Result<i32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_f32(&mut self) -> Result<f32>;
    fn read_f64(&mut self) -> Result<f64>;
    /// Reads a `u16`-length-prefixed UTF-8 string.
    fn read_string(&mut self) -> Result<String>;
    fn read_byte_array(&mut self) -> Result<Vec<u8>>;
    fn read_int_array(&mut self) -> Result<Vec<i32>>;
    fn read_long_array(&mut self) -> Result<Vec<i64>>;
    /// Reads an element type id, a length and that many unnamed payloads.
    fn read_list_body(&mut self) -> Result<Vec<Tag>>;
    /// Reads named entries up to and including the terminating End byte.
    fn read_compound_body(&mut self) -> Result<Compound>;
}

/// Primitive write surface exposed to codecs.
pub trait TagWriter {
    fn write_i8(&mut self, value: i8) -> Result<()>;
    fn write_i16(&mut self, value: i16) -> Result<()>;
    fn write_i32(&mut self, value: i32) -> Result<()>;
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_f32(&mut self, value: f32) -> Result<()>;
    fn write_f64(&mut self, value: f64) -> Result<()>;
    fn write_string(&mut self, value: &str) -> Result<()>;
    fn write_byte_array(&mut self, value: &[u8]) -> Result<()>;
    fn write_int_array(&mut self, value: &[i32]) -> Result<()>;
    fn write_long_array(&mut self, value: &[i64]) -> Result<()>;
    fn write_list_body(&mut self, elements: &[Tag]) -> Result<()>;
    fn write_compound_body(&mut self, compound: &Compound) -> Result<()>;
}

/// Reads and writes the payload of one type id.
pub trait TagCodec: Sync {
    fn type_id(&self) -> TypeId;

    fn decode(&self, reader: &mut dyn TagReader) -> Result<Tag>;

    /// Writes the payload of `tag`, which must be of this codec's type.
    fn encode(&self, tag: &Tag, writer: &mut dyn TagWriter) -> Result<()>;
}

fn mismatch(expected: TypeId, tag: &Tag) -> Error {
    Error::type_mismatch(expected.name(), tag.type_id().name())
}

macro_rules! payload_codec {
    ($codec:ident, $variant:ident, $read:ident, $write:ident, by_value) => {
        struct $codec;

        impl TagCodec for $codec {
            fn type_id(&self) -> TypeId {
                TypeId::$variant
            }

            fn decode(&self, reader: &mut dyn TagReader) -> Result<Tag> {
                reader.$read().map(Tag::$variant)
            }

            fn encode(&self, tag: &Tag, writer: &mut dyn TagWriter) -> Result<()> {
                match tag {
                    Tag::$variant(value) => writer.$write(*value),
                    other => Err(mismatch(TypeId::$variant, other)),
                }
            }
        }
    };
    ($codec:ident, $variant:ident, $read:ident, $write:ident, by_ref) => {
        struct $codec;

        impl TagCodec for $codec {
            fn type_id(&self) -> TypeId {
                TypeId::$variant
            }

            fn decode(&self, reader: &mut dyn TagReader) -> Result<Tag> {
                reader.$read().map(Tag::$variant)
            }

            fn encode(&self, tag: &Tag, writer: &mut dyn TagWriter) -> Result<()> {
                match tag {
                    Tag::$variant(value) => writer.$write(value),
                    other => Err(mismatch(TypeId::$variant, other)),
                }
            }
        }
    };
}

/// End has no payload. It only appears as the placeholder element of
/// End-typed lists.
struct EndCodec;

impl TagCodec for EndCodec {
    fn type_id(&self) -> TypeId {
        TypeId::End
    }

    fn decode(&self, _reader: &mut dyn TagReader) -> Result<Tag> {
        Ok(Tag::End)
    }

    fn encode(&self, tag: &Tag, _writer: &mut dyn TagWriter) -> Result<()> {
        match tag {
            Tag::End => Ok(()),
            other => Err(mismatch(TypeId::End, other)),
        }
    }
}

payload_codec!(ByteCodec, Byte, read_i8, write_i8, by_value);
payload_codec!(ShortCodec, Short, read_i16, write_i16, by_value);
payload_codec!(IntCodec, Int, read_i32, write_i32, by_value);
payload_codec!(LongCodec, Long, read_i64, write_i64, by_value);
payload_codec!(FloatCodec, Float, read_f32, write_f32, by_value);
payload_codec!(DoubleCodec, Double, read_f64, write_f64, by_value);
payload_codec!(ByteArrayCodec, ByteArray, read_byte_array, write_byte_array, by_ref);
payload_codec!(StringCodec, String, read_string, write_string, by_ref);
payload_codec!(ListCodec, List, read_list_body, write_list_body, by_ref);
payload_codec!(CompoundCodec, Compound, read_compound_body, write_compound_body, by_ref);
payload_codec!(IntArrayCodec, IntArray, read_int_array, write_int_array, by_ref);
payload_codec!(LongArrayCodec, LongArray, read_long_array, write_long_array, by_ref);

/// Returns the codec for a type id.
#[must_use]
pub fn codec_for(type_id: TypeId) -> &'static dyn TagCodec {
    match type_id {
        TypeId::End => &EndCodec,
        TypeId::Byte => &ByteCodec,
        TypeId::Short => &ShortCodec,
        TypeId::Int => &IntCodec,
        TypeId::Long => &LongCodec,
        TypeId::Float => &FloatCodec,
        TypeId::Double => &DoubleCodec,
        TypeId::ByteArray => &ByteArrayCodec,
        TypeId::String => &StringCodec,
        TypeId::List => &ListCodec,
        TypeId::Compound => &CompoundCodec,
        TypeId::IntArray => &IntArrayCodec,
        TypeId::LongArray => &LongArrayCodec,
    }
}

/// Returns the codec for a raw type byte.
///
/// The error carries offset 0; the decoder replaces it with the position of
/// the offending byte.
///
/// # Errors
///
/// [`Error::UnknownTypeId`] if `id` is outside the enumeration.
pub fn codec_for_id(id: u8) -> Result<&'static dyn TagCodec> {
    TypeId::from_u8(id)
        .map(codec_for)
        .ok_or_else(|| Error::unknown_type_id(0, id))
}

/// Classifies a value. An absent value maps to End.
#[inline]
#[must_use]
pub fn type_id_for(tag: Option<&Tag>) -> TypeId {
    tag.map_or(TypeId::End, Tag::type_id)
}
