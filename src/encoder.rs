//! NBT encoder, the mirror image of the [decoder](crate::decoder).
//!
//! The encoder walks a [`Tag`] tree and writes it through a [`ByteSink`].
//! Every value's type id comes from [`type_id_for`]; payloads are written by
//! the registry codec for that id.
//!
//! Values that cannot be framed are rejected while the tree is walked:
//!
//! - a [`Tag::End`] stored as a named compound entry
//! - a list whose elements do not all share the first element's type
//! - strings longer than 65535 UTF-8 bytes
//! - arrays and lists with more than `i32::MAX` elements
//!
//! The check runs when the walk reaches the value, so bytes for everything
//! before it (including the entry's own type byte and name) may already be in
//! the sink. Treat the output of a failed document as garbage.
//!
//! ```rust
//! use serde_nbt::encoder::Encoder;
//! use serde_nbt::{Compound, Tag};
//!
//! let mut root = Compound::new();
//! root.insert("x", Tag::Int(42));
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_document("", &root).unwrap();
//! assert_eq!(
//!     encoder.finish().unwrap(),
//!     vec![0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, b'x', 0x00, 0x00, 0x00, 0x2A, 0x00]
//! );
//! ```

use crate::options::NbtOptions;
use crate::registry::{codec_for, type_id_for, TagWriter};
use crate::sink::ByteSink;
use crate::{Compound, Error, Result, Tag, TypeId};
use std::io::Write;
use tracing::debug;

/// Writes NBT documents to a [`ByteSink`].
pub struct Encoder<W: Write> {
    sink: ByteSink<W>,
    max_depth: usize,
    depth: usize,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, &NbtOptions::default())
    }

    pub fn with_options(writer: W, options: &NbtOptions) -> Self {
        Encoder {
            sink: ByteSink::new(writer),
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Writes one document: the Compound type byte, `name` and the body of
    /// `root`.
    pub fn write_document(&mut self, name: &str, root: &Compound) -> Result<()> {
        let start = self.sink.bytes_written();
        self.sink.write_u8(TypeId::Compound.as_u8())?;
        self.write_string(name)?;
        self.write_compound_body(root)?;
        debug!(
            name,
            entries = root.len(),
            bytes = self.sink.bytes_written() - start,
            "encoded document"
        );
        Ok(())
    }

    /// Writes each entry as type byte, name and payload, then the End byte.
    pub fn write_compound_body(&mut self, compound: &Compound) -> Result<()> {
        self.nested(|encoder| {
            for (name, tag) in compound {
                let type_id = type_id_for(Some(tag));
                if type_id == TypeId::End {
                    return Err(Error::unsupported_value_type(format!(
                        "compound entry {:?} holds an End tag",
                        name
                    )));
                }
                encoder.sink.write_u8(type_id.as_u8())?;
                encoder.write_string(name)?;
                codec_for(type_id).encode(tag, encoder)?;
            }
            encoder.sink.write_u8(TypeId::End.as_u8())
        })
    }

    /// Writes the element type (End for an empty list), the length and each
    /// element's payload.
    pub fn write_list_body(&mut self, elements: &[Tag]) -> Result<()> {
        self.nested(|encoder| {
            let element = type_id_for(elements.first());
            if let Some(odd) = elements.iter().find(|tag| tag.type_id() != element) {
                return Err(Error::unsupported_value_type(format!(
                    "list of {} also holds a {}",
                    element,
                    odd.type_id()
                )));
            }

            encoder.sink.write_u8(element.as_u8())?;
            encoder.write_length(elements.len(), "list")?;
            let codec = codec_for(element);
            for tag in elements {
                codec.encode(tag, encoder)?;
            }
            Ok(())
        })
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    /// Flushes buffered output and returns the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.sink.finish()
    }

    fn write_length(&mut self, len: usize, context: &'static str) -> Result<()> {
        let framed = i32::try_from(len).map_err(|_| {
            Error::invalid_length(self.sink.bytes_written(), len as i64, context)
        })?;
        self.sink.write_i32(framed)
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                offset: self.sink.bytes_written(),
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }
}

impl<W: Write> TagWriter for Encoder<W> {
    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.sink.write_i8(value)
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.sink.write_i16(value)
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.sink.write_i32(value)
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.sink.write_i64(value)
    }

    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.sink.write_f32(value)
    }

    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.sink.write_f64(value)
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u16::try_from(value.len()).map_err(|_| {
            Error::invalid_length(self.sink.bytes_written(), value.len() as i64, "string")
        })?;
        self.sink.write_u16(len)?;
        self.sink.write_bytes(value.as_bytes())
    }

    fn write_byte_array(&mut self, value: &[u8]) -> Result<()> {
        self.write_length(value.len(), "byte array")?;
        self.sink.write_bytes(value)
    }

    fn write_int_array(&mut self, value: &[i32]) -> Result<()> {
        self.write_length(value.len(), "int array")?;
        for &v in value {
            self.sink.write_i32(v)?;
        }
        Ok(())
    }

    fn write_long_array(&mut self, value: &[i64]) -> Result<()> {
        self.write_length(value.len(), "long array")?;
        for &v in value {
            self.sink.write_i64(v)?;
        }
        Ok(())
    }

    fn write_list_body(&mut self, elements: &[Tag]) -> Result<()> {
        Encoder::write_list_body(self, elements)
    }

    fn write_compound_body(&mut self, compound: &Compound) -> Result<()> {
        Encoder::write_compound_body(self, compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::Decoder;

    fn encode_root(root: &Compound) -> Result<Vec<u8>> {
        let mut encoder = Encoder::new(Vec::new());
        encoder.write_document("", root)?;
        encoder.finish()
    }

    #[test]
    fn test_golden_bytes() {
        let mut root = Compound::new();
        root.insert("x", Tag::Int(42));
        assert_eq!(
            encode_root(&root).unwrap(),
            vec![0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, 0x78, 0x00, 0x00, 0x00, 0x2A, 0x00]
        );
    }

    #[test]
    fn test_every_type_round_trips() {
        let mut nested = Compound::new();
        nested.insert("deep", Tag::from("value"));

        let mut root = Compound::new();
        root.insert("byte", Tag::Byte(-1));
        root.insert("short", Tag::Short(i16::MIN));
        root.insert("int", Tag::Int(i32::MAX));
        root.insert("long", Tag::Long(-1 << 40));
        root.insert("float", Tag::Float(0.25));
        root.insert("double", Tag::Double(-1e300));
        root.insert("bytes", Tag::ByteArray(vec![0, 127, 255]));
        root.insert("string", Tag::from("héllo"));
        root.insert("list", Tag::List(vec![Tag::Short(1), Tag::Short(2)]));
        root.insert("empty", Tag::List(vec![]));
        root.insert("compound", Tag::Compound(nested));
        root.insert("ints", Tag::IntArray(vec![-1, 0, 1]));
        root.insert("longs", Tag::LongArray(vec![i64::MIN, i64::MAX]));

        let bytes = {
            let mut encoder = Encoder::new(Vec::new());
            encoder.write_document("Level", &root).unwrap();
            encoder.finish().unwrap()
        };
        let doc = Decoder::from_slice(&bytes).read_document().unwrap();
        assert_eq!(doc.name, "Level");
        assert_eq!(doc.root, root);
    }

    #[test]
    fn test_empty_list_uses_end_element_type() {
        let mut root = Compound::new();
        root.insert("l", Tag::List(vec![]));
        let bytes = encode_root(&root).unwrap();
        assert_eq!(&bytes[7..12], &[0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_end_entry_rejected() {
        let mut root = Compound::new();
        root.insert("oops", Tag::End);
        assert!(matches!(
            encode_root(&root),
            Err(Error::UnsupportedValueType(_))
        ));
    }

    #[test]
    fn test_heterogeneous_list_rejected() {
        let mut root = Compound::new();
        root.insert("l", Tag::List(vec![Tag::Int(1), Tag::Long(2)]));
        let err = encode_root(&root).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedValueType("list of TAG_Int also holds a TAG_Long".to_string())
        );
    }

    #[test]
    fn test_failed_document_leaves_written_prefix() {
        let mut root = Compound::new();
        root.insert("a", Tag::Byte(1));
        root.insert("l", Tag::List(vec![Tag::Int(1), Tag::Long(2)]));

        let mut encoder = Encoder::new(Vec::new());
        assert!(encoder.write_document("", &root).is_err());
        assert_eq!(
            encoder.finish().unwrap(),
            vec![0x0A, 0x00, 0x00, 0x01, 0x00, 0x01, b'a', 0x01, 0x09, 0x00, 0x01, b'l']
        );
    }

    #[test]
    fn test_overlong_string_rejected() {
        let mut root = Compound::new();
        root.insert("s", Tag::String("a".repeat(65_536)));
        assert!(matches!(
            encode_root(&root),
            Err(Error::InvalidLength {
                length: 65_536,
                context: "string",
                ..
            })
        ));

        let mut root = Compound::new();
        root.insert("s", Tag::String("a".repeat(65_535)));
        assert!(encode_root(&root).is_ok());
    }

    #[test]
    fn test_depth_ceiling() {
        let mut inner = Compound::new();
        inner.insert("leaf", Tag::Int(0));
        let mut root = Compound::new();
        root.insert("inner", Tag::Compound(inner));

        let mut encoder = Encoder::with_options(Vec::new(), &NbtOptions::new().with_max_depth(1));
        assert!(matches!(
            encoder.write_document("", &root),
            Err(Error::DepthLimitExceeded { max_depth: 1, .. })
        ));
    }
}
