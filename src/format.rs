//! NBT wire format.
//!
//! This module documents the binary layout read by the
//! [`Decoder`](crate::decoder::Decoder) and written by the
//! [`Encoder`](crate::encoder::Encoder).
//!
//! # Overview
//!
//! An NBT document is a tree of typed values. Every value carries a one-byte
//! type id; compound entries also carry a name. All multi-byte numbers are
//! big-endian. There is no header, version, or checksum: a stream of
//! documents is just documents written back to back.
//!
//! # Grammar
//!
//! ```text
//! Document      := TypeId(=10) Name CompoundBody
//! CompoundBody  := TaggedEntry* End
//! TaggedEntry   := TypeId Name Payload          ; TypeId != 0
//! End           := 0x00
//! Name          := UInt16(len) Bytes[len]       ; UTF-8
//! ListBody      := TypeId Int32(len) Payload{len}
//! ByteArray     := Int32(len) Int8[len]
//! IntArray      := Int32(len) Int32[len]
//! LongArray     := Int32(len) Int64[len]
//! ```
//!
//! # Type Ids
//!
//! | Id | Name | Payload |
//! |----|------|---------|
//! | 0 | `TAG_End` | none; terminates a compound |
//! | 1 | `TAG_Byte` | 1 byte, signed |
//! | 2 | `TAG_Short` | 2 bytes, signed |
//! | 3 | `TAG_Int` | 4 bytes, signed |
//! | 4 | `TAG_Long` | 8 bytes, signed |
//! | 5 | `TAG_Float` | 4 bytes, IEEE 754 |
//! | 6 | `TAG_Double` | 8 bytes, IEEE 754 |
//! | 7 | `TAG_Byte_Array` | `Int32` length, then bytes |
//! | 8 | `TAG_String` | `UInt16` length, then UTF-8 bytes |
//! | 9 | `TAG_List` | element type id, `Int32` length, then payloads |
//! | 10 | `TAG_Compound` | named entries, then `TAG_End` |
//! | 11 | `TAG_Int_Array` | `Int32` length, then `Int32`s |
//! | 12 | `TAG_Long_Array` | `Int32` length, then `Int64`s |
//!
//! Any other id byte is rejected with
//! [`Error::UnknownTypeId`](crate::Error::UnknownTypeId).
//!
//! # Rules
//!
//! - A document's first byte is always 10. Anything else is
//!   [`Error::MalformedDocument`](crate::Error::MalformedDocument).
//! - List elements are unnamed and all share the list's element type. An
//!   empty list is written with element type End.
//! - A list whose element type is End has no payloads, whatever its length.
//!   Such lists decode to that many [`Tag::End`](crate::Tag::End)
//!   placeholders.
//! - Lengths are signed; a negative length is
//!   [`Error::InvalidLength`](crate::Error::InvalidLength).
//! - Names within one compound should be unique. When they repeat, the last
//!   value wins and keeps the position of the first.
//! - Strings are at most 65535 bytes of UTF-8. Invalid UTF-8 on the wire is
//!   decoded with U+FFFD replacement characters.
//!
//! # Example
//!
//! A root compound with an empty name holding one `Int` named `x` with value
//! 42:
//!
//! ```text
//! 0A          TypeId Compound
//! 00 00       root name length 0
//! 03          TypeId Int
//! 00 01 78    name "x"
//! 00 00 00 2A 42
//! 00          End
//! ```
//!
//! ```rust
//! use serde_nbt::{encode_to_vec, nbt, to_compound, Document};
//!
//! let root = to_compound(&nbt!({ "x": 42 })).unwrap();
//! let bytes = encode_to_vec(&Document::unnamed(root)).unwrap();
//! assert_eq!(bytes, [0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, 0x78, 0x00, 0x00, 0x00, 0x2A, 0x00]);
//! ```
//!
//! # Compression
//!
//! Files are often gzip (`1F 8B`) or zlib (`78 ..`) compressed as a whole.
//! See [`compression`](crate::compression).

// Documentation only.
