//! Property-based tests over generated tag trees.
//!
//! Trees are generated with homogeneous lists and NaN-free floats so that
//! structural equality holds after a round trip.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_nbt::{
    decode_slice, decode_with_options, encode_to_vec, from_slice, to_vec, Compound, Document,
    Error, NbtOptions, Tag,
};
use std::io::{self, Read};

struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn arb_leaf() -> impl Strategy<Value = Tag> {
    prop_oneof![
        any::<i8>().prop_map(Tag::Byte),
        any::<i16>().prop_map(Tag::Short),
        any::<i32>().prop_map(Tag::Int),
        any::<i64>().prop_map(Tag::Long),
        any::<f32>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(Tag::Float),
        any::<f64>()
            .prop_filter("not NaN", |f| !f.is_nan())
            .prop_map(Tag::Double),
        prop::collection::vec(any::<u8>(), 0..40).prop_map(Tag::ByteArray),
        ".{0,12}".prop_map(Tag::String),
        prop::collection::vec(any::<i32>(), 0..20).prop_map(Tag::IntArray),
        prop::collection::vec(any::<i64>(), 0..20).prop_map(Tag::LongArray),
        (0usize..4).prop_map(|n| Tag::List(vec![Tag::End; n])),
    ]
}

/// Keeps only the elements sharing the first element's type.
fn homogeneous(elements: Vec<Tag>) -> Tag {
    let first = elements.first().map(Tag::type_id);
    Tag::List(
        elements
            .into_iter()
            .filter(|tag| Some(tag.type_id()) == first)
            .collect(),
    )
}

fn arb_compound(inner: impl Strategy<Value = Tag>) -> impl Strategy<Value = Compound> {
    prop::collection::vec(("[a-zA-Z_]{0,8}", inner), 0..8)
        .prop_map(|entries| entries.into_iter().collect())
}

fn arb_tag() -> impl Strategy<Value = Tag> {
    arb_leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(homogeneous),
            arb_compound(inner).prop_map(Tag::Compound),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = Document> {
    ("[a-z ]{0,10}", arb_compound(arb_tag())).prop_map(|(name, root)| Document::new(name, root))
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: u32,
    label: String,
    score: f64,
    tags: Vec<String>,
    parent: Option<i64>,
    flags: (bool, bool),
}

fn arb_record() -> impl Strategy<Value = Record> {
    (
        any::<u32>(),
        "\\PC{0,16}",
        -1e9f64..1e9f64,
        prop::collection::vec("[a-z]{1,6}", 0..5),
        proptest::option::of(any::<i64>()),
        any::<(bool, bool)>(),
    )
        .prop_map(|(id, label, score, tags, parent, flags)| Record {
            id,
            label,
            score,
            tags,
            parent,
            flags,
        })
}

proptest! {
    #[test]
    fn prop_document_round_trip(doc in arb_document()) {
        let bytes = encode_to_vec(&doc).unwrap();
        prop_assert_eq!(decode_slice(&bytes).unwrap(), doc);
    }

    #[test]
    fn prop_reencoding_is_byte_identical(doc in arb_document()) {
        let bytes = encode_to_vec(&doc).unwrap();
        let again = encode_to_vec(&decode_slice(&bytes).unwrap()).unwrap();
        prop_assert_eq!(again, bytes);
    }

    #[test]
    fn prop_streaming_matches_bounded(
        doc in arb_document(),
        chunk in 1usize..32,
        capacity in 8usize..128,
    ) {
        let bytes = encode_to_vec(&doc).unwrap();
        let options = NbtOptions::new().with_buffer_capacity(capacity);
        let streamed = decode_with_options(ChunkedReader { data: &bytes, chunk }, &options).unwrap();
        prop_assert_eq!(streamed, decode_slice(&bytes).unwrap());
    }

    #[test]
    fn prop_truncation_fails(doc in arb_document(), cut in 1usize..64) {
        let bytes = encode_to_vec(&doc).unwrap();
        let keep = bytes.len().saturating_sub(cut);
        let is_eof = matches!(decode_slice(&bytes[..keep]), Err(Error::UnexpectedEof { .. }));
        prop_assert!(is_eof);
    }

    #[test]
    fn prop_record_round_trip(record in arb_record()) {
        let bytes = to_vec(&record).unwrap();
        let back: Record = from_slice(&bytes).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_slice(&bytes);
    }
}
