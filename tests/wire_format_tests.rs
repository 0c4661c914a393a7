use serde_nbt::compression::detect;
use serde_nbt::{
    decode, decode_all, decode_all_with_options, decode_slice, decode_with_options, encode_to_vec,
    is_compressed,
    select_filter, Compound, Document, Error, FilterKind, NbtOptions, Tag,
};
use std::io::{self, Read};

/// Hands out at most `chunk` bytes per `read` call.
struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    fn new(data: &'a [u8], chunk: usize) -> Self {
        ChunkedReader { data, chunk }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn sample_document() -> Document {
    let mut pos = Compound::new();
    pos.insert("x", Tag::Double(12.5));
    pos.insert("y", Tag::Double(64.0));

    let mut root = Compound::new();
    root.insert("name", Tag::from("Bananrama"));
    root.insert("health", Tag::Float(19.5));
    root.insert("pos", Tag::Compound(pos));
    root.insert("inventory", Tag::List(vec![Tag::Short(1), Tag::Short(2)]));
    root.insert("heightmap", Tag::IntArray((0..300).collect()));
    root.insert("blocks", Tag::ByteArray((0..=255).collect()));
    root.insert("timestamps", Tag::LongArray(vec![1, -1, i64::MAX]));
    Document::new("hello world", root)
}

#[test]
fn test_golden_encoding() {
    let mut root = Compound::new();
    root.insert("x", Tag::Int(42));
    let bytes = encode_to_vec(&Document::unnamed(root)).unwrap();
    assert_eq!(
        bytes,
        vec![0x0A, 0x00, 0x00, 0x03, 0x00, 0x01, 0x78, 0x00, 0x00, 0x00, 0x2A, 0x00]
    );
}

#[test]
fn test_round_trip_sample() {
    let doc = sample_document();
    let bytes = encode_to_vec(&doc).unwrap();
    assert_eq!(decode_slice(&bytes).unwrap(), doc);
    assert_eq!(decode(&bytes[..]).unwrap(), doc);
}

#[test]
fn test_streaming_matches_bounded() {
    let bytes = encode_to_vec(&sample_document()).unwrap();
    let bounded = decode_slice(&bytes).unwrap();

    for chunk in [1, 2, 3, 7, 64, 4096] {
        for capacity in [8, 13, 64, 4096] {
            let options = NbtOptions::new().with_buffer_capacity(capacity);
            let streamed =
                decode_with_options(ChunkedReader::new(&bytes, chunk), &options).unwrap();
            assert_eq!(streamed, bounded, "chunk {} capacity {}", chunk, capacity);
        }
    }
}

#[test]
fn test_buffer_smaller_than_long_is_rejected() {
    let mut root = Compound::new();
    root.insert("l", Tag::Long(1));
    let bytes = encode_to_vec(&Document::unnamed(root)).unwrap();

    let options = NbtOptions::new().with_buffer_capacity(4);
    assert_eq!(
        decode_with_options(&bytes[..], &options).unwrap_err(),
        Error::BufferTooSmall {
            requested: 8,
            capacity: 4
        }
    );
}

#[test]
fn test_root_type_must_be_compound() {
    for first in (0u8..=255).filter(|&b| b != 0x0A) {
        let err = decode_slice(&[first, 0x00, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, Error::malformed_document(0, first));
    }
}

#[test]
fn test_unknown_type_inside_compound() {
    let err = decode_slice(&[0x0A, 0x00, 0x00, 0xFF, 0x00]).unwrap_err();
    assert_eq!(err, Error::unknown_type_id(3, 0xFF));
}

#[test]
fn test_unknown_list_element_type() {
    let bytes = [
        0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'l', 0x0D, 0x00, 0x00, 0x00, 0x01, 0x00,
    ];
    assert_eq!(
        decode_slice(&bytes).unwrap_err(),
        Error::unknown_type_id(7, 0x0D)
    );
}

#[test]
fn test_negative_array_lengths() {
    for (type_id, context) in [(0x07, "byte array"), (0x0B, "int array"), (0x0C, "long array")] {
        let bytes = [
            0x0A, 0x00, 0x00, type_id, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
        ];
        assert_eq!(
            decode_slice(&bytes).unwrap_err(),
            Error::invalid_length(6, -1, context)
        );
    }

    let list = [
        0x0A, 0x00, 0x00, 0x09, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
    ];
    assert_eq!(
        decode_slice(&list).unwrap_err(),
        Error::invalid_length(7, -1, "list")
    );
}

#[test]
fn test_end_typed_list_consumes_no_payload() {
    // {"": {l: <End x3>, after: 5b}}
    let bytes = [
        0x0A, 0x00, 0x00, //
        0x09, 0x00, 0x01, b'l', 0x00, 0x00, 0x00, 0x00, 0x03, //
        0x01, 0x00, 0x05, b'a', b'f', b't', b'e', b'r', 0x05, //
        0x00,
    ];
    let doc = decode_slice(&bytes).unwrap();
    assert_eq!(doc.root.get("l"), Some(&Tag::List(vec![Tag::End, Tag::End, Tag::End])));
    assert_eq!(doc.root.get("after"), Some(&Tag::Byte(5)));
}

#[test]
fn test_oversized_end_typed_list_rejected() {
    // 13 bytes claiming 16,000,000 End placeholders, under the length ceiling
    let bytes = [
        0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'l', 0x00, 0x00, 0xF4, 0x24, 0x00, 0x00,
    ];
    assert_eq!(
        decode_slice(&bytes).unwrap_err(),
        Error::invalid_length(8, 16_000_000, "End-typed list")
    );
}

#[test]
fn test_decode_all_with_options_streams_each_document() {
    // {"": {l: <End x2>}}
    let one = [
        0x0A, 0x00, 0x00, 0x09, 0x00, 0x01, b'l', 0x00, 0x00, 0x00, 0x00, 0x02, 0x00,
    ];
    let bytes = one.repeat(3);

    let options = NbtOptions::new()
        .with_buffer_capacity(4)
        .with_max_end_placeholders(2);
    let docs = decode_all_with_options(ChunkedReader::new(&bytes, 3), &options)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(docs.len(), 3);

    let stingy = NbtOptions::new().with_max_end_placeholders(1);
    let first = decode_all_with_options(&bytes[..], &stingy).next();
    assert_eq!(
        first,
        Some(Err(Error::invalid_length(8, 2, "End-typed list")))
    );
}

#[test]
fn test_truncation_is_always_an_error() {
    let bytes = encode_to_vec(&sample_document()).unwrap();
    for cut in 1..bytes.len() {
        let short = &bytes[..bytes.len() - cut];
        assert!(
            matches!(decode_slice(short), Err(Error::UnexpectedEof { .. })),
            "bounded decode of {} bytes",
            short.len()
        );
        assert!(
            matches!(
                decode(ChunkedReader::new(short, 5)),
                Err(Error::UnexpectedEof { .. })
            ),
            "streaming decode of {} bytes",
            short.len()
        );
    }
}

#[test]
fn test_decode_all_boundaries() {
    let one = encode_to_vec(&sample_document()).unwrap();
    let mut three = one.clone();
    three.extend_from_slice(&one);
    three.extend_from_slice(&one);

    let docs: Vec<_> = decode_all(ChunkedReader::new(&three, 3))
        .collect::<serde_nbt::Result<_>>()
        .unwrap();
    assert_eq!(docs.len(), 3);

    assert_eq!(decode_all(io::empty()).count(), 0);

    three.truncate(three.len() - 1);
    let results: Vec<_> = decode_all(&three[..]).collect();
    assert_eq!(results.len(), 3);
    assert!(results[..2].iter().all(Result::is_ok));
    assert!(matches!(results[2], Err(Error::UnexpectedEof { .. })));
}

#[test]
fn test_filter_selection() {
    assert_eq!(select_filter(&[0x1F, 0x8B, 0x08, 0x00]), FilterKind::Gzip);
    assert_eq!(select_filter(&[0x78, 0x9C, 0x01]), FilterKind::Zlib);
    assert_eq!(select_filter(&[0x00, 0x00, 0x00]), FilterKind::None);
    assert!(!is_compressed(&[0x50, 0x4B, 0x03, 0x04]));
}

#[test]
fn test_detect_does_not_consume_plain_stream() {
    let bytes = encode_to_vec(&sample_document()).unwrap();
    let (kind, stream) = detect(ChunkedReader::new(&bytes, 1)).unwrap();
    assert_eq!(kind, FilterKind::None);
    assert_eq!(decode(stream).unwrap(), sample_document());
}

#[test]
fn test_detect_on_empty_stream() {
    assert!(matches!(
        detect(io::empty()),
        Err(Error::UnexpectedEof { available: 0, .. })
    ));
}
