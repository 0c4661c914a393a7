use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_nbt::{
    decode_detected, decode_slice, decode_with_options, encode_compressed, encode_to_vec,
    from_slice, to_vec, Compound, Document, FilterKind, NbtOptions, Tag,
};

#[derive(Serialize, Deserialize, Clone)]
struct Item {
    id: String,
    count: u8,
    damage: i16,
}

#[derive(Serialize, Deserialize, Clone)]
struct Inventory {
    owner: String,
    slots: Vec<Item>,
}

fn level_document(sections: usize) -> Document {
    let mut root = Compound::new();
    root.insert("LevelName", Tag::from("bench"));
    root.insert("Seed", Tag::Long(-4_172_144_997_902_289_642));

    let sections = (0..sections)
        .map(|y| {
            let mut section = Compound::new();
            section.insert("Y", Tag::Byte(y as i8));
            section.insert("Blocks", Tag::ByteArray(vec![1; 4096]));
            section.insert("BlockLight", Tag::ByteArray(vec![0; 2048]));
            section.insert("Heights", Tag::IntArray((0..256).collect()));
            section.insert("States", Tag::LongArray((0..256).collect()));
            Tag::Compound(section)
        })
        .collect();
    root.insert("Sections", Tag::List(sections));

    Document::new("Level", root)
}

fn inventory(size: u32) -> Inventory {
    Inventory {
        owner: "Alex".to_string(),
        slots: (0..size)
            .map(|i| Item {
                id: format!("minecraft:item_{}", i),
                count: (i % 64) as u8,
                damage: i as i16,
            })
            .collect(),
    }
}

fn benchmark_encode_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_document");

    for sections in [1, 4, 16].iter() {
        let doc = level_document(*sections);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &doc, |b, doc| {
            b.iter(|| encode_to_vec(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_decode_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_document");

    for sections in [1, 4, 16].iter() {
        let bytes = encode_to_vec(&level_document(*sections)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(sections), &bytes, |b, bytes| {
            b.iter(|| decode_slice(black_box(bytes)))
        });
    }
    group.finish();
}

fn benchmark_streaming_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming_decode");
    let bytes = encode_to_vec(&level_document(4)).unwrap();

    for capacity in [64, 512, 4096].iter() {
        let options = NbtOptions::new().with_buffer_capacity(*capacity);
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &options,
            |b, options| b.iter(|| decode_with_options(black_box(&bytes[..]), options)),
        );
    }
    group.finish();
}

fn benchmark_compressed(c: &mut Criterion) {
    let mut group = c.benchmark_group("compressed");
    let doc = level_document(4);

    for kind in [FilterKind::Gzip, FilterKind::Zlib].iter() {
        let mut packed = Vec::new();
        encode_compressed(&doc, &mut packed, *kind).unwrap();

        group.bench_function(format!("encode_{:?}", kind), |b| {
            b.iter(|| {
                let mut out = Vec::new();
                encode_compressed(black_box(&doc), &mut out, *kind)
            })
        });
        group.bench_function(format!("decode_{:?}", kind), |b| {
            b.iter(|| decode_detected(black_box(&packed[..])))
        });
    }
    group.finish();
}

fn benchmark_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde");

    for size in [10, 100, 500].iter() {
        let value = inventory(*size);
        let bytes = to_vec(&value).unwrap();

        group.bench_with_input(BenchmarkId::new("to_vec", size), &value, |b, value| {
            b.iter(|| to_vec(black_box(value)))
        });
        group.bench_with_input(BenchmarkId::new("from_slice", size), &bytes, |b, bytes| {
            b.iter(|| from_slice::<Inventory>(black_box(bytes)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_encode_document,
    benchmark_decode_document,
    benchmark_streaming_decode,
    benchmark_compressed,
    benchmark_serde
);
criterion_main!(benches);
