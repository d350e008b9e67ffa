use criterion::{criterion_group, criterion_main, Criterion};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

fn compress_raw(data: &[u8]) -> Vec<u8>
{
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn bench_decode(c: &mut Criterion)
{
    let data = include_bytes!("../src/lib.rs").repeat(50);
    let compressed = compress_raw(&data);

    let mut group = c.benchmark_group("decode");

    group.bench_function("rawflate", |b| {
        b.iter(|| rawflate::decompress(&compressed).unwrap())
    });

    group.bench_function("flate2", |b| {
        b.iter(|| {
            use std::io::Read;
            let mut decoder = flate2::read::DeflateDecoder::new(&compressed[..]);
            let mut out = Vec::new();
            decoder.read_to_end(&mut out).unwrap();
            out
        })
    });

    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
