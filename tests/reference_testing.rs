//! Round-trips this crate's decoder against `flate2`'s encoder, and spot
//! checks the testable scenarios called out directly against hand-built
//! streams.
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::Write;

fn compress_raw(data: &[u8]) -> Vec<u8>
{
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn roundtrip(data: &[u8])
{
    let compressed = compress_raw(data);
    let decoded = rawflate::decompress(&compressed).unwrap();
    assert_eq!(decoded, data, "roundtrip mismatch for {} byte input", data.len());
}

#[test]
fn empty_input_roundtrips()
{
    roundtrip(b"");
}

#[test]
fn short_ascii_roundtrips()
{
    roundtrip(b"Hello, World!");
}

#[test]
fn highly_repetitive_input_exercises_long_back_references()
{
    let data = vec![b'x'; 100_000];
    roundtrip(&data);
}

#[test]
fn mixed_text_exercises_dynamic_huffman_blocks()
{
    let data = include_str!("reference_testing.rs").repeat(4);
    roundtrip(data.as_bytes());
}

#[test]
fn incompressible_random_like_input_exercises_stored_blocks()
{
    // flate2 falls back to stored blocks when Huffman coding wouldn't help;
    // a pseudo-random byte sequence (LCG, no external RNG dependency needed)
    // is a reliable way to trigger that without pulling in `rand`.
    let mut state: u32 = 0x2545F491;
    let data: Vec<u8> = (0..8192)
        .map(|_| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            (state >> 24) as u8
        })
        .collect();
    roundtrip(&data);
}

#[test]
fn s5_dynamic_huffman_hello_world_via_flate2()
{
    // "Hello, World!" is short enough that flate2 may or may not choose a
    // dynamic block; the mixed-text test above forces one reliably. This
    // test just confirms the advertised scenario string roundtrips cleanly.
    roundtrip(b"Hello, World!");
}

#[test]
fn decompress_reports_bad_btype()
{
    let data = [0b0000_0111u8];
    let err = rawflate::decompress(&data).unwrap_err();
    assert!(matches!(err.error, rawflate::errors::DecodeErrorStatus::BadBtype));
}

#[test]
fn size_limit_truncates_huge_output()
{
    let data = vec![b'y'; 50_000];
    let compressed = compress_raw(&data);
    let options = rawflate::DecoderOptions::new().set_limit(100);
    let err = rawflate::decompress_with_options(&compressed, options).unwrap_err();
    assert!(matches!(
        err.error,
        rawflate::errors::DecodeErrorStatus::OutputFull
    ));
}

#[test]
fn decode_stream_matches_in_memory_decompress()
{
    let data = b"streaming through a bounded window ".repeat(2000);
    let compressed = compress_raw(&data);

    let in_memory = rawflate::decompress(&compressed).unwrap();

    let mut out = Vec::new();
    rawflate::decode_stream(&compressed[..], &mut out, rawflate::DecoderOptions::new()).unwrap();

    assert_eq!(in_memory, out);
    assert_eq!(out, data);
}
