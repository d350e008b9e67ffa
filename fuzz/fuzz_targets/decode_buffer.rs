#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes should never panic the decoder, only return Err.
    let _ = rawflate::decompress(data);
});
