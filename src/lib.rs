//! A raw DEFLATE (RFC 1951) decompressor.
//!
//! Decodes the three DEFLATE block types — stored, fixed Huffman, and
//! dynamic Huffman — against a pluggable [`bitstream::InputSource`] /
//! [`sink::OutputSink`] pair, so the same block-level logic serves both
//! one-shot in-memory decompression and bounded-memory streaming.
//!
//! ```
//! let compressed = [0x01, 0x01, 0x00, 0xFE, 0xFF, 0x41];
//! let out = rawflate::decompress(&compressed).unwrap();
//! assert_eq!(out, b"A");
//! ```
pub mod bitstream;
mod block;
mod constants;
mod decoder;
pub mod errors;
mod huffman;
pub mod options;
pub mod sink;

pub use bitstream::InputSource;
#[cfg(feature = "std")]
pub use bitstream::{ReaderSource, SliceSource};
pub use decoder::decode;
#[cfg(feature = "std")]
pub use decoder::{decode_stream, decompress, decompress_with_options};
pub use options::DecoderOptions;
pub use sink::OutputSink;
#[cfg(feature = "std")]
pub use sink::{VecSink, WindowSink};
