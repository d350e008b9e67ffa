//! Decoder configuration.

/// Configuration threaded into a decode call.
///
/// Mirrors the shape of this crate family's own `DeflateOptions`: a small,
/// `Copy`able value rather than a builder trait, with a `size_limit` that
/// lets a caller bound output growth (protecting against decompression
/// bombs) independently of which `OutputSink` is in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecoderOptions
{
    size_limit: Option<usize>
}

impl DecoderOptions
{
    pub fn new() -> DecoderOptions
    {
        DecoderOptions::default()
    }

    /// Caps total output bytes; exceeding it surfaces as `OutputFull`.
    pub fn set_limit(mut self, limit: usize) -> DecoderOptions
    {
        self.size_limit = Some(limit);
        self
    }

    pub fn size_limit(&self) -> Option<usize>
    {
        self.size_limit
    }
}
