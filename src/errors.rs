//! Error taxonomy returned by this crate.
//!
//! The shape mirrors the rest of this codebase's error enums: a fixed set of
//! named, documented kinds plus a `Generic`/`GenericStr` escape hatch for
//! messages that don't need their own variant.
use std::fmt::{Debug, Formatter};

/// Why a decode attempt failed.
pub enum DecodeErrorStatus
{
    /// Input was exhausted before the requested bits/bytes were available.
    Truncated,
    /// BTYPE was `11`, which RFC 1951 reserves and never assigns meaning to.
    BadBtype,
    /// A stored block's LEN did not equal the one's complement of its NLEN.
    BadStoredHeader,
    /// A code-length vector failed to build a valid canonical Huffman code:
    /// Kraft's inequality was violated, a run operator over/underflowed, or
    /// the resulting table was otherwise unusable.
    BadTree,
    /// A dynamic block's litlen code never assigns symbol 256.
    NoEob,
    /// No symbol in a Huffman table matched the bits the reader produced.
    BadCode,
    /// A litlen symbol was greater than 285.
    BadLitlen,
    /// A distance symbol was 30 or 31.
    BadDist,
    /// A back-reference's distance exceeded the number of bytes written so
    /// far.
    BadDistRange,
    /// The output sink refused a write (a configured size limit was hit, or
    /// a bounded sink ran out of room).
    OutputFull,
    /// The input or output collaborator reported an underlying I/O failure.
    IoError,
    /// Any other fatal condition that doesn't need its own variant.
    Generic(&'static str),
    /// Same as `Generic`, for messages assembled at runtime.
    GenericStr(String)
}

impl Debug for DecodeErrorStatus
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::Truncated => write!(f, "input truncated before requested bits were available"),
            Self::BadBtype => write!(f, "reserved BTYPE 11 encountered"),
            Self::BadStoredHeader => write!(f, "stored block LEN did not match ~NLEN"),
            Self::BadTree => write!(f, "malformed Huffman code-length construction"),
            Self::NoEob => write!(f, "dynamic block litlen code has no end-of-block symbol"),
            Self::BadCode => write!(f, "no Huffman symbol matched the received bits"),
            Self::BadLitlen => write!(f, "litlen symbol greater than 285"),
            Self::BadDist => write!(f, "distance symbol was 30 or 31"),
            Self::BadDistRange => write!(f, "distance exceeds bytes written so far"),
            Self::OutputFull => write!(f, "output sink refused a write"),
            Self::IoError => write!(f, "input or output collaborator reported an I/O failure"),
            Self::Generic(reason) => write!(f, "{reason}"),
            Self::GenericStr(reason) => write!(f, "{reason}")
        }
    }
}

/// Returned by the memory-to-memory entry point on failure.
///
/// Carries the bytes decoded up to (but not including) the point of failure,
/// so a caller can inspect or discard the partial output.
pub struct InflateDecodeErrors
{
    /// Why decompression failed.
    pub error: DecodeErrorStatus,
    /// Bytes decoded before the failure.
    pub data:  Vec<u8>
}

impl InflateDecodeErrors
{
    pub fn new(error: DecodeErrorStatus, data: Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }

    pub fn new_with_error(error: DecodeErrorStatus) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, Vec::new())
    }
}

impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        writeln!(f, "{:?}", self.error)
    }
}
