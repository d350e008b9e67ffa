//! Bit-level reading on top of an arbitrary byte source.
//!
//! DEFLATE packs multi-bit integers LSB-first within a byte, but Huffman
//! codes are packed so the earliest-sent bit is the code's most-significant
//! bit. `read_bits` and `read_huffman_bits` give each convention its own
//! primitive so callers never need to carry a bit-order flag around.
use crate::errors::DecodeErrorStatus;

/// The narrow contract a `BitReader` pulls bytes from.
///
/// Implementors hand back exactly one byte per call, in stream order; no
/// seeking. `Truncated` signals clean exhaustion, `IoError` an underlying
/// failure from the collaborator itself.
pub trait InputSource
{
    fn next_byte(&mut self) -> Result<u8, DecodeErrorStatus>;
}

/// Reads `&[u8]` in memory; the common case for one-shot decompression.
pub struct SliceSource<'a>
{
    data:     &'a [u8],
    position: usize
}

impl<'a> SliceSource<'a>
{
    pub fn new(data: &'a [u8]) -> SliceSource<'a>
    {
        SliceSource { data, position: 0 }
    }
}

impl<'a> InputSource for SliceSource<'a>
{
    fn next_byte(&mut self) -> Result<u8, DecodeErrorStatus>
    {
        let byte = *self
            .data
            .get(self.position)
            .ok_or(DecodeErrorStatus::Truncated)?;
        self.position += 1;
        Ok(byte)
    }
}

/// Reads from an arbitrary [`std::io::Read`], buffering internally so the
/// one-byte-at-a-time contract above doesn't cost a syscall per byte.
#[cfg(feature = "std")]
pub struct ReaderSource<R>
{
    reader: R,
    buf:    [u8; 4096],
    pos:    usize,
    filled: usize
}

#[cfg(feature = "std")]
impl<R: std::io::Read> ReaderSource<R>
{
    pub fn new(reader: R) -> ReaderSource<R>
    {
        ReaderSource { reader, buf: [0; 4096], pos: 0, filled: 0 }
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> InputSource for ReaderSource<R>
{
    fn next_byte(&mut self) -> Result<u8, DecodeErrorStatus>
    {
        if self.pos == self.filled
        {
            let n = self
                .reader
                .read(&mut self.buf)
                .map_err(|_| DecodeErrorStatus::IoError)?;
            if n == 0
            {
                return Err(DecodeErrorStatus::Truncated);
            }
            self.pos = 0;
            self.filled = n;
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(byte)
    }
}

/// Presents an [`InputSource`] as an LSB-first bit stream.
///
/// Bits accumulate in a `u64` buffer, low bits first, refilled a byte at a
/// time. `bits_left` always reports how many of the low bits of `buffer` are
/// valid.
pub struct BitReader<S>
{
    source:    S,
    buffer:    u64,
    bits_left: u8
}

impl<S: InputSource> BitReader<S>
{
    pub fn new(source: S) -> BitReader<S>
    {
        BitReader { source, buffer: 0, bits_left: 0 }
    }

    /// Ensures at least `bits` valid bits sit in the buffer, pulling bytes
    /// from the source (LSB-first, matching RFC 1951's in-byte bit order)
    /// as needed.
    fn fill(&mut self, bits: u8) -> Result<(), DecodeErrorStatus>
    {
        while self.bits_left < bits
        {
            let byte = self.source.next_byte()?;
            self.buffer |= u64::from(byte) << self.bits_left;
            self.bits_left += 8;
        }
        Ok(())
    }

    /// Returns the next `n` bits (0 ≤ n ≤ 16), assembled LSB-first: the
    /// first bit consumed becomes bit 0 of the result.
    pub fn read_bits(&mut self, n: u8) -> Result<u32, DecodeErrorStatus>
    {
        debug_assert!(n <= 16);
        if n == 0
        {
            return Ok(0);
        }
        self.fill(n)?;

        let mask = (1u64 << n) - 1;
        let value = (self.buffer & mask) as u32;

        self.buffer >>= n;
        self.bits_left -= n;

        Ok(value)
    }

    /// Returns the next `n` bits (1 ≤ n ≤ 16), packed MSB-first: the first
    /// bit consumed becomes the high bit of the result. Used only to match
    /// against canonical Huffman codes.
    ///
    /// Unlike `peek_huffman_bits`, this actually advances the bit position,
    /// so it checks `has_bits(n)` itself and fails with `Truncated` if fewer
    /// than `n` bits are genuinely backed by input, rather than silently
    /// consuming zero-padding.
    pub fn read_huffman_bits(&mut self, n: u8) -> Result<u16, DecodeErrorStatus>
    {
        let value = self.peek_huffman_bits(n)?;
        if !self.has_bits(n)
        {
            return Err(DecodeErrorStatus::Truncated);
        }
        self.drop_bits(n);
        Ok(value)
    }

    /// Same as [`read_huffman_bits`](Self::read_huffman_bits) but does not
    /// advance the bit position and never fails. Pads with zero bits past
    /// end of stream so a lookup-table peek near EOF never panics; the
    /// zero-padded bits are never trustworthy past `bits_left` bits, so
    /// every caller must check `has_bits(n)` itself before treating a peek
    /// as genuine (`read_huffman_bits` does this automatically;
    /// `HuffmanTable::decode` checks it directly against the matched
    /// codeword length instead of against `n`).
    pub fn peek_huffman_bits(&mut self, n: u8) -> Result<u16, DecodeErrorStatus>
    {
        debug_assert!(n >= 1 && n <= 16);
        // Best-effort fill; a short stream near EOF is allowed here, the
        // caller is responsible for checking `bits_available` before
        // trusting bits beyond what was actually supplied.
        let _ = self.fill(n);

        let available = self.bits_left.min(n);
        let mut bits: u16 = 0;
        for i in 0..available
        {
            let bit = (self.buffer >> i) & 1;
            bits = (bits << 1) | bit as u16;
        }
        // Bits beyond `available` are zero-padded (shifted in as low-order
        // bits of `bits` after already-reversed real bits).
        bits <<= n - available;
        Ok(bits)
    }

    /// Consumes up to `n` bits without returning them. Infallible by
    /// construction: clamps to `bits_left`, so dropping more bits than are
    /// actually available silently consumes only what's there rather than
    /// erroring. Callers that need to detect a short read must check
    /// `has_bits(n)` themselves before calling this (as `read_huffman_bits`
    /// and `HuffmanTable::decode` both do).
    pub fn drop_bits(&mut self, n: u8) -> ()
    {
        let n = n.min(self.bits_left);
        self.buffer >>= n;
        self.bits_left -= n;
    }

    /// True once `drop_bits`/`read_bits` would have nothing left to consume
    /// for `n` bits, i.e. fewer than `n` bits are actually backed by real
    /// input. Used after a `peek_huffman_bits` + table lookup to confirm the
    /// matched codeword length was genuinely present.
    pub fn has_bits(&self, n: u8) -> bool
    {
        self.bits_left >= n
    }

    /// Discards 0..7 bits so the next read starts on a byte boundary.
    pub fn align_to_byte(&mut self)
    {
        let partial = self.bits_left % 8;
        self.drop_bits(partial);
    }

    /// After aligning, returns one full byte, bypassing the bit buffer for
    /// any bytes still queued but not yet consumed.
    pub fn next_byte(&mut self) -> Result<u8, DecodeErrorStatus>
    {
        debug_assert_eq!(self.bits_left % 8, 0);
        if self.bits_left > 0
        {
            let byte = (self.buffer & 0xff) as u8;
            self.buffer >>= 8;
            self.bits_left -= 8;
            Ok(byte)
        }
        else
        {
            self.source.next_byte()
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn read_bits_is_lsb_first()
    {
        // byte 0b1011_0010: reading 4 bits should yield bits 0..=3 i.e. 0010
        let mut reader = BitReader::new(SliceSource::new(&[0b1011_0010]));
        assert_eq!(reader.read_bits(4).unwrap(), 0b0010);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
    }

    #[test]
    fn huffman_bits_are_msb_first()
    {
        // Sending bits 1,0,1 (in that order) as a 3-bit huffman read should
        // produce the value 0b101, regardless of which byte position they
        // land in.
        let mut reader = BitReader::new(SliceSource::new(&[0b0000_0101]));
        assert_eq!(reader.read_huffman_bits(3).unwrap(), 0b101);
    }

    #[test]
    fn read_huffman_bits_reports_truncated_past_eof()
    {
        // Single byte has only 8 real bits; asking for 9 huffman bits must
        // fail rather than silently returning zero-padded garbage.
        let mut reader = BitReader::new(SliceSource::new(&[0xFF]));
        assert!(matches!(
            reader.read_huffman_bits(9).unwrap_err(),
            DecodeErrorStatus::Truncated
        ));
    }

    #[test]
    fn peek_huffman_bits_never_errors_past_eof()
    {
        let mut reader = BitReader::new(SliceSource::new(&[0xFF]));
        // peek is allowed to look past what's really there; it just
        // zero-pads and leaves the truncation check to the caller.
        assert!(reader.peek_huffman_bits(9).is_ok());
    }

    #[test]
    fn align_to_byte_discards_partial_bits()
    {
        let mut reader = BitReader::new(SliceSource::new(&[0b1111_0001, 0xAB]));
        reader.read_bits(3).unwrap();
        reader.align_to_byte();
        assert_eq!(reader.next_byte().unwrap(), 0xAB);
    }

    #[test]
    fn truncated_on_exhaustion()
    {
        let mut reader = BitReader::new(SliceSource::new(&[0x01]));
        reader.read_bits(8).unwrap();
        assert!(matches!(
            reader.read_bits(1).unwrap_err(),
            DecodeErrorStatus::Truncated
        ));
    }
}
