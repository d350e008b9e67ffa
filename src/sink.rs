//! Output collaborators: accept literal bytes and LZ77 back-references.
//!
//! Both implementations here enforce the same two invariants the symbol loop
//! relies on: a back-reference's distance must not exceed the number of
//! bytes already written, and copies proceed byte-by-byte so that a
//! self-overlapping copy (distance < length) propagates the just-written
//! bytes, the classic LZ77 RLE behavior.
use crate::constants::WINDOW_SIZE;
use crate::errors::DecodeErrorStatus;

/// The narrow contract a block decoder's symbol loop writes through.
pub trait OutputSink
{
    fn write_byte(&mut self, b: u8) -> Result<(), DecodeErrorStatus>;

    /// Copies `length` bytes starting `distance` bytes behind the current
    /// write cursor. Must fail with `BadDistRange` if `distance` exceeds
    /// `bytes_written()`.
    fn copy_from_window(&mut self, length: u16, distance: u16) -> Result<(), DecodeErrorStatus>;

    /// Appends `data` verbatim (used by the stored-block decoder, which
    /// never goes through the Huffman/LZ77 path).
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), DecodeErrorStatus>
    {
        for &b in data
        {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Total bytes written so far.
    fn bytes_written(&self) -> usize;
}

/// Wraps an arbitrary `OutputSink` and enforces `DecoderOptions::size_limit`
/// against it, regardless of whether the wrapped sink does any limit
/// checking of its own. `decode` (src/decoder.rs) wraps every sink in one of
/// these when a limit is configured, so the generic entry point honors
/// `size_limit` even for caller-supplied `OutputSink` implementations that
/// don't implement bounding themselves — `VecSink`/`WindowSink` additionally
/// enforce their own limit, but a third-party sink should not have to.
pub(crate) struct LimitedSink<'a, O>
{
    inner: &'a mut O,
    limit: usize
}

impl<'a, O: OutputSink> LimitedSink<'a, O>
{
    pub(crate) fn new(inner: &'a mut O, limit: usize) -> LimitedSink<'a, O>
    {
        LimitedSink { inner, limit }
    }

    fn check_limit(&self, additional: usize) -> Result<(), DecodeErrorStatus>
    {
        if self.inner.bytes_written() + additional > self.limit
        {
            return Err(DecodeErrorStatus::OutputFull);
        }
        Ok(())
    }
}

impl<'a, O: OutputSink> OutputSink for LimitedSink<'a, O>
{
    fn write_byte(&mut self, b: u8) -> Result<(), DecodeErrorStatus>
    {
        self.check_limit(1)?;
        self.inner.write_byte(b)
    }

    fn copy_from_window(&mut self, length: u16, distance: u16) -> Result<(), DecodeErrorStatus>
    {
        self.check_limit(usize::from(length))?;
        self.inner.copy_from_window(length, distance)
    }

    fn bytes_written(&self) -> usize
    {
        self.inner.bytes_written()
    }
}

/// Keeps the entire decoded output in memory. The convenience path for
/// one-shot decompression: never discards a byte, so it trivially satisfies
/// the sliding-window contract at the cost of O(output length) memory.
pub struct VecSink
{
    data:  Vec<u8>,
    limit: Option<usize>
}

impl VecSink
{
    pub fn new() -> VecSink
    {
        VecSink { data: Vec::new(), limit: None }
    }

    pub fn with_limit(limit: Option<usize>) -> VecSink
    {
        VecSink { data: Vec::new(), limit }
    }

    pub fn into_inner(self) -> Vec<u8>
    {
        self.data
    }

    fn check_limit(&self, additional: usize) -> Result<(), DecodeErrorStatus>
    {
        if let Some(limit) = self.limit
        {
            if self.data.len() + additional > limit
            {
                return Err(DecodeErrorStatus::OutputFull);
            }
        }
        Ok(())
    }
}

impl Default for VecSink
{
    fn default() -> VecSink
    {
        VecSink::new()
    }
}

impl OutputSink for VecSink
{
    fn write_byte(&mut self, b: u8) -> Result<(), DecodeErrorStatus>
    {
        self.check_limit(1)?;
        self.data.push(b);
        Ok(())
    }

    fn copy_from_window(&mut self, length: u16, distance: u16) -> Result<(), DecodeErrorStatus>
    {
        let length = usize::from(length);
        let distance = usize::from(distance);

        if distance == 0 || distance > self.data.len()
        {
            return Err(DecodeErrorStatus::BadDistRange);
        }
        self.check_limit(length)?;

        // Byte-by-byte: when distance < length the bytes we just wrote must
        // be visible to later reads in the same copy (run-length behavior).
        let start = self.data.len() - distance;
        for i in 0..length
        {
            let b = self.data[start + i];
            self.data.push(b);
        }
        Ok(())
    }

    fn bytes_written(&self) -> usize
    {
        self.data.len()
    }
}

/// A genuinely bounded 32 KiB ring buffer over an arbitrary
/// [`std::io::Write`]. Literal writes and copies mutate only the ring;
/// bytes are flushed to the wrapped writer once they've fallen more than
/// [`WINDOW_SIZE`] behind the write cursor, so memory use stays O(1) with
/// respect to total output length.
#[cfg(feature = "std")]
pub struct WindowSink<W>
{
    writer:  W,
    window:  Box<[u8; WINDOW_SIZE]>,
    written: usize,
    limit:   Option<usize>
}

#[cfg(feature = "std")]
impl<W: std::io::Write> WindowSink<W>
{
    pub fn new(writer: W, limit: Option<usize>) -> WindowSink<W>
    {
        WindowSink {
            writer,
            window: Box::new([0u8; WINDOW_SIZE]),
            written: 0,
            limit
        }
    }

    fn check_limit(&self, additional: usize) -> Result<(), DecodeErrorStatus>
    {
        if let Some(limit) = self.limit
        {
            if self.written + additional > limit
            {
                return Err(DecodeErrorStatus::OutputFull);
            }
        }
        Ok(())
    }

    fn put(&mut self, b: u8) -> Result<(), DecodeErrorStatus>
    {
        self.window[self.written % WINDOW_SIZE] = b;
        self.written += 1;

        // Flush whichever byte just fell more than WINDOW_SIZE behind so
        // the ring never needs to hold more than one window's worth.
        if self.written > WINDOW_SIZE
        {
            let flush_pos = (self.written - WINDOW_SIZE - 1) % WINDOW_SIZE;
            self.writer
                .write_all(&self.window[flush_pos..flush_pos + 1])
                .map_err(|_| DecodeErrorStatus::IoError)?;
        }
        Ok(())
    }

    /// Flushes every byte still held in the ring to the wrapped writer.
    /// Call once after a stream finishes decoding.
    pub fn finish(mut self) -> Result<W, DecodeErrorStatus>
    {
        let pending = self.written.min(WINDOW_SIZE);
        let start = self.written.saturating_sub(pending);
        for i in 0..pending
        {
            let b = self.window[(start + i) % WINDOW_SIZE];
            self.writer
                .write_all(&[b])
                .map_err(|_| DecodeErrorStatus::IoError)?;
        }
        self.writer.flush().map_err(|_| DecodeErrorStatus::IoError)?;
        Ok(self.writer)
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> OutputSink for WindowSink<W>
{
    fn write_byte(&mut self, b: u8) -> Result<(), DecodeErrorStatus>
    {
        self.check_limit(1)?;
        self.put(b)
    }

    fn copy_from_window(&mut self, length: u16, distance: u16) -> Result<(), DecodeErrorStatus>
    {
        let length = usize::from(length);
        let distance = usize::from(distance);

        if distance == 0 || distance > self.written || distance > WINDOW_SIZE
        {
            return Err(DecodeErrorStatus::BadDistRange);
        }
        self.check_limit(length)?;

        for _ in 0..length
        {
            let src_pos = (self.written - distance) % WINDOW_SIZE;
            let b = self.window[src_pos];
            self.put(b)?;
        }
        Ok(())
    }

    fn bytes_written(&self) -> usize
    {
        self.written
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn vec_sink_rejects_distance_past_written()
    {
        let mut sink = VecSink::new();
        sink.write_byte(b'a').unwrap();
        assert!(matches!(
            sink.copy_from_window(1, 2).unwrap_err(),
            DecodeErrorStatus::BadDistRange
        ));
    }

    #[test]
    fn vec_sink_self_overlapping_copy_is_rle()
    {
        let mut sink = VecSink::new();
        sink.write_byte(b'a').unwrap();
        // distance 1, length 4: classic run-length "aaaa"
        sink.copy_from_window(4, 1).unwrap();
        assert_eq!(sink.into_inner(), b"aaaaa");
    }

    #[test]
    fn vec_sink_respects_size_limit()
    {
        let mut sink = VecSink::with_limit(Some(2));
        sink.write_byte(b'a').unwrap();
        sink.write_byte(b'b').unwrap();
        assert!(matches!(
            sink.write_byte(b'c').unwrap_err(),
            DecodeErrorStatus::OutputFull
        ));
    }

    #[test]
    fn limited_sink_enforces_limit_even_when_inner_sink_does_not()
    {
        // VecSink::new() carries no limit of its own; LimitedSink must still
        // stop writes once the wrapper's own limit is hit.
        let mut inner = VecSink::new();
        let mut limited = LimitedSink::new(&mut inner, 2);
        limited.write_byte(b'a').unwrap();
        limited.write_byte(b'b').unwrap();
        assert!(matches!(
            limited.write_byte(b'c').unwrap_err(),
            DecodeErrorStatus::OutputFull
        ));
        assert_eq!(inner.into_inner(), b"ab");
    }

    #[test]
    fn limited_sink_rejects_copy_that_would_exceed_limit()
    {
        let mut inner = VecSink::new();
        let mut limited = LimitedSink::new(&mut inner, 3);
        limited.write_byte(b'a').unwrap();
        assert!(matches!(
            limited.copy_from_window(4, 1).unwrap_err(),
            DecodeErrorStatus::OutputFull
        ));
    }
}
