//! The block dispatcher: reads BFINAL/BTYPE, selects a block decoder, loops
//! until the final block's end-of-block.
use crate::bitstream::{BitReader, InputSource};
use crate::block::{build_fixed_tables, decode_stored_block, read_dynamic_tables, run_symbol_loop};
use crate::errors::DecodeErrorStatus;
use crate::huffman::HuffmanTable;
use crate::options::DecoderOptions;
use crate::sink::{LimitedSink, OutputSink};

#[cfg(feature = "std")]
use crate::bitstream::{ReaderSource, SliceSource};
#[cfg(feature = "std")]
use crate::errors::InflateDecodeErrors;
#[cfg(feature = "std")]
use crate::sink::{VecSink, WindowSink};

const BTYPE_STORED: u32 = 0b00;
const BTYPE_FIXED: u32 = 0b01;
const BTYPE_DYNAMIC: u32 = 0b10;
const BTYPE_RESERVED: u32 = 0b11;

/// The dispatcher's own view of progress, mirroring the distilled spec's
/// `{READY, IN_BLOCK(kind), DONE, FAILED(kind)}` state machine. Kept mostly
/// for documentation/debugging value: the control flow below is a plain
/// loop, but every exit corresponds to exactly one of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchState
{
    Ready,
    InBlock,
    Done
}

/// Drives the outer block loop against any `InputSource`/`OutputSink` pair.
///
/// This is the core entry point every convenience wrapper below calls
/// into. When `options` carries a `size_limit`, wraps `sink` in a
/// `LimitedSink` so the limit is enforced here, generically, even for a
/// caller-supplied `OutputSink` that does no bounding of its own —
/// `VecSink`/`WindowSink` additionally enforce their own limit, but nothing
/// about the generic entry point should depend on that.
pub fn decode<S: InputSource, O: OutputSink>(
    source: S, sink: &mut O, options: DecoderOptions
) -> Result<usize, DecodeErrorStatus>
{
    let mut reader = BitReader::new(source);

    match options.size_limit()
    {
        Some(limit) =>
        {
            let mut limited = LimitedSink::new(sink, limit);
            dispatch_blocks(&mut reader, &mut limited)
        }
        None => dispatch_blocks(&mut reader, sink)
    }
}

/// Caches the fixed Huffman tables across blocks within one stream (built
/// lazily on first use) since RFC 1951 defines them once, globally, not per
/// block, then runs the BFINAL/BTYPE loop to completion.
fn dispatch_blocks<S: InputSource, O: OutputSink>(
    reader: &mut BitReader<S>, sink: &mut O
) -> Result<usize, DecodeErrorStatus>
{
    let mut fixed_tables: Option<(HuffmanTable, HuffmanTable)> = None;
    let mut state = DispatchState::Ready;

    loop
    {
        let bfinal = reader.read_bits(1)?;
        let btype = reader.read_bits(2)?;
        state = DispatchState::InBlock;

        #[cfg(feature = "log")]
        log::trace!("block header: bfinal={bfinal} btype={btype:#04b}");

        match btype
        {
            BTYPE_STORED => decode_stored_block(reader, sink)?,
            BTYPE_FIXED =>
            {
                let (litlen, distance) =
                    fixed_tables.get_or_insert_with(build_fixed_tables);
                run_symbol_loop(reader, sink, litlen, distance)?
            }
            BTYPE_DYNAMIC =>
            {
                let (litlen, distance) = read_dynamic_tables(reader)?;
                run_symbol_loop(reader, sink, &litlen, &distance)?
            }
            BTYPE_RESERVED => return Err(DecodeErrorStatus::BadBtype),
            _ => unreachable!("read_bits(2) can only produce 0..=3")
        }

        if bfinal == 1
        {
            state = DispatchState::Done;
            break;
        }
    }

    debug_assert_eq!(state, DispatchState::Done);

    #[cfg(feature = "log")]
    log::trace!("stream complete: {} bytes written", sink.bytes_written());

    Ok(sink.bytes_written())
}

/// Decompresses a complete in-memory raw DEFLATE stream.
///
/// On failure, the returned error carries the bytes successfully decoded
/// before the failing block, mirroring this crate family's own
/// `InflateDecodeErrors`.
#[cfg(feature = "std")]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, InflateDecodeErrors>
{
    decompress_with_options(data, DecoderOptions::new())
}

#[cfg(feature = "std")]
pub fn decompress_with_options(
    data: &[u8], options: DecoderOptions
) -> Result<Vec<u8>, InflateDecodeErrors>
{
    let mut sink = VecSink::with_limit(options.size_limit());
    match decode(SliceSource::new(data), &mut sink, options)
    {
        Ok(_) => Ok(sink.into_inner()),
        Err(e) => Err(InflateDecodeErrors::new(e, sink.into_inner()))
    }
}

/// Decompresses a raw DEFLATE stream from an arbitrary [`std::io::Read`],
/// writing through a bounded 32 KiB sliding window to an arbitrary
/// [`std::io::Write`] rather than buffering the whole output in memory.
#[cfg(feature = "std")]
pub fn decode_stream<R: std::io::Read, W: std::io::Write>(
    reader: R, writer: W, options: DecoderOptions
) -> Result<usize, DecodeErrorStatus>
{
    let mut sink = WindowSink::new(writer, options.size_limit());
    let written = decode(ReaderSource::new(reader), &mut sink, options)?;
    sink.finish()?;
    Ok(written)
}
