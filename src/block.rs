//! The three DEFLATE block decoders and the symbol loop they share.
use crate::bitstream::{BitReader, InputSource};
use crate::constants::{
    fixed_distance_lens, fixed_litlen_lens, END_OF_BLOCK, MAX_LITLEN_CODEWORD_LEN,
    MAX_PRECODE_CODEWORD_LEN, NUM_DISTANCE_SYMS, NUM_LITLEN_SYMS, NUM_PRECODE_SYMS,
    PRECODE_LENS_PERMUTATION
};
use crate::errors::DecodeErrorStatus;
use crate::huffman::HuffmanTable;
use crate::sink::OutputSink;

/// What one litlen-code decode produced, replacing the sentinel-integer
/// encoding (`EOB = 0x10000` folded into a length) the original source used.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodedSymbol
{
    Literal(u8),
    EndOfBlock,
    Match { length: u16 }
}

/// Reads LEN/NLEN and copies LEN raw bytes from input to output. No symbol
/// decoding at all — this block type exists precisely to let incompressible
/// data pass through without Huffman overhead.
pub fn decode_stored_block<S: InputSource, O: OutputSink>(
    reader: &mut BitReader<S>, sink: &mut O
) -> Result<(), DecodeErrorStatus>
{
    reader.align_to_byte();

    let len_lo = u16::from(reader.next_byte()?);
    let len_hi = u16::from(reader.next_byte()?);
    let len = len_lo | (len_hi << 8);

    let nlen_lo = u16::from(reader.next_byte()?);
    let nlen_hi = u16::from(reader.next_byte()?);
    let nlen = nlen_lo | (nlen_hi << 8);

    if len != !nlen
    {
        return Err(DecodeErrorStatus::BadStoredHeader);
    }

    for _ in 0..len
    {
        let b = reader.next_byte()?;
        sink.write_byte(b)?;
    }

    Ok(())
}

/// Builds the canonical fixed litlen/distance tables from RFC 1951 3.2.6.
pub fn build_fixed_tables() -> (HuffmanTable, HuffmanTable)
{
    let litlen = HuffmanTable::build(&fixed_litlen_lens(), MAX_LITLEN_CODEWORD_LEN)
        .expect("fixed litlen lengths always form a valid canonical code");
    let distance = HuffmanTable::build(&fixed_distance_lens(), MAX_LITLEN_CODEWORD_LEN)
        .expect("fixed distance lengths always form a valid canonical code");
    (litlen, distance)
}

/// Parses a dynamic block's header (HLIT/HDIST/HCLEN, the code-length
/// alphabet, then the litlen/distance code-length vectors) and builds the
/// resulting litlen and distance tables.
pub fn read_dynamic_tables<S: InputSource>(
    reader: &mut BitReader<S>
) -> Result<(HuffmanTable, HuffmanTable), DecodeErrorStatus>
{
    let hlit = 257 + reader.read_bits(5)? as usize;
    let hdist = 1 + reader.read_bits(5)? as usize;
    let hclen = 4 + reader.read_bits(4)? as usize;

    let mut precode_lens = [0u8; NUM_PRECODE_SYMS];
    for &slot in PRECODE_LENS_PERMUTATION.iter().take(hclen)
    {
        precode_lens[usize::from(slot)] = reader.read_bits(3)? as u8;
    }

    let precode_table = HuffmanTable::build(&precode_lens, MAX_PRECODE_CODEWORD_LEN)?;

    let mut lens = vec![0u8; hlit + hdist];
    let mut i = 0;
    while i < lens.len()
    {
        let op = precode_table.decode(reader)?;

        match op
        {
            0..=15 =>
            {
                lens[i] = op as u8;
                i += 1;
            }
            16 =>
            {
                if i == 0
                {
                    return Err(DecodeErrorStatus::BadTree);
                }
                let extra = reader.read_bits(2)?;
                let repeat = 3 + extra as usize;
                if i + repeat > lens.len()
                {
                    return Err(DecodeErrorStatus::BadTree);
                }
                let prev = lens[i - 1];
                lens[i..i + repeat].fill(prev);
                i += repeat;
            }
            17 =>
            {
                let extra = reader.read_bits(3)?;
                let repeat = 3 + extra as usize;
                if i + repeat > lens.len()
                {
                    return Err(DecodeErrorStatus::BadTree);
                }
                i += repeat;
            }
            18 =>
            {
                let extra = reader.read_bits(7)?;
                let repeat = 11 + extra as usize;
                if i + repeat > lens.len()
                {
                    return Err(DecodeErrorStatus::BadTree);
                }
                i += repeat;
            }
            _ => unreachable!("precode alphabet only has 19 symbols")
        }
    }

    let litlen_lens = &lens[..hlit];
    let distance_lens = &lens[hlit..];

    if litlen_lens.get(usize::from(END_OF_BLOCK)).copied().unwrap_or(0) == 0
    {
        return Err(DecodeErrorStatus::NoEob);
    }

    let mut padded_litlen = vec![0u8; NUM_LITLEN_SYMS];
    padded_litlen[..litlen_lens.len()].copy_from_slice(litlen_lens);
    let mut padded_distance = vec![0u8; NUM_DISTANCE_SYMS];
    padded_distance[..distance_lens.len()].copy_from_slice(distance_lens);

    let litlen_table = HuffmanTable::build(&padded_litlen, MAX_LITLEN_CODEWORD_LEN)?;
    let distance_table = HuffmanTable::build(&padded_distance, MAX_LITLEN_CODEWORD_LEN)?;

    Ok((litlen_table, distance_table))
}

/// Maps a litlen length-code symbol (257..=285) to its match length,
/// consuming whatever extra bits RFC 1951 3.2.5 assigns it.
fn length_for_symbol<S: InputSource>(
    sym: u16, reader: &mut BitReader<S>
) -> Result<u16, DecodeErrorStatus>
{
    match sym
    {
        257..=264 => Ok(sym - 254),
        265..=284 =>
        {
            let k = (sym - 261) / 4;
            let base = 3 + 4 * (1u16 << k) + ((sym - 1) % 4) * (1u16 << k);
            let extra = reader.read_bits(k as u8)? as u16;
            Ok(base + extra)
        }
        285 => Ok(258),
        _ => Err(DecodeErrorStatus::BadLitlen)
    }
}

/// Maps a distance-code symbol (0..=29) to its match distance, consuming
/// whatever extra bits RFC 1951 3.2.5 assigns it.
fn distance_for_symbol<S: InputSource>(
    sym: u16, reader: &mut BitReader<S>
) -> Result<u16, DecodeErrorStatus>
{
    match sym
    {
        0..=3 => Ok(sym + 1),
        4..=29 =>
        {
            let k = (sym - 2) / 2;
            let base = 1 + 2 * (1u16 << k) + (sym % 2) * (1u16 << k);
            let extra = reader.read_bits(k as u8)? as u16;
            Ok(base + extra)
        }
        _ => Err(DecodeErrorStatus::BadDist)
    }
}

/// Decodes exactly one litlen symbol into its tagged outcome.
fn decode_one_symbol<S: InputSource>(
    reader: &mut BitReader<S>, litlen_table: &HuffmanTable
) -> Result<DecodedSymbol, DecodeErrorStatus>
{
    let sym = litlen_table.decode(reader)?;

    if sym < 256
    {
        Ok(DecodedSymbol::Literal(sym as u8))
    }
    else if sym == END_OF_BLOCK
    {
        Ok(DecodedSymbol::EndOfBlock)
    }
    else if sym <= 285
    {
        let length = length_for_symbol(sym, reader)?;
        Ok(DecodedSymbol::Match { length })
    }
    else
    {
        Err(DecodeErrorStatus::BadLitlen)
    }
}

/// Runs the symbol loop shared by all three block types: decode a litlen
/// symbol, emit a literal, stop on EOB, or decode a distance and invoke a
/// back-reference copy. Runs unbounded until EOB — an earlier revision of
/// this decoder family capped this loop at a fixed iteration count, which is
/// wrong; nothing in RFC 1951 bounds a block's symbol count.
pub fn run_symbol_loop<S: InputSource, O: OutputSink>(
    reader: &mut BitReader<S>, sink: &mut O, litlen_table: &HuffmanTable,
    distance_table: &HuffmanTable
) -> Result<(), DecodeErrorStatus>
{
    loop
    {
        match decode_one_symbol(reader, litlen_table)?
        {
            DecodedSymbol::Literal(b) => sink.write_byte(b)?,
            DecodedSymbol::EndOfBlock => return Ok(()),
            DecodedSymbol::Match { length } =>
            {
                let dist_sym = distance_table.decode(reader)?;
                let distance = distance_for_symbol(dist_sym, reader)?;
                sink.copy_from_window(length, distance)?;
            }
        }
    }
}
