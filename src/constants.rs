/// Number of symbols in the literal/length alphabet, including the two
/// reserved symbols (286, 287) that must never legally appear.
pub const NUM_LITLEN_SYMS: usize = 288;

/// Number of symbols in the distance alphabet, including the two reserved
/// symbols (30, 31).
pub const NUM_DISTANCE_SYMS: usize = 32;

/// Number of symbols in the code-length (precode) alphabet.
pub const NUM_PRECODE_SYMS: usize = 19;

/// Maximum codeword length for litlen and distance codes.
pub const MAX_LITLEN_CODEWORD_LEN: u8 = 15;

/// Maximum codeword length for the code-length alphabet.
pub const MAX_PRECODE_CODEWORD_LEN: u8 = 7;

/// litlen symbol 256 is end-of-block.
pub const END_OF_BLOCK: u16 = 256;

/// Order in which the HCLEN code-length-alphabet lengths are stored in a
/// dynamic block header. See RFC 1951 3.2.7.
pub const PRECODE_LENS_PERMUTATION: [u8; NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15
];

/// Fixed litlen code lengths, RFC 1951 3.2.6.
pub fn fixed_litlen_lens() -> [u8; NUM_LITLEN_SYMS]
{
    let mut lens = [0u8; NUM_LITLEN_SYMS];
    lens[0..144].fill(8);
    lens[144..256].fill(9);
    lens[256..280].fill(7);
    lens[280..288].fill(8);
    lens
}

/// Fixed distance code lengths, RFC 1951 3.2.6: every symbol has length 5.
pub fn fixed_distance_lens() -> [u8; NUM_DISTANCE_SYMS]
{
    [5u8; NUM_DISTANCE_SYMS]
}

/// Size of the sliding window used for LZ77 back-references.
pub const WINDOW_SIZE: usize = 32 * 1024;
