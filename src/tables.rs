//! Per-(version, ECC) parameter tables and the capacity/alignment formulas
//! derived from them. Constants are transcribed from the standard's fixed
//! tables (same source numbers the C reference implementation embeds).

use crate::code_ecc::CodeEcc;
use crate::version::Version;

// (blocks, ecc_bytes_per_block) indexed by [version - 1][ecc.ordinal()].
#[rustfmt::skip]
static ECC_PARAMS: [[(u8, u8); 4]; 40] = [
    [( 1,  7), ( 1, 10), ( 1, 13), ( 1, 17)], //  1
    [( 1, 10), ( 1, 16), ( 1, 22), ( 1, 28)], //  2
    [( 1, 15), ( 1, 26), ( 2, 18), ( 2, 22)], //  3
    [( 1, 20), ( 2, 18), ( 2, 26), ( 4, 16)], //  4
    [( 1, 26), ( 2, 24), ( 4, 18), ( 4, 22)], //  5
    [( 2, 18), ( 4, 16), ( 4, 24), ( 4, 28)], //  6
    [( 2, 20), ( 4, 18), ( 6, 18), ( 5, 26)], //  7
    [( 2, 24), ( 4, 22), ( 6, 22), ( 6, 26)], //  8
    [( 2, 30), ( 5, 22), ( 8, 20), ( 8, 24)], //  9
    [( 4, 18), ( 5, 26), ( 8, 24), ( 8, 28)], // 10
    [( 4, 20), ( 5, 30), ( 8, 28), (11, 24)], // 11
    [( 4, 24), ( 8, 22), (10, 26), (11, 28)], // 12
    [( 4, 26), ( 9, 22), (12, 24), (16, 22)], // 13
    [( 4, 30), ( 9, 24), (16, 20), (16, 24)], // 14
    [( 6, 22), (10, 24), (12, 30), (18, 24)], // 15
    [( 6, 24), (10, 28), (17, 24), (16, 30)], // 16
    [( 6, 28), (11, 28), (16, 28), (19, 28)], // 17
    [( 6, 30), (13, 26), (18, 28), (21, 28)], // 18
    [( 7, 28), (14, 26), (21, 26), (25, 26)], // 19
    [( 8, 28), (16, 26), (20, 30), (25, 28)], // 20
    [( 8, 28), (17, 26), (23, 28), (25, 30)], // 21
    [( 9, 28), (17, 28), (23, 30), (34, 26)], // 22
    [( 9, 30), (18, 28), (25, 30), (30, 30)], // 23
    [(10, 30), (20, 28), (27, 30), (32, 30)], // 24
    [(12, 26), (21, 28), (29, 30), (35, 30)], // 25
    [(12, 28), (23, 28), (34, 28), (37, 30)], // 26
    [(12, 30), (25, 28), (34, 30), (40, 30)], // 27
    [(13, 30), (26, 28), (35, 30), (42, 30)], // 28
    [(14, 30), (28, 28), (38, 30), (45, 30)], // 29
    [(15, 30), (29, 28), (40, 30), (48, 30)], // 30
    [(16, 30), (31, 28), (43, 30), (51, 30)], // 31
    [(17, 30), (33, 28), (45, 30), (54, 30)], // 32
    [(18, 30), (35, 28), (48, 30), (57, 30)], // 33
    [(19, 30), (37, 28), (51, 30), (60, 30)], // 34
    [(19, 30), (38, 28), (53, 30), (63, 30)], // 35
    [(20, 30), (40, 28), (56, 30), (66, 30)], // 36
    [(21, 30), (43, 28), (59, 30), (70, 30)], // 37
    [(22, 30), (45, 28), (62, 30), (74, 30)], // 38
    [(24, 30), (47, 28), (65, 30), (77, 30)], // 39
    [(25, 30), (49, 28), (68, 30), (81, 30)], // 40
];

/// Returns `(blocks, ecc_bytes_per_block)` for a (version, ECC) pair.
pub fn ecc_params(version: Version, ecc: CodeEcc) -> (u8, u8) {
    ECC_PARAMS[usize::from(version.value()) - 1][ecc.ordinal()]
}

/// Number of alignment patterns along one axis for this version (0 for
/// version 1).
pub fn alignment_count(version: Version) -> i32 {
    let v = version.value();
    if v < 2 {
        0
    } else {
        let side = i32::from(v) / 7 + 2;
        side * side - 3
    }
}

/// The module coordinate of the `index`th alignment pattern center along one
/// axis (index 0 is always 6, the timing-pattern column/row).
pub fn alignment_position(version: Version, index: u8) -> i32 {
    if index == 0 {
        return 6;
    }
    let v = i32::from(version.value());
    let num_steps = v / 7 + 1;
    let max = v * 4 + 10;
    let mut step = ((max - 6) * 2 / num_steps + 1) / 2; // nearest-integer division
    if step & 1 != 0 {
        step += 1;
    }
    max - step * (num_steps - i32::from(index))
}

/// Total number of data-bearing bits (the raw bit budget before splitting
/// into ECC blocks), accounting for function patterns, timing, alignment
/// overlap and version information.
pub fn data_bits_for_version(version: Version) -> i32 {
    let v = i32::from(version.value());
    let side = v * 4 + 17;
    let mut bits = side * side;
    bits -= 225; // position patterns, separators, format info
    bits -= 8 * v; // timing patterns
    bits -= 25 * alignment_count(version); // alignment patterns
    bits += 10 * (v / 7); // alignment/timing overlap added back
    if v >= 7 {
        bits -= 36; // version information
    }
    bits
}

/// Maximum number of data bytes (payload, excluding ECC) a (version, ECC)
/// pair can hold.
pub fn max_data_bytes(version: Version, ecc: CodeEcc) -> i32 {
    let bits = data_bits_for_version(version);
    let (blocks, ecc_bytes) = ecc_params(version, ecc);
    bits / 8 - i32::from(blocks) * i32::from(ecc_bytes)
}

/// The block split derived from a (version, ECC) pair: `blocks` blocks
/// total, the first `short_blocks` of which carry one fewer data byte than
/// the rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    pub blocks: u8,
    pub short_blocks: u8,
    pub data_bytes: u8,
    pub ecc_bytes: u8,
}

pub fn block_layout(version: Version, ecc: CodeEcc) -> BlockLayout {
    let (blocks, ecc_bytes) = ecc_params(version, ecc);
    let capacity = max_data_bytes(version, ecc) as u32;
    let blocks_u32 = u32::from(blocks);
    let mut data_bytes = capacity / blocks_u32;
    let mut short_blocks = 0u32;
    if capacity % blocks_u32 != 0 {
        data_bytes += 1;
        short_blocks = blocks_u32 - (capacity % blocks_u32);
    }
    BlockLayout {
        blocks,
        short_blocks: short_blocks as u8,
        data_bytes: data_bytes as u8,
        ecc_bytes,
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn agree_with_the_table_invariant_for_every_version_and_ecc() {
        for v in 1..=40u8 {
            let version = Version::new(v);
            for &ecc in &CodeEcc::ALL {
                let layout = block_layout(version, ecc);
                let total_codewords = data_bits_for_version(version) / 8;
                let ecc_total = i32::from(layout.blocks) * i32::from(layout.ecc_bytes);
                assert_eq!(
                    ecc_total + max_data_bytes(version, ecc),
                    total_codewords,
                    "version {v} ecc {ecc:?}"
                );
            }
        }
    }

    #[test]
    fn place_the_first_alignment_pattern_at_six() {
        for v in 2..=40u8 {
            assert_eq!(alignment_position(Version::new(v), 0), 6);
        }
    }

    #[test]
    fn report_no_alignment_patterns_at_version_one() {
        assert_eq!(alignment_count(Version::new(1)), 0);
    }

    #[test]
    fn match_known_alignment_pattern_positions() {
        // Version 7: one extra step, positions {6, 22, 38} per the standard.
        let v7 = Version::new(7);
        assert_eq!(alignment_position(v7, 0), 6);
        assert_eq!(alignment_position(v7, 1), 22);
        assert_eq!(alignment_position(v7, 2), 38);
    }
}
