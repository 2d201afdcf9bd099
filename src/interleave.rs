//! Splits a padded data stream into blocks, computes the ECC parity for
//! each, and interleaves data then ECC bytes into the final codeword stream.

use crate::reed_solomon;
use crate::tables::BlockLayout;

/// Interleaves `data` (already padded to the block layout's total capacity)
/// with its per-block Reed-Solomon parity, producing the codeword stream
/// that gets placed into the module matrix.
pub fn interleave(data: &[u8], layout: BlockLayout) -> Vec<u8> {
    let blocks = usize::from(layout.blocks);
    let ecc_bytes = usize::from(layout.ecc_bytes);
    let data_bytes = usize::from(layout.data_bytes);
    let short_blocks = usize::from(layout.short_blocks);

    let divisor = reed_solomon::generator_polynomial(ecc_bytes);

    let mut block_data = Vec::with_capacity(blocks);
    let mut block_ecc = Vec::with_capacity(blocks);
    let mut pos = 0usize;
    for b in 0..blocks {
        let len = data_bytes - usize::from(b < short_blocks);
        let block = &data[pos..pos + len];
        pos += len;
        block_ecc.push(reed_solomon::parity(block, &divisor));
        block_data.push(block);
    }
    debug_assert_eq!(pos, data.len());

    let mut result = Vec::with_capacity(data.len() + blocks * ecc_bytes);
    for col in 0..data_bytes {
        for (b, block) in block_data.iter().enumerate() {
            let len = data_bytes - usize::from(b < short_blocks);
            if col < len {
                result.push(block[col]);
            }
        }
    }
    for col in 0..ecc_bytes {
        for ecc in &block_ecc {
            result.push(ecc[col]);
        }
    }
    result
}
