//! Packs a finished module matrix into the output bitmap: row-major, one bit
//! per module (1 = black), MSB-left, each row padded on the right to a whole
//! byte.

use crate::module::Matrix;

/// Number of bytes one packed row of `side` modules occupies.
pub fn row_bytes(side: i32) -> usize {
    ((side + 7) / 8) as usize
}

/// Packs `m` into `out`, returning the number of bytes written
/// (`m.side * row_bytes(m.side)`). Panics if `out` is too short.
pub fn pack_bitmap(m: &Matrix, out: &mut [u8]) -> usize {
    let side = m.side;
    let stride = row_bytes(side);
    let total = (side as usize) * stride;
    assert!(out.len() >= total, "output buffer too small");

    for row in 0..side {
        let row_out = &mut out[(row as usize) * stride..(row as usize + 1) * stride];
        let mut acc: u8 = 0;
        let mut bits_in_acc = 0u32;
        let mut byte_i = 0usize;
        for col in 0..side {
            acc = (acc << 1) | m.is_dark(col, row) as u8;
            bits_in_acc += 1;
            if bits_in_acc == 8 {
                row_out[byte_i] = acc;
                byte_i += 1;
                acc = 0;
                bits_in_acc = 0;
            }
        }
        if bits_in_acc > 0 {
            row_out[byte_i] = acc << (8 - bits_in_acc);
        }
    }
    total
}
