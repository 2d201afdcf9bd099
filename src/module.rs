//! The module matrix: function pattern placement, version/format
//! information (with their BCH error-correction codes), and the zig-zag
//! data placement scan.

use crate::code_ecc::CodeEcc;
use crate::error::QrError;
use crate::mask::Mask;
use crate::tables;
use crate::version::Version;

/// Tagged state of one cell of the module matrix.
///
/// The low bit of every non-`Reserved`/non-`Empty` variant is the cell's
/// final pixel color (1 = black); `Empty` marks a data cell not yet
/// written, `Reserved` marks a format-info cell awaiting its final value.
/// Masking only ever transforms `White`/`Black` (the "maskable" variants)
/// into their `*WithMask` counterparts and back.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ModuleValue {
    White,
    Black,
    Reserved,
    BlackNonmasked,
    WhiteNonmasked,
    BlackWithMask,
    WhiteWithMask,
    Empty,
}

impl ModuleValue {
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            ModuleValue::Black
        } else {
            ModuleValue::White
        }
    }

    pub fn from_bit_nonmasked(bit: bool) -> Self {
        if bit {
            ModuleValue::BlackNonmasked
        } else {
            ModuleValue::WhiteNonmasked
        }
    }

    pub fn is_maskable(self) -> bool {
        matches!(self, ModuleValue::White | ModuleValue::Black)
    }

    pub fn color_bit(self) -> u8 {
        use ModuleValue::*;
        match self {
            Black | BlackNonmasked | BlackWithMask => 1,
            White | WhiteNonmasked | WhiteWithMask | Reserved | Empty => 0,
        }
    }

    /// Applies `MASKING_OFFSET`: a maskable cell whose mask predicate holds
    /// becomes the *inverted*-color "with mask" variant (note the apparent
    /// flip: a light cell under an active mask becomes `BlackWithMask`, and
    /// vice versa). Non-maskable cells pass through unchanged.
    pub fn masked_invert(self) -> Self {
        match self {
            ModuleValue::White => ModuleValue::BlackWithMask,
            ModuleValue::Black => ModuleValue::WhiteWithMask,
            other => other,
        }
    }

    /// Subtracts `MASKING_OFFSET`, the inverse of [`ModuleValue::masked_invert`].
    pub fn unmask(self) -> Self {
        match self {
            ModuleValue::BlackWithMask => ModuleValue::White,
            ModuleValue::WhiteWithMask => ModuleValue::Black,
            other => other,
        }
    }
}

/// The square module grid, indexed column-major (`col * side + row`) to
/// match the zig-zag scan formula in [`scan_index`], which is defined
/// against this layout.
#[derive(Clone, Debug)]
pub struct Matrix {
    pub side: i32,
    cells: Vec<ModuleValue>,
}

impl Matrix {
    pub fn new(side: i32) -> Self {
        Self {
            side,
            cells: vec![ModuleValue::Empty; (side as usize) * (side as usize)],
        }
    }

    fn index(&self, col: i32, row: i32) -> usize {
        (col * self.side + row) as usize
    }

    pub fn get(&self, col: i32, row: i32) -> ModuleValue {
        self.cells[self.index(col, row)]
    }

    pub fn set(&mut self, col: i32, row: i32, value: ModuleValue) {
        let i = self.index(col, row);
        self.cells[i] = value;
    }

    pub fn is_dark(&self, col: i32, row: i32) -> bool {
        self.get(col, row).color_bit() == 1
    }

    pub fn cells(&self) -> &[ModuleValue] {
        &self.cells
    }
}

/// Draws the 9x9 finder pattern (7x7 position detection pattern plus its
/// one-module light separator) centered at `(center_col, center_row)`,
/// clipped to the matrix bounds.
fn draw_finder_pattern(m: &mut Matrix, center_col: i32, center_row: i32) {
    for drow in -4..=4 {
        for dcol in -4..=4 {
            let row = center_row + drow;
            let col = center_col + dcol;
            if (0..m.side).contains(&row) && (0..m.side).contains(&col) {
                let dist = drow.abs().max(dcol.abs());
                let dark = dist != 2 && dist != 4;
                m.set(col, row, ModuleValue::from_bit_nonmasked(dark));
            }
        }
    }
}

/// Draws a 5x5 alignment pattern centered at `(center_col, center_row)`.
fn draw_alignment_pattern(m: &mut Matrix, center_col: i32, center_row: i32) {
    for drow in -2..=2 {
        for dcol in -2..=2 {
            let dist = drow.abs().max(dcol.abs());
            m.set(
                center_col + dcol,
                center_row + drow,
                ModuleValue::from_bit_nonmasked(dist != 1),
            );
        }
    }
}

fn draw_timing_patterns(m: &mut Matrix) {
    let side = m.side;
    for pos in 8..side - 8 {
        let dark = pos % 2 == 0;
        m.set(pos, 6, ModuleValue::from_bit_nonmasked(dark));
        m.set(6, pos, ModuleValue::from_bit_nonmasked(dark));
    }
}

fn draw_alignment_patterns(m: &mut Matrix, version: Version) {
    if version.value() < 2 {
        return;
    }
    let limit = i32::from(version.value()) / 7 + 1;
    for vindex in 0..=limit {
        let hindex_start = if vindex == 0 { 1 } else { 0 };
        for hindex in hindex_start..=limit {
            if vindex == limit && hindex == 0 {
                continue;
            }
            if hindex == limit && vindex == 0 {
                continue;
            }
            let row = tables::alignment_position(version, hindex as u8);
            let col = tables::alignment_position(version, vindex as u8);
            draw_alignment_pattern(m, col, row);
        }
    }
}

/// Computes the BCH remainder of `data` against `polynomial` (which excludes
/// its own leading bit, supplied implicitly via `length`), matching
/// `(data << length) mod (polynomial | (1 << length))` over GF(2).
fn bch_remainder(mut data: u32, polynomial: u32, length: u32) -> u32 {
    let mut current = polynomial & ((1 << length) - 1);
    let full_poly = current | (1 << length);
    let mut result = 0u32;
    while data != 0 {
        if data & 1 != 0 {
            result ^= current;
        }
        data >>= 1;
        current <<= 1;
        if current & (1 << length) != 0 {
            current ^= full_poly;
        }
    }
    result
}

fn place_version_info(m: &mut Matrix, version: Version) {
    if version.value() < 7 {
        return;
    }
    let v = u32::from(version.value());
    let rem = bch_remainder(v, 0xF25, 12);
    let mut data = (v << 12) | rem;
    let side = m.side;
    let position = side - 11;
    for major in 0..6 {
        for minor in 0..3 {
            let bit = data & 1 != 0;
            data >>= 1;
            let value = ModuleValue::from_bit_nonmasked(bit);
            m.set(major, position + minor, value);
            m.set(position + minor, major, value);
        }
    }
}

/// Reserves (`value = None`) or writes (`value = Some(bits)`) the 15-bit
/// format information codeword in its two standard locations.
pub fn place_format_info(m: &mut Matrix, value: Option<u32>) {
    let side = m.side;
    let mut data = value;
    for pos in 0..=14i32 {
        let module_value = match data {
            Some(d) => {
                let bit = d & 1 != 0;
                data = Some(d >> 1);
                ModuleValue::from_bit_nonmasked(bit)
            }
            None => ModuleValue::Reserved,
        };
        if pos <= 7 {
            let row = pos + i32::from(pos >= 6);
            m.set(8, row, module_value);
            m.set(side - 1 - pos, 8, module_value);
        } else if pos == 8 {
            m.set(7, 8, module_value);
            m.set(8, side - 7, module_value);
        } else {
            m.set(14 - pos, 8, module_value);
            m.set(8, side - (15 - pos), module_value);
        }
    }
}

/// Computes the 15-bit format information codeword for an (ECC, mask) pair:
/// `((ecc.format_bits() << 3) | mask) << 10 | bch`, XORed with the fixed
/// mask pattern `0x5412`.
pub fn compute_format_info(ecc: CodeEcc, mask: Mask) -> u32 {
    let data = (u32::from(ecc.format_bits()) << 3) | u32::from(mask.value());
    let rem = bch_remainder(data, 0x137, 10);
    ((data << 10) | rem) ^ 0x5412
}

/// Converts a sequential scan index into the zig-zagging `(col, row)` the
/// standard requires for data placement, skipping the timing column/row 6.
fn scan_index(i: i32, side: i32) -> (i32, i32) {
    let denom = 2 * (side - 1);
    let col_prime = i / denom;
    let r = i % denom;
    let mut col = (col_prime * 2) | (r & 1);
    let mut row = r / 2;
    if col & 2 == 0 {
        row = side - 2 - row;
    }
    col = side - 2 - col;
    if row >= 6 {
        row += 1;
    }
    if col >= 6 {
        col += 1;
    }
    (col, row)
}

/// Draws every function pattern (timing, finders, alignment grid, dark
/// module), the version information block, and reserves the format
/// information cells. Does not place any data.
pub fn draw_function_patterns(m: &mut Matrix, version: Version) {
    draw_timing_patterns(m);
    let side = m.side;
    draw_finder_pattern(m, 3, 3);
    draw_finder_pattern(m, side - 4, 3);
    draw_finder_pattern(m, 3, side - 4);
    draw_alignment_patterns(m, version);
    m.set(8, side - 8, ModuleValue::BlackNonmasked);
    place_version_info(m, version);
    place_format_info(m, None);
}

/// Places the codeword bit stream via the zig-zag scan, padding the tail
/// with light modules up to the version's full data-bit budget. Fails if an
/// `Empty` cell remains afterward (an internal consistency bug).
pub fn place_data(m: &mut Matrix, version: Version, codewords: &[u8]) -> Result<(), QrError> {
    let total_bits = tables::data_bits_for_version(version);
    let data_bits = (codewords.len() as i32) * 8;
    let side = m.side;
    let mut scan_i = 0i32;
    let mut placed = 0i32;
    while placed < total_bits {
        let (col, row) = loop {
            let (c, r) = scan_index(scan_i, side);
            scan_i += 1;
            if m.get(c, r) == ModuleValue::Empty {
                break (c, r);
            }
        };
        let bit = if placed < data_bits {
            let byte = codewords[(placed / 8) as usize];
            (byte >> (7 - (placed % 8))) & 1 != 0
        } else {
            false
        };
        m.set(col, row, ModuleValue::from_bit(bit));
        placed += 1;
    }
    if m.cells().iter().any(|&c| c == ModuleValue::Empty) {
        return Err(QrError::InvariantViolation(
            "empty module survived data placement",
        ));
    }
    Ok(())
}
