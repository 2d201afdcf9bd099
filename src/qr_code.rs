//! Top-level orchestration: version/ECC selection, codeword assembly, module
//! placement and masking, and the two public entry points built on top of it.
//!
//! - `generate_qr` is the raw, caller-buffer entry point: it never
//!   allocates an error path, collapsing every failure to a `0` return.
//! - `QrCode::encode` is the allocating, `Result`-returning wrapper most
//!   callers in this codebase's style would actually reach for; it shares
//!   every step of the pipeline with `generate_qr` down to the module
//!   matrix builder.

use crate::code_ecc::CodeEcc;
use crate::error::QrError;
use crate::export;
use crate::interleave;
use crate::mask::Mask;
use crate::masking;
use crate::module::{self, Matrix};
use crate::segment::{self, Kind};
use crate::selection;
use crate::tables;
use crate::version::Version;

/// Resolves `(target_version, limit_version)` into the `(min, max,
/// maximize_ecc)` triple the selector searches. `target <= limit` (including
/// equality) searches the ordered range for the smallest version and lowest
/// ECC that fits; `target > limit` searches the reversed range maximizing
/// ECC within the smallest feasible version (see DESIGN.md for why equality
/// takes the former branch).
fn resolve_range(target_version: u8, limit_version: u8) -> Result<(u8, u8, bool), QrError> {
    if !(1..=40).contains(&target_version) || !(1..=40).contains(&limit_version) {
        return Err(QrError::InvalidArgument);
    }
    if target_version <= limit_version {
        Ok((target_version, limit_version, false))
    } else {
        Ok((limit_version, target_version, true))
    }
}

/// Speculatively encodes `data` as a byte-mode segment under each of the
/// three length-field kinds, returning the encoded byte length per kind (0
/// where that kind can't hold this data at all) alongside the encoded bytes
/// themselves, keyed by `Kind::index()`.
fn encode_all_kinds(data: &[u8]) -> ([u16; 3], [Option<Vec<u8>>; 3]) {
    let mut lengths = [0u16; 3];
    let mut encoded: [Option<Vec<u8>>; 3] = [None, None, None];
    for kind in Kind::ALL {
        if let Some(bytes) = segment::encode_byte_segment(data, kind) {
            lengths[kind.index()] = bytes.len() as u16;
            encoded[kind.index()] = Some(bytes);
        }
    }
    (lengths, encoded)
}

/// Runs the shared pipeline (selection through mask choice) and returns the
/// finished module matrix alongside the chosen version, ECC level and mask.
fn build(
    data: &[u8],
    target_version: u8,
    limit_version: u8,
) -> Result<(Version, CodeEcc, Mask, Matrix), QrError> {
    let (min_version, max_version, maximize_ecc) = resolve_range(target_version, limit_version)?;
    let (lengths, encoded) = encode_all_kinds(data);

    let (version, ecc) = selection::select_parameters(lengths, min_version, max_version, maximize_ecc)
        .ok_or_else(|| {
            let widest_kind = Kind::for_version(max_version);
            QrError::CapacityExceeded {
                data_bits: segment::encoded_bit_length(data.len(), widest_kind),
                capacity_bits: (tables::max_data_bytes(Version::new(max_version), CodeEcc::Low)
                    .max(0) as usize)
                    * 8,
            }
        })?;

    let kind = Kind::for_version(version.value());
    let segment_bytes = encoded[kind.index()]
        .as_ref()
        .expect("selector chose a kind whose speculative encoding failed");

    let capacity = tables::max_data_bytes(version, ecc) as usize;
    let padded = segment::pad_to_capacity(segment_bytes, capacity);

    let layout = tables::block_layout(version, ecc);
    let codewords = interleave::interleave(&padded, layout);

    let mut matrix = Matrix::new(version.side());
    module::draw_function_patterns(&mut matrix, version);
    module::place_data(&mut matrix, version, &codewords)?;
    let mask = masking::select_and_apply_mask(&mut matrix, ecc);

    Ok((version, ecc, mask, matrix))
}

/// The raw entry point: encodes `data` into a QR Code symbol whose version
/// is chosen from `[target_version, limit_version]` (or the reverse range,
/// maximizing ECC, if `target_version > limit_version`), and packs its
/// bitmap into `out`.
///
/// Returns the chosen version (1-40) on success, or 0 on any failure
/// (out-of-range version arguments, data too large for every candidate
/// (version, ECC) pair, or an internal invariant violation). `out` must be
/// at least `side(v) * ceil(side(v)/8)` bytes for the version that ends up
/// chosen; its contents are unspecified on failure.
pub fn generate_qr(data: &[u8], target_version: u8, limit_version: u8, out: &mut [u8]) -> u8 {
    match build(data, target_version, limit_version) {
        Ok((version, _ecc, _mask, matrix)) => {
            if out.len() < version.bitmap_len() {
                return 0;
            }
            export::pack_bitmap(&matrix, out);
            version.value()
        }
        Err(_) => 0,
    }
}

/// An allocating, `Result`-returning QR Code symbol.
///
/// Built from the same pipeline as [`generate_qr`]; exists for callers who'd
/// rather own a `Vec<u8>` bitmap and a typed error than manage a
/// caller-supplied buffer and a sentinel return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub version: Version,
    pub size: i32,
    pub ecc: CodeEcc,
    pub mask: Mask,
    bitmap: Vec<u8>,
}

impl QrCode {
    /// Encodes `data` at the version/ECC chosen from `[target_version,
    /// limit_version]` (reversed to mean "maximize ECC").
    pub fn encode(
        data: &[u8],
        target_version: Version,
        limit_version: Version,
    ) -> Result<Self, QrError> {
        let (version, ecc, mask, matrix) =
            build(data, target_version.value(), limit_version.value())?;
        let mut bitmap = vec![0u8; version.bitmap_len()];
        export::pack_bitmap(&matrix, &mut bitmap);
        Ok(Self {
            version,
            size: version.side(),
            ecc,
            mask,
            bitmap,
        })
    }

    /// Returns this symbol's side length in modules.
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns the color of the module (pixel) at `(x, y)` (`true` = dark).
    /// Out-of-bounds coordinates return `false`.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        if !(0..self.size).contains(&x) || !(0..self.size).contains(&y) {
            return false;
        }
        let stride = export::row_bytes(self.size);
        let byte = self.bitmap[(y as usize) * stride + (x as usize) / 8];
        (byte >> (7 - (x as usize % 8))) & 1 != 0
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn encode_an_empty_payload_at_version_one_exact() {
        let v1 = Version::new(1);
        let qr = QrCode::encode(&[], v1, v1).unwrap();
        assert_eq!(qr.version, v1);
        assert_eq!(qr.ecc, CodeEcc::Low);
        assert_eq!(qr.size(), 21);
        assert!(qr.get_module(0, 0)); // top-left finder corner
        assert!(qr.get_module(8, qr.size() - 8)); // dark module
    }

    #[test]
    fn encode_an_empty_payload_at_version_one_high_ecc_when_maximizing() {
        // spec.md §8's "v=1, ECC=H, empty data" boundary case: reversing the
        // range asks the selector to maximize ECC within the smallest
        // feasible version, which for empty data is version 1.
        let qr = QrCode::encode(&[], Version::new(40), Version::new(1)).unwrap();
        assert_eq!(qr.version, Version::new(1));
        assert_eq!(qr.ecc, CodeEcc::High);
        assert_eq!(qr.size(), 21);
    }

    #[test]
    fn pick_smallest_version_then_lowest_ecc_when_ordered() {
        let qr = QrCode::encode(b"x", Version::new(1), Version::new(40)).unwrap();
        assert_eq!(qr.version, Version::new(1));
        assert_eq!(qr.ecc, CodeEcc::Low);
    }

    #[test]
    fn maximize_ecc_within_the_minimum_feasible_version_when_reversed() {
        let qr = QrCode::encode(b"x", Version::new(40), Version::new(1)).unwrap();
        assert_eq!(qr.version, Version::new(1));
        assert_eq!(qr.ecc, CodeEcc::High);
    }

    #[test]
    fn fail_with_capacity_exceeded_when_nothing_in_range_fits() {
        let data = vec![0x41u8; 256];
        let err = QrCode::encode(&data, Version::new(9), Version::new(9)).unwrap_err();
        assert!(matches!(err, QrError::CapacityExceeded { .. }));
    }

    #[test]
    fn succeed_at_the_same_256_byte_payload_from_version_ten() {
        let data = vec![0x41u8; 256];
        let qr = QrCode::encode(&data, Version::new(10), Version::new(10)).unwrap();
        assert_eq!(qr.version, Version::new(10));
    }

    #[test]
    fn succeed_at_the_byte_mode_capacity_ceiling_for_version_40_low_ecc_but_fail_one_byte_over() {
        // spec.md §8's seed scenario 6: 2953 bytes is the byte-mode maximum
        // a version-40/ECC-L symbol can hold once the mode indicator and
        // 16-bit length field are accounted for; one byte more must fail
        // even when the range already spans the largest version.
        let v40 = Version::new(40);
        let data = vec![0x41u8; 2953];
        let qr = QrCode::encode(&data, v40, v40).unwrap();
        assert_eq!(qr.version, v40);
        assert_eq!(qr.ecc, CodeEcc::Low);

        let data = vec![0x41u8; 2954];
        let err = QrCode::encode(&data, v40, v40).unwrap_err();
        assert!(matches!(err, QrError::CapacityExceeded { .. }));
    }

    #[test]
    fn raw_entry_point_returns_zero_on_invalid_version_arguments() {
        let mut out = [0u8; 4096];
        assert_eq!(generate_qr(b"hi", 0, 40, &mut out), 0);
        assert_eq!(generate_qr(b"hi", 1, 41, &mut out), 0);
    }

    #[test]
    fn raw_entry_point_matches_the_wrapper_for_hello_world() {
        let mut out = vec![0u8; Version::new(40).bitmap_len()];
        let version = generate_qr(b"HELLO WORLD", 1, 40, &mut out);
        assert!(version >= 1 && version <= 40);

        let qr = QrCode::encode(b"HELLO WORLD", Version::new(1), Version::new(40)).unwrap();
        assert_eq!(qr.version.value(), version);
    }
}
