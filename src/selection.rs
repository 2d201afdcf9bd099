//! Version/ECC selection from a requested `[min_version, max_version]` range
//! and the byte lengths of the three speculatively-encoded segment kinds.
//!
//! Implements the two selection modes: "smallest symbol" (smallest version,
//! then lowest ECC that fits) when searching `target..=limit` in ascending
//! order, and "maximize ECC" (within the smallest feasible version, pick
//! the highest ECC level that still fits) when the caller's `target > limit`
//! asked for the range to be searched in reverse.

use crate::code_ecc::CodeEcc;
use crate::tables;
use crate::version::Version;

/// Picks a (version, ECC) pair given the three kinds' encoded byte lengths
/// (0 meaning "this kind was not attempted or doesn't fit anywhere").
pub fn select_parameters(
    lengths: [u16; 3],
    min_version: u8,
    max_version: u8,
    maximize_ecc: bool,
) -> Option<(Version, CodeEcc)> {
    let small = if min_version < 10 {
        select_for_kind(lengths[0], min_version, max_version.min(9), maximize_ecc)
    } else {
        None
    };
    let medium = if min_version < 27 && max_version > 9 {
        select_for_kind(
            lengths[1],
            min_version.max(10),
            max_version.min(26),
            maximize_ecc,
        )
    } else {
        None
    };
    let large = if max_version > 26 {
        select_for_kind(lengths[2], min_version.max(27), max_version, maximize_ecc)
    } else {
        None
    };

    let mut result = small;
    for candidate in [medium, large] {
        result = match (result, candidate) {
            (None, c) => c,
            (Some((_, result_ecc)), Some((_, cand_ecc)))
                if maximize_ecc && cand_ecc > result_ecc =>
            {
                candidate
            }
            (r, _) => r,
        };
    }
    result
}

fn select_for_kind(
    length: u16,
    min_version: u8,
    max_version: u8,
    maximize_ecc: bool,
) -> Option<(Version, CodeEcc)> {
    // `length == 0` is the "this kind's speculative encoding failed or was
    // never attempted" sentinel, not a real encoded length: every encoded
    // segment carries at least a mode indicator and a length field, so a
    // genuine encoding is always at least a couple of bytes.
    if length == 0 || min_version > max_version {
        return None;
    }
    if maximize_ecc {
        for ecc in CodeEcc::ALL.into_iter().rev() {
            if let Some(v) = minimum_version_for(length, min_version, max_version, ecc) {
                return Some((v, ecc));
            }
        }
        None
    } else {
        // Low has the most capacity of the four levels at any given version,
        // so the smallest version that fits at Low is the smallest version
        // that fits at all; "lowest ECC capable of the payload" at that
        // version is then Low itself, by construction.
        let version = minimum_version_for(length, min_version, max_version, CodeEcc::Low)?;
        Some((version, CodeEcc::Low))
    }
}

fn minimum_version_for(
    length: u16,
    min_version: u8,
    max_version: u8,
    ecc: CodeEcc,
) -> Option<Version> {
    (min_version..=max_version).find_map(|v| {
        let version = Version::new(v);
        (i32::from(length) <= tables::max_data_bytes(version, ecc)).then_some(version)
    })
}
