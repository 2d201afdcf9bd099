//! Generates QR Code symbols from raw byte data.
//!
//! This crate implements the encoder half of the QR Code Model 2 standard
//! (ISO/IEC 18004): Reed-Solomon error correction over GF(2^8), block
//! interleaving, function-pattern and data-module placement, and ISO mask
//! scoring/selection. It does not read or decode symbols, and it encodes
//! input purely as the 8-bit byte segment mode — no numeric, alphanumeric
//! or kanji segments, no ECI, no structured append, no micro QR.
//!
//! # Layers
//!
//! - [`generate_qr`]: the raw, caller-buffer entry point. Chooses a version
//!   and ECC level from a requested range, encodes `data`, and packs the
//!   resulting bitmap (one bit per module, MSB-left, rows padded to whole
//!   bytes) into a caller-supplied slice. Returns `0` on any failure.
//! - [`QrCode`]: an allocating wrapper over the same pipeline, for callers
//!   who'd rather get a `Result` and an owned bitmap back than manage a
//!   buffer and a sentinel return value.
//!
//! # Example
//!
//! ```
//! use qrgen::{QrCode, Version};
//!
//! let qr = QrCode::encode(b"HELLO WORLD", Version::new(1), Version::new(40)).unwrap();
//! for y in 0..qr.size() {
//!     for x in 0..qr.size() {
//!         let _dark = qr.get_module(x, y);
//!     }
//! }
//! ```

mod bit_buffer;
mod code_ecc;
mod error;
mod export;
mod finder_penalty;
mod gf256;
mod interleave;
mod mask;
mod masking;
mod module;
mod qr_code;
mod reed_solomon;
mod segment;
mod selection;
mod tables;
mod version;

pub use code_ecc::CodeEcc;
pub use error::QrError;
pub use mask::Mask;
pub use qr_code::{generate_qr, QrCode};
pub use version::Version;
