/// The error type returned by the internal, allocating QR Code builders.
///
/// `generate_qr` (the raw, caller-buffer entry point) collapses every
/// variant to a plain `0` return, matching the C ABI it mirrors. Ways to
/// resolve a `CapacityExceeded` error include widening the version range,
/// or shortening the input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrError {
    /// A version argument was outside `[1, 40]`.
    InvalidArgument,
    /// No (version, ECC) pair in the requested range can hold this much data.
    CapacityExceeded {
        data_bits: usize,
        capacity_bits: usize,
    },
    /// An internal consistency check failed; this indicates a bug in the
    /// generator or a corrupted constant table, never a bad input.
    InvariantViolation(&'static str),
}

impl std::error::Error for QrError {}

impl std::fmt::Display for QrError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Self::InvalidArgument => write!(f, "version argument out of range"),
            Self::CapacityExceeded {
                data_bits,
                capacity_bits,
            } => write!(
                f,
                "data length = {} bits, max capacity = {} bits",
                data_bits, capacity_bits
            ),
            Self::InvariantViolation(what) => write!(f, "internal invariant violated: {}", what),
        }
    }
}
