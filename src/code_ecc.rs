/// The error correction level in a QR Code symbol.
///
/// Ordinal order (`Low` = 0 .. `High` = 3) matches the index into the
/// per-version ECC parameter tables; higher levels spend more of the
/// symbol's capacity on parity and therefore hold less payload.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum CodeEcc {
    /// The QR Code can tolerate about  7% erroneous codewords.
    Low,
    /// The QR Code can tolerate about 15% erroneous codewords.
    Medium,
    /// The QR Code can tolerate about 25% erroneous codewords.
    Quartile,
    /// The QR Code can tolerate about 30% erroneous codewords.
    High,
}

impl CodeEcc {
    /// All four levels in ascending order of error tolerance.
    pub const ALL: [CodeEcc; 4] = [
        CodeEcc::Low,
        CodeEcc::Medium,
        CodeEcc::Quartile,
        CodeEcc::High,
    ];

    /// Builds a level from its table index (0 = Low, 3 = High).
    ///
    /// Panics if `index` is outside `0..4`.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[usize::from(index)]
    }

    // Returns an unsigned 2-bit integer (in the range 0 to 3).
    pub fn ordinal(self) -> usize {
        use CodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    // Returns the 2-bit field used inside the format information codeword.
    // This is the table ordinal with bit 0 flipped (L and M swap places),
    // per the standard's assignment of format-info ECC bits.
    pub fn format_bits(self) -> u8 {
        (self.ordinal() as u8) ^ 1
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn round_trip_through_the_table_index() {
        for (i, &ecc) in CodeEcc::ALL.iter().enumerate() {
            assert_eq!(ecc.ordinal(), i);
            assert_eq!(CodeEcc::from_index(i as u8), ecc);
        }
    }

    #[test]
    fn swap_low_and_medium_in_the_format_bits_field() {
        assert_eq!(CodeEcc::Low.format_bits(), 1);
        assert_eq!(CodeEcc::Medium.format_bits(), 0);
        assert_eq!(CodeEcc::Quartile.format_bits(), 3);
        assert_eq!(CodeEcc::High.format_bits(), 2);
    }
}
