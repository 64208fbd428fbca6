/// Bitboard file masks (a1 = bit 0 … h8 = bit 63).
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = 0x8080_8080_8080_8080;

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_2: u64 = 0x0000_0000_0000_FF00;
pub const RANK_7: u64 = 0x00FF_0000_0000_0000;
pub const RANK_8: u64 = 0xFF00_0000_0000_0000;

/// Squares of one colour, used by the same-coloured-bishops draw rule.
pub const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;
pub const DARK_SQUARES: u64 = !LIGHT_SQUARES;

pub trait BitboardExt {
    /// Index of the least significant set bit. Undefined for an empty board.
    fn lsb(self) -> u8;
    fn is_single(self) -> bool;
}

impl BitboardExt for u64 {
    #[inline(always)]
    fn lsb(self) -> u8 {
        debug_assert!(self != 0, "lsb of empty bitboard");
        self.trailing_zeros() as u8
    }

    #[inline(always)]
    fn is_single(self) -> bool {
        self != 0 && self & (self - 1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_square_mask_matches_square_parity() {
        for idx in 0u8..64 {
            let light = (idx % 8 + idx / 8) % 2 == 1;
            assert_eq!(LIGHT_SQUARES >> idx & 1 == 1, light, "square {idx}");
        }
    }

    #[test]
    fn single_bit_detection() {
        assert!((1u64 << 12).is_single());
        assert!(!0u64.is_single());
        assert!(!0b11u64.is_single());
        assert_eq!((1u64 << 40 | 1 << 50).lsb(), 40);
    }
}
