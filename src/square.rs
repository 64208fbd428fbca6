use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board square, 0 = a1 … 63 = h8 (file = idx % 8, rank = idx / 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// Build from a raw index. Callers inside the engine only pass 0..=63.
    #[inline(always)]
    pub const fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Square(index)
    }

    /// Build from zero-based file (a = 0) and rank (1 = 0).
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 0-indexed (0-7)
    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// 0-indexed (0-7)
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// True for the light squares (b1, a2, …); used by the bishop-colour draw rule.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 63 {
            return Err(format!("square index out of range: {value}"));
        }
        Ok(Square(value))
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parses algebraic coordinates like `e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square: {s:?}"));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::from_file_rank(file, rank).ok_or_else(|| format!("invalid square: {s:?}"))
    }
}

impl TryFrom<String> for Square {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        write!(f, "{file}{rank}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        for name in ["a1", "h1", "e4", "a8", "h8"] {
            let sq: Square = name.parse().unwrap();
            assert_eq!(sq.to_string(), name);
        }
        assert_eq!(Square::from_str("e4").unwrap().index(), 28);
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Square::from_str("i1").is_err());
        assert!(Square::from_str("a9").is_err());
        assert!(Square::from_str("e").is_err());
        assert!(Square::from_file_rank(8, 0).is_none());
        assert!(Square::try_from(64u8).is_err());
    }

    #[test]
    fn square_colors() {
        assert!(!Square::from_str("a1").unwrap().is_light());
        assert!(Square::from_str("h1").unwrap().is_light());
        assert!(!Square::from_str("h8").unwrap().is_light());
    }
}
