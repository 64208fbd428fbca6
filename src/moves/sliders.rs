use crate::utils::square_index;

const ROOK_STEPS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_STEPS: [(isize, isize); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];

/// Walk one ray from `square`, adding every square up to and including the
/// first blocker (of either colour). Own-piece filtering happens in movegen.
#[inline]
fn scan_ray(square: usize, (d_rank, d_file): (isize, isize), blockers: u64) -> u64 {
    let mut attacks = 0u64;
    let mut rank = (square / 8) as isize + d_rank;
    let mut file = (square % 8) as isize + d_file;

    while (0..=7).contains(&rank) && (0..=7).contains(&file) {
        let sq = square_index(rank as usize, file as usize);
        attacks |= 1 << sq;
        if (blockers >> sq) & 1 != 0 {
            break;
        }
        rank += d_rank;
        file += d_file;
    }
    attacks
}

#[inline]
pub fn rook_attacks(square: usize, blockers: u64) -> u64 {
    ROOK_STEPS
        .iter()
        .fold(0, |acc, &step| acc | scan_ray(square, step, blockers))
}

#[inline]
pub fn bishop_attacks(square: usize, blockers: u64) -> u64 {
    BISHOP_STEPS
        .iter()
        .fold(0, |acc, &step| acc | scan_ray(square, step, blockers))
}

#[inline]
pub fn queen_attacks(square: usize, blockers: u64) -> u64 {
    rook_attacks(square, blockers) | bishop_attacks(square, blockers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit(sq: usize) -> u64 {
        1u64 << sq
    }

    #[test]
    fn rook_attacks_from_d4_no_blockers() {
        let result = rook_attacks(27, 0);
        let expected = bit(3) | bit(11) | bit(19) // d1-d3
            | bit(35) | bit(43) | bit(51) | bit(59) // d5-d8
            | bit(24) | bit(25) | bit(26) // a4-c4
            | bit(28) | bit(29) | bit(30) | bit(31); // e4-h4
        assert_eq!(result, expected);
    }

    #[test]
    fn bishop_attacks_blocked_ne() {
        // e5 blocks the NE ray; the blocker itself is included.
        let result = bishop_attacks(27, bit(36));
        let expected = bit(36)
            | bit(20) | bit(13) | bit(6) // e3 f2 g1
            | bit(18) | bit(9) | bit(0) // c3 b2 a1
            | bit(34) | bit(41) | bit(48); // c5 b6 a7
        assert_eq!(result, expected);
    }

    #[test]
    fn rook_on_corner_does_not_wrap() {
        // h1 east ray must stop at the board edge, not wrap onto a2.
        let result = rook_attacks(7, 0);
        assert_eq!(result.count_ones(), 14);
        assert_eq!(result & bit(8), 0);
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let blockers = bit(19) | bit(35) | bit(41) | bit(21);
        assert_eq!(
            queen_attacks(27, blockers),
            rook_attacks(27, blockers) | bishop_attacks(27, blockers)
        );
    }
}
