use crate::board::Color;

const fn build_pawn_attacks(forward: i8) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8 + forward;
        if rank >= 0 && rank < 8 {
            if file > 0 {
                table[sq] |= 1u64 << (rank * 8 + file - 1);
            }
            if file < 7 {
                table[sq] |= 1u64 << (rank * 8 + file + 1);
            }
        }
        sq += 1;
    }
    table
}

/// Diagonal capture squares of a white pawn standing on each square.
pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_pawn_attacks(1);
/// Diagonal capture squares of a black pawn standing on each square.
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_pawn_attacks(-1);

#[inline(always)]
pub fn pawn_attacks(square: u8, color: Color) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}
