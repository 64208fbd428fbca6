/// King attack sets for every square (adjacent squares only, no castling).
pub const KING_ATTACKS: [u64; 64] = {
    let mut table = [0u64; 64];
    let mut sq = 0;
    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8;
        let mut df = -1;
        while df <= 1 {
            let mut dr = -1;
            while dr <= 1 {
                let f = file + df;
                let r = rank + dr;
                if (df != 0 || dr != 0) && f >= 0 && f < 8 && r >= 0 && r < 8 {
                    table[sq] |= 1u64 << (r * 8 + f);
                }
                dr += 1;
            }
            df += 1;
        }
        sq += 1;
    }
    table
};
