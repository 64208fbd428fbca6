/// Pops the least significant bit and returns its index.
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> u8 {
    let idx = bb.trailing_zeros() as u8;
    *bb &= *bb - 1;
    idx
}

#[inline(always)]
pub const fn square_index(rank: usize, file: usize) -> usize {
    rank * 8 + file
}
