use crate::game_state::chess_types::{Bitboard, Square};

pub const KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_JUMPS);

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// Attack table for a piece that jumps by fixed `(file, rank)` offsets.
/// Offsets that would leave the board are dropped, so nothing wraps.
pub(crate) const fn leaper_table(steps: &[(i32, i32)]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < steps.len() {
            let (df, dr) = steps[i];
            let (to_file, to_rank) = (file + df, rank + dr);
            if to_file >= 0 && to_file < 8 && to_rank >= 0 && to_rank < 8 {
                attacks |= 1u64 << (to_rank * 8 + to_file);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, KNIGHT_ATTACKS};

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = 27u8;
        assert_eq!(KNIGHT_ATTACKS[d4 as usize].count_ones(), 8);
        assert_eq!(knight_attacks(d4).count_ones(), 8);
    }

    #[test]
    fn knight_in_corner_does_not_wrap() {
        let h1 = 7u8;
        let expected = (1u64 << 13) | (1u64 << 22);
        assert_eq!(knight_attacks(h1), expected);
    }
}
