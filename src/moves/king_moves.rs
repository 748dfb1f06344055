//! King attack bitboards.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::knight_moves::leaper_table;

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_STEPS);

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}
