//! Pawn capture and push masks.
//!
//! Captures and pushes are different sets: a pawn attacks diagonally forward
//! but moves straight forward, and only the push mask includes the two-square
//! advance from the starting rank. Push masks ignore occupancy; the generator
//! applies the blocked-by-any-piece rule.

use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::knight_moves::leaper_table;

pub const WHITE_PAWN_ATTACKS: [Bitboard; 64] = leaper_table(&[(-1, 1), (1, 1)]);
pub const BLACK_PAWN_ATTACKS: [Bitboard; 64] = leaper_table(&[(-1, -1), (1, -1)]);
pub const WHITE_PAWN_PUSHES: [Bitboard; 64] = push_table(1, 1);
pub const BLACK_PAWN_PUSHES: [Bitboard; 64] = push_table(-1, 6);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

#[inline]
pub const fn pawn_pushes(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_PUSHES[square as usize],
        Color::Black => BLACK_PAWN_PUSHES[square as usize],
    }
}

/// One step toward `direction` (+1 up the board, -1 down), two from
/// `start_rank`.
const fn push_table(direction: i32, start_rank: i32) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0i32;

    while sq < 64 {
        let rank = sq / 8;
        let one = rank + direction;
        if one >= 0 && one < 8 {
            let mut pushes = 1u64 << (sq + 8 * direction);
            if rank == start_rank {
                pushes |= 1u64 << (sq + 16 * direction);
            }
            table[sq as usize] = pushes;
        }
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{pawn_attacks, pawn_pushes, BLACK_PAWN_ATTACKS, WHITE_PAWN_ATTACKS};
    use crate::game_state::chess_types::Color;

    #[test]
    fn white_pawn_attacks_from_e2() {
        let e2 = 12u8;
        let expected = (1u64 << 19) | (1u64 << 21);
        assert_eq!(WHITE_PAWN_ATTACKS[e2 as usize], expected);
        assert_eq!(pawn_attacks(Color::White, e2), expected);
    }

    #[test]
    fn black_pawn_attacks_from_e7() {
        let e7 = 52u8;
        let expected = (1u64 << 43) | (1u64 << 45);
        assert_eq!(BLACK_PAWN_ATTACKS[e7 as usize], expected);
        assert_eq!(pawn_attacks(Color::Black, e7), expected);
    }

    #[test]
    fn edge_pawns_attack_one_square() {
        assert_eq!(pawn_attacks(Color::White, 8).count_ones(), 1);
        assert_eq!(pawn_attacks(Color::Black, 55).count_ones(), 1);
    }

    #[test]
    fn double_push_only_from_start_rank() {
        let e2 = 12u8;
        let e3 = 20u8;
        assert_eq!(pawn_pushes(Color::White, e2), (1u64 << 20) | (1u64 << 28));
        assert_eq!(pawn_pushes(Color::White, e3), 1u64 << 28);
        assert_eq!(pawn_pushes(Color::Black, 52), (1u64 << 44) | (1u64 << 36));
        assert_eq!(pawn_pushes(Color::Black, 44), 1u64 << 36);
    }

    #[test]
    fn pushes_and_attacks_are_disjoint() {
        for sq in 0..64u8 {
            for color in Color::ALL {
                assert_eq!(pawn_pushes(color, sq) & pawn_attacks(color, sq), 0);
            }
        }
    }
}
