//! Named board regions as bitboard masks.

use crate::game_state::chess_types::{Bitboard, Color};

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_C: Bitboard = FILE_A << 2;
pub const FILE_D: Bitboard = FILE_A << 3;
pub const FILE_E: Bitboard = FILE_A << 4;
pub const FILE_F: Bitboard = FILE_A << 5;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const RANK_1: Bitboard = 0xFF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

/// Dark squares (a1 is dark).
pub const DARK_SQUARES: Bitboard = 0xAA55_AA55_AA55_AA55;
pub const LIGHT_SQUARES: Bitboard = !DARK_SQUARES;

/// d4, e4, d5, e5.
pub const CENTER: Bitboard = (FILE_D | FILE_E) & (RANK_4 | RANK_5);
/// c3..f6 block.
pub const EXTENDED_CENTER: Bitboard =
    (FILE_C | FILE_D | FILE_E | FILE_F) & (RANK_3 | RANK_4 | RANK_5 | RANK_6);
pub const KINGSIDE: Bitboard = FILE_E | FILE_F | FILE_G | FILE_H;
pub const QUEENSIDE: Bitboard = FILE_A | FILE_B | FILE_C | FILE_D;

/// Rank pawns of `color` start on.
#[inline]
pub const fn pawn_start_rank(color: Color) -> Bitboard {
    match color {
        Color::White => RANK_2,
        Color::Black => RANK_7,
    }
}

/// Rank pawns of `color` promote on.
#[inline]
pub const fn promotion_rank(color: Color) -> Bitboard {
    match color {
        Color::White => RANK_8,
        Color::Black => RANK_1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_and_ranks_partition_the_board() {
        let files = [FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H];
        let ranks = [RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8];
        assert_eq!(files.iter().fold(0, |acc, f| acc | f), u64::MAX);
        assert_eq!(ranks.iter().fold(0, |acc, r| acc | r), u64::MAX);
        assert!(files.iter().all(|f| f.count_ones() == 8));
    }

    #[test]
    fn center_is_four_squares_and_a1_is_dark() {
        assert_eq!(CENTER.count_ones(), 4);
        assert_eq!(EXTENDED_CENTER.count_ones(), 16);
        assert_ne!(DARK_SQUARES & 1, 0);
        assert_eq!(DARK_SQUARES.count_ones(), 32);
    }

    #[test]
    fn halves_and_colours_split_the_board() {
        assert_eq!(KINGSIDE & QUEENSIDE, 0);
        assert_eq!(KINGSIDE | QUEENSIDE, u64::MAX);
        assert_eq!(LIGHT_SQUARES & DARK_SQUARES, 0);
        assert_eq!(LIGHT_SQUARES.count_ones(), 32);
    }

    #[test]
    fn pawn_ranks_mirror_by_colour() {
        assert_eq!(pawn_start_rank(Color::White), RANK_2);
        assert_eq!(pawn_start_rank(Color::Black), RANK_7);
        assert_eq!(promotion_rank(Color::White), RANK_8);
        assert_eq!(promotion_rank(Color::Black), RANK_1);
    }
}
