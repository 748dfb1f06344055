//! Canonical chess-rule constants.
//!
//! Starting position, the fixed king/rook squares involved in castling, and
//! the clock thresholds used by the draw rules.

use crate::game_state::chess_types::{
    CastlingRights, Square, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which a draw may be claimed.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Number of occurrences of one position that allows a repetition claim.
pub const REPETITION_CLAIM_COUNT: usize = 3;

/// Fixed geometry of one castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingPath {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares that must be empty (between king and rook).
    pub empty_mask: u64,
    /// Squares the king stands on, crosses, or lands on.
    pub king_path_mask: u64,
}

pub const WHITE_KINGSIDE: CastlingPath = CastlingPath {
    right: CASTLE_WHITE_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    empty_mask: (1 << 5) | (1 << 6),
    king_path_mask: (1 << 4) | (1 << 5) | (1 << 6),
};

pub const WHITE_QUEENSIDE: CastlingPath = CastlingPath {
    right: CASTLE_WHITE_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    empty_mask: (1 << 1) | (1 << 2) | (1 << 3),
    king_path_mask: (1 << 4) | (1 << 3) | (1 << 2),
};

pub const BLACK_KINGSIDE: CastlingPath = CastlingPath {
    right: CASTLE_BLACK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    empty_mask: (1 << 61) | (1 << 62),
    king_path_mask: (1 << 60) | (1 << 61) | (1 << 62),
};

pub const BLACK_QUEENSIDE: CastlingPath = CastlingPath {
    right: CASTLE_BLACK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    empty_mask: (1 << 57) | (1 << 58) | (1 << 59),
    king_path_mask: (1 << 60) | (1 << 59) | (1 << 58),
};

/// Castling right lost when a piece leaves or is captured on `square`.
#[inline]
pub const fn rights_cleared_by_square(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
