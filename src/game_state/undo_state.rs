use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;

/// Pre-move state needed to reverse one `apply_move` exactly.
///
/// Castling rights, the en-passant target and the clocks cannot be recomputed
/// from the board after the fact, so they are captured here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    pub mv: Move,
    pub captured_piece: Option<PieceKind>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}
