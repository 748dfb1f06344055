//! King steps and castling.
//!
//! Castling is only emitted when the right is held, the king and rook stand
//! on their original squares, every square between them is empty, and none
//! of the squares the king starts on, crosses, or lands on is attacked.

use crate::game_state::chess_rules::{
    CastlingPath, BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE, WHITE_QUEENSIDE,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, SpecialMove};

pub fn generate_king_moves<A: AttackTable>(attacks: &A, game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let Some(from) = game_state.king_square(side) else {
        return;
    };

    let targets = attacks.king_attacks(from) & !game_state.pieces.occupancy(side);
    push_targets(game_state, from, PieceKind::King, targets, out);

    generate_castling_moves(attacks, game_state, out);
}

fn generate_castling_moves<A: AttackTable>(attacks: &A, game_state: &GameState, out: &mut Vec<Move>) {
    let (kingside, queenside) = match game_state.side_to_move {
        Color::White => (WHITE_KINGSIDE, WHITE_QUEENSIDE),
        Color::Black => (BLACK_KINGSIDE, BLACK_QUEENSIDE),
    };

    if can_castle(attacks, game_state, &kingside) {
        out.push(Move::new(
            kingside.king_from,
            kingside.king_to,
            PieceKind::King,
            None,
            SpecialMove::CastleKingSide,
        ));
    }
    if can_castle(attacks, game_state, &queenside) {
        out.push(Move::new(
            queenside.king_from,
            queenside.king_to,
            PieceKind::King,
            None,
            SpecialMove::CastleQueenSide,
        ));
    }
}

pub fn can_castle<A: AttackTable>(attacks: &A, game_state: &GameState, path: &CastlingPath) -> bool {
    let side = game_state.side_to_move;

    if game_state.castling_rights & path.right == 0 {
        return false;
    }
    if game_state.pieces.pieces(side, PieceKind::King) & square_bit(path.king_from) == 0
        || game_state.pieces.pieces(side, PieceKind::Rook) & square_bit(path.rook_from) == 0
    {
        return false;
    }
    if game_state.pieces.occupied() & path.empty_mask != 0 {
        return false;
    }

    let enemy = side.opposite();
    let mut king_path = path.king_path_mask;
    while king_path != 0 {
        let sq = king_path.trailing_zeros() as Square;
        if is_square_attacked(attacks, game_state, sq, enemy) {
            return false;
        }
        king_path &= king_path - 1;
    }

    true
}
