//! Pseudo-legal rook move generation.
//!
//! Castling is emitted by the king generator; rook moves here only affect
//! castling rights through `apply_move`.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;

pub fn generate_rook_moves<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    out: &mut Vec<Move>,
) {
    generate_piece_moves(game_state, PieceKind::Rook, out, |from, occupied| {
        attacks.rook_attacks(from, occupied)
    });
}

#[cfg(test)]
mod tests {
    use super::generate_rook_moves;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::moves::attack_table::PrecomputedAttacks;

    #[test]
    fn rook_captures_first_blocker_only() {
        let game = GameState::from_fen("4k3/8/8/p7/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_moves(&PrecomputedAttacks, &game, &mut out);

        // a2..a5 up the file (capture on a5), b1..d1 along the rank.
        assert_eq!(out.len(), 7);
        let captures: Vec<_> = out.iter().filter(|mv| mv.is_capture()).collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, 32);
        assert_eq!(captures[0].captured, Some(PieceKind::Pawn));
    }
}
