//! Pseudo-legal bishop move generation.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::generate_piece_moves;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    out: &mut Vec<Move>,
) {
    generate_piece_moves(game_state, PieceKind::Bishop, out, |from, occupied| {
        attacks.bishop_attacks(from, occupied)
    });
}
