//! Full legal move generation pipeline.
//!
//! Pseudo-legal moves are produced piece by piece (pawn, knight, bishop, rook,
//! queen, king; origins and targets in ascending square order), then each
//! candidate is played on a scratch position and dropped if it leaves the
//! mover's king attacked.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError, MoveGenerator};
use crate::moves::attack_table::{AttackTable, PrecomputedAttacks};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct LegalMoveGenerator<A: AttackTable = PrecomputedAttacks> {
    attacks: A,
}

impl<A: AttackTable> LegalMoveGenerator<A> {
    pub fn new(attacks: A) -> Self {
        Self { attacks }
    }

    #[inline]
    pub fn attacks(&self) -> &A {
        &self.attacks
    }

    /// Every move obeying piece movement rules, king safety not yet checked.
    pub fn pseudo_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        let mut pseudo = Vec::<Move>::with_capacity(64);
        generate_pawn_moves(&self.attacks, game_state, &mut pseudo);
        generate_knight_moves(&self.attacks, game_state, &mut pseudo);
        generate_bishop_moves(&self.attacks, game_state, &mut pseudo);
        generate_rook_moves(&self.attacks, game_state, &mut pseudo);
        generate_queen_moves(&self.attacks, game_state, &mut pseudo);
        generate_king_moves(&self.attacks, game_state, &mut pseudo);
        pseudo
    }

    /// Legal moves computed by playing each candidate on `scratch` and taking
    /// it back. `scratch` is left exactly as it was passed in.
    pub fn legal_moves_in_place(&self, scratch: &mut GameState) -> MoveGenResult<Vec<Move>> {
        let mover = scratch.side_to_move;
        if scratch.king_square(mover).is_none() {
            return Err(MoveGenerationError::InvalidState(format!(
                "{mover:?} to move without a king"
            )));
        }
        let pseudo = self.pseudo_legal_moves(scratch);
        let mut legal = Vec::<Move>::with_capacity(pseudo.len());

        for mv in pseudo {
            let record = apply_move(scratch, mv).map_err(|err| {
                MoveGenerationError::InvalidState(format!("generated move {mv} did not apply: {err}"))
            })?;
            let exposes_king = is_king_in_check(&self.attacks, scratch, mover);
            undo_move(scratch, &record);

            if !exposes_king? {
                legal.push(mv);
            }
        }

        Ok(legal)
    }

    /// False for a side without a king; generation reports that position as
    /// invalid.
    #[inline]
    pub fn is_in_check(&self, game_state: &GameState, color: Color) -> bool {
        matches!(is_king_in_check(&self.attacks, game_state, color), Ok(true))
    }
}

impl<A: AttackTable> MoveGenerator for LegalMoveGenerator<A> {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<Move>> {
        let mut scratch = game_state.clone();
        self.legal_moves_in_place(&mut scratch)
    }
}
