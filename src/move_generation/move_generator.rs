use thiserror::Error;

use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("move generation is not implemented")]
    NotImplemented,
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

/// Produces the legal moves of the side to move.
///
/// Output order must be deterministic for a given position; search
/// tie-breaking and test expectations depend on it.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<Move>>;
}

pub struct NullMoveGenerator;

impl MoveGenerator for NullMoveGenerator {
    fn generate_legal_moves(&self, _game_state: &GameState) -> MoveGenResult<Vec<Move>> {
        Err(MoveGenerationError::NotImplemented)
    }
}
