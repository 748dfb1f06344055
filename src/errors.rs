//! Errors used throughout the chess engine.
//!
//! `ChessError` is the boundary error type. Its variants fall into two
//! classes:
//! - rejected input (bad notation, illegal moves, bad FEN, bad engine options,
//!   moves offered after the game ended). The caller re-prompts or skips the
//!   offending entry.
//! - internal faults (`Internal`). A core invariant broke. The fault carries
//!   the last valid position and the move being processed so the caller can
//!   print a meaningful diagnostic before abandoning the game.
//!
//! Running out of legal moves is not an error; it is reported as a
//! [`GameStatus`].

use thiserror::Error;

use crate::game_state::game_state::GameState;
use crate::move_generation::game_status::GameStatus;
use crate::move_generation::move_generator::MoveGenerationError;
use crate::moves::chess_move::Move;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("cannot parse move notation '{0}'")]
    InvalidNotation(String),

    #[error("illegal move '{notation}': {reason}")]
    IllegalMove { notation: String, reason: String },

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidOption { name: String, value: String },

    #[error("game is already over: {0}")]
    GameOver(GameStatus),

    #[error("internal fault: {0}")]
    Internal(Box<InternalFault>),
}

/// Context captured when a core invariant is found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail} (last valid position: {}{})", fen_of(.last_valid_state), failing_move_suffix(.failing_move))]
pub struct InternalFault {
    pub detail: String,
    pub last_valid_state: GameState,
    pub failing_move: Option<Move>,
}

fn fen_of(state: &GameState) -> String {
    state.get_fen()
}

fn failing_move_suffix(mv: &Option<Move>) -> String {
    match mv {
        Some(mv) => format!(", failing move: {mv}"),
        None => String::new(),
    }
}

impl ChessError {
    pub fn internal(
        detail: impl Into<String>,
        last_valid_state: &GameState,
        failing_move: Option<Move>,
    ) -> Self {
        ChessError::Internal(Box::new(InternalFault {
            detail: detail.into(),
            last_valid_state: last_valid_state.clone(),
            failing_move,
        }))
    }

    pub fn illegal(notation: impl Into<String>, reason: impl Into<String>) -> Self {
        ChessError::IllegalMove {
            notation: notation.into(),
            reason: reason.into(),
        }
    }

    /// True for faults that must end the game; false for rejected input.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, ChessError::Internal(_))
    }

    /// Attach position context to a move-generation failure.
    pub fn from_move_generation(
        err: MoveGenerationError,
        state: &GameState,
        failing_move: Option<Move>,
    ) -> Self {
        ChessError::internal(err.to_string(), state, failing_move)
    }
}

#[cfg(test)]
mod tests {
    use super::ChessError;
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::game_status::GameStatus;
    use crate::moves::chess_move::Move;

    #[test]
    fn input_errors_are_not_fatal() {
        assert!(!ChessError::InvalidNotation("zz".to_owned()).is_fatal());
        assert!(!ChessError::illegal("e2e5", "not a legal move").is_fatal());
        assert!(!ChessError::GameOver(GameStatus::Stalemate).is_fatal());
    }

    #[test]
    fn internal_fault_reports_position_and_move() {
        let state = GameState::new_game();
        let mv = Move::quiet(12, 20, PieceKind::Pawn);
        let err = ChessError::internal("white king missing", &state, Some(mv));

        assert!(err.is_fatal());
        let text = err.to_string();
        assert!(text.contains("white king missing"));
        assert!(text.contains("rnbqkbnr/pppppppp"));
        assert!(text.contains("failing move: e2e3"));
    }
}
