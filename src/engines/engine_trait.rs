//! Engine abstraction used by the game session.
//!
//! Defines the per-move constraints handed to an engine and the selection it
//! returns, so different strategies can be swapped at runtime behind a single
//! trait object.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::game_status::GameStatus;
use crate::moves::chess_move::Move;

/// Per-call search limits. Unset fields fall back to the engine's own
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConstraints {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub white_time_ms: Option<u64>,
    pub black_time_ms: Option<u64>,
    pub white_increment_ms: Option<u64>,
    pub black_increment_ms: Option<u64>,
    pub moves_to_go: Option<u16>,
    pub nodes: Option<u64>,
}

impl SearchConstraints {
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }

    pub fn movetime(movetime_ms: u64) -> Self {
        Self {
            movetime_ms: Some(movetime_ms),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSelection {
    Play {
        mv: Move,
        score: i32,
        depth: u8,
        nodes: u64,
    },
    /// The side to move has no legal move.
    GameOver(GameStatus),
}

impl MoveSelection {
    #[inline]
    pub fn chosen_move(&self) -> Option<Move> {
        match self {
            MoveSelection::Play { mv, .. } => Some(*mv),
            MoveSelection::GameOver(_) => None,
        }
    }
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        Err(ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Choose a move for the side to move. `history` holds the position keys
    /// of earlier positions in the game, oldest first.
    fn select_move_with_history(
        &mut self,
        game_state: &GameState,
        history: &[u64],
        constraints: &SearchConstraints,
    ) -> ChessResult<MoveSelection>;

    fn select_move(
        &mut self,
        game_state: &GameState,
        constraints: &SearchConstraints,
    ) -> ChessResult<MoveSelection> {
        self.select_move_with_history(game_state, &[], constraints)
    }
}
