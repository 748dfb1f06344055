//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It owns the piece
//! bitboards, turn/state flags, clocks and the incremental position key. It is
//! mutated only by `apply_move` / `undo_move` in the move-generation layer.

use crate::errors::ChessError;
use crate::game_state::chess_types::*;
use crate::game_state::piece_set::{PieceSet, PieceSetViolation};
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    pub pieces: PieceSet,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Incremental hashing ---
    pub zobrist_key: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: PieceSet::empty(),
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
        }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl GameState {
    /// Empty board, white to move, no rights. Mostly useful for building test
    /// positions piece by piece.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard initial position.
    pub fn new_game() -> Self {
        let mut state = Self::default();
        for (file, piece) in BACK_RANK.into_iter().enumerate() {
            let file = file as Square;
            state.pieces.put(Color::White, piece, file);
            state.pieces.put(Color::White, PieceKind::Pawn, 8 + file);
            state.pieces.put(Color::Black, PieceKind::Pawn, 48 + file);
            state.pieces.put(Color::Black, piece, 56 + file);
        }
        state.castling_rights = CASTLE_ALL;
        state.refresh_zobrist_key();
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        self.pieces.piece_at(square)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces.king_square(color)
    }

    /// Recompute the position key from scratch.
    pub fn refresh_zobrist_key(&mut self) {
        self.zobrist_key = compute_zobrist_key(self);
    }

    /// Structural invariants plus consistency of the incremental key.
    pub fn validate(&self) -> Result<(), GameStateViolation> {
        self.pieces.validate()?;
        if let Some(ep) = self.en_passant_square {
            let expected_rank = match self.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if rank_of(ep) != expected_rank {
                return Err(GameStateViolation::EnPassantRank { square: ep });
            }
        }
        if self.zobrist_key != compute_zobrist_key(self) {
            return Err(GameStateViolation::StaleKey);
        }
        Ok(())
    }
}

/// A broken board invariant found by [`GameState::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameStateViolation {
    #[error(transparent)]
    Pieces(#[from] PieceSetViolation),
    #[error("en-passant target {square} is on the wrong rank")]
    EnPassantRank { square: Square },
    #[error("position key out of sync with board")]
    StaleKey,
}
