//! Coordinate notation (`e2e4`, `e7e8q`).
//!
//! Parsing never builds a move from the text alone; the squares and
//! promotion piece are matched against the legal moves of the position, so a
//! successful parse is always playable.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Coordinate text for `mv`. Same as its `Display` form.
#[inline]
pub fn move_to_long_algebraic(mv: &Move) -> String {
    mv.to_string()
}

/// Find the legal move written as `text`.
///
/// Malformed text yields `InvalidNotation`; well-formed text that names no
/// legal move yields `IllegalMove`.
pub fn parse_long_algebraic(text: &str, legal_moves: &[Move]) -> ChessResult<Move> {
    let trimmed = text.trim();
    if !trimmed.is_ascii() || !(4..=5).contains(&trimmed.len()) {
        return Err(ChessError::InvalidNotation(text.to_owned()));
    }

    let from = algebraic_to_square(&trimmed[0..2])
        .map_err(|_| ChessError::InvalidNotation(text.to_owned()))?;
    let to = algebraic_to_square(&trimmed[2..4])
        .map_err(|_| ChessError::InvalidNotation(text.to_owned()))?;
    let promotion = match trimmed[4..].chars().next() {
        None => None,
        Some(ch) => match PieceKind::from_letter(ch) {
            Some(piece) if PieceKind::PROMOTIONS.contains(&piece) => Some(piece),
            _ => return Err(ChessError::InvalidNotation(text.to_owned())),
        },
    };

    legal_moves
        .iter()
        .copied()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion() == promotion)
        .ok_or_else(|| ChessError::illegal(trimmed, "not a legal move in this position"))
}
