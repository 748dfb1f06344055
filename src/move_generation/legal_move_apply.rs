//! Make/unmake of a single move on a `GameState`.
//!
//! `apply_move` validates the move against the board before touching it, so a
//! rejected move leaves the state unchanged. The returned `UndoRecord` holds
//! everything `undo_move` needs to restore the previous position bit for bit.

use crate::game_state::chess_rules::{
    rights_cleared_by_square, CastlingPath, BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE,
    WHITE_QUEENSIDE,
};
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoRecord};
use crate::move_generation::legal_moves_pawn::en_passant_victim_square;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::chess_move::{Move, SpecialMove};
use crate::search::zobrist::{castling_key, en_passant_key, piece_square_key, side_to_move_key};

pub fn apply_move(game_state: &mut GameState, mv: Move) -> MoveGenResult<UndoRecord> {
    let mover = game_state.side_to_move;
    let enemy = mover.opposite();
    let capture_square = validate_move_against_board(game_state, mv)?;

    let record = UndoRecord {
        mv,
        captured_piece: mv.captured,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
    };

    let mut key = game_state.zobrist_key;

    // Lift the mover, then clear whatever it captures, then place it.
    game_state.pieces.remove(mover, mv.piece, mv.from);
    key ^= piece_square_key(mover, mv.piece, mv.from);

    if let (Some(captured), Some(square)) = (mv.captured, capture_square) {
        game_state.pieces.remove(enemy, captured, square);
        key ^= piece_square_key(enemy, captured, square);
    }

    let placed = mv.piece_after();
    game_state.pieces.put(mover, placed, mv.to);
    key ^= piece_square_key(mover, placed, mv.to);

    if let Some(path) = castling_path(mover, mv.special) {
        game_state.pieces.remove(mover, PieceKind::Rook, path.rook_from);
        game_state.pieces.put(mover, PieceKind::Rook, path.rook_to);
        key ^= piece_square_key(mover, PieceKind::Rook, path.rook_from);
        key ^= piece_square_key(mover, PieceKind::Rook, path.rook_to);
    }

    let rights = game_state.castling_rights
        & !(rights_cleared_by_square(mv.from) | rights_cleared_by_square(mv.to));
    key ^= castling_key(game_state.castling_rights) ^ castling_key(rights);
    game_state.castling_rights = rights;

    if let Some(ep) = game_state.en_passant_square {
        key ^= en_passant_key(ep);
    }
    game_state.en_passant_square = if mv.special == SpecialMove::DoublePawnPush {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };
    if let Some(ep) = game_state.en_passant_square {
        key ^= en_passant_key(ep);
    }

    if mv.is_irreversible() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if mover == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = enemy;
    key ^= side_to_move_key();
    game_state.zobrist_key = key;

    Ok(record)
}

/// Reverse a move previously returned by [`apply_move`] on this state.
pub fn undo_move(game_state: &mut GameState, record: &UndoRecord) {
    let mv = record.mv;
    let mover = game_state.side_to_move.opposite();
    let enemy = game_state.side_to_move;

    game_state.pieces.remove(mover, mv.piece_after(), mv.to);
    game_state.pieces.put(mover, mv.piece, mv.from);

    if let Some(path) = castling_path(mover, mv.special) {
        game_state.pieces.remove(mover, PieceKind::Rook, path.rook_to);
        game_state.pieces.put(mover, PieceKind::Rook, path.rook_from);
    }

    if let Some(captured) = record.captured_piece {
        let square = if mv.special == SpecialMove::EnPassant {
            en_passant_victim_square(mover, mv.to)
        } else {
            mv.to
        };
        game_state.pieces.put(enemy, captured, square);
    }

    game_state.side_to_move = mover;
    game_state.castling_rights = record.prev_castling_rights;
    game_state.en_passant_square = record.prev_en_passant_square;
    game_state.halfmove_clock = record.prev_halfmove_clock;
    game_state.fullmove_number = record.prev_fullmove_number;
    game_state.zobrist_key = record.prev_zobrist_key;
}

/// Functional form: the successor position plus the record that reverses it.
pub fn apply_move_copy(game_state: &GameState, mv: Move) -> MoveGenResult<(GameState, UndoRecord)> {
    let mut next = game_state.clone();
    let record = apply_move(&mut next, mv)?;
    Ok((next, record))
}

#[inline]
fn castling_path(mover: Color, special: SpecialMove) -> Option<CastlingPath> {
    match (mover, special) {
        (Color::White, SpecialMove::CastleKingSide) => Some(WHITE_KINGSIDE),
        (Color::White, SpecialMove::CastleQueenSide) => Some(WHITE_QUEENSIDE),
        (Color::Black, SpecialMove::CastleKingSide) => Some(BLACK_KINGSIDE),
        (Color::Black, SpecialMove::CastleQueenSide) => Some(BLACK_QUEENSIDE),
        _ => None,
    }
}

/// Check the move describes the board it is applied to. Returns the square of
/// the captured piece, if any.
fn validate_move_against_board(game_state: &GameState, mv: Move) -> MoveGenResult<Option<Square>> {
    let mover = game_state.side_to_move;
    let enemy = mover.opposite();
    let pieces = &game_state.pieces;

    if mv.from > 63 || mv.to > 63 || mv.from == mv.to {
        return Err(MoveGenerationError::InvalidState(format!(
            "move {mv} has invalid squares"
        )));
    }

    if pieces.piece_for_color(mover, mv.from) != Some(mv.piece) {
        return Err(MoveGenerationError::InvalidState(format!(
            "no {mover:?} {:?} on from-square of {mv}",
            mv.piece
        )));
    }

    if pieces.occupancy(mover) & square_bit(mv.to) != 0 {
        return Err(MoveGenerationError::InvalidState(format!(
            "{mv} lands on a friendly piece"
        )));
    }

    if let Some(path) = castling_path(mover, mv.special) {
        if mv.piece != PieceKind::King || mv.from != path.king_from || mv.to != path.king_to {
            return Err(MoveGenerationError::InvalidState(format!(
                "{mv} is not a castling move"
            )));
        }
        if pieces.pieces(mover, PieceKind::Rook) & square_bit(path.rook_from) == 0 {
            return Err(MoveGenerationError::InvalidState(format!(
                "castling rook missing for {mv}"
            )));
        }
    }

    if let SpecialMove::Promotion(piece) = mv.special {
        if mv.piece != PieceKind::Pawn || matches!(piece, PieceKind::Pawn | PieceKind::King) {
            return Err(MoveGenerationError::InvalidState(format!(
                "{mv} has an invalid promotion"
            )));
        }
    }

    let capture_square = if mv.special == SpecialMove::EnPassant {
        if game_state.en_passant_square != Some(mv.to) {
            return Err(MoveGenerationError::InvalidState(format!(
                "{mv} does not land on the en-passant target"
            )));
        }
        if mv.piece != PieceKind::Pawn || pieces.occupied() & square_bit(mv.to) != 0 {
            return Err(MoveGenerationError::InvalidState(format!(
                "{mv} is not an en-passant capture onto an empty square"
            )));
        }
        Some(en_passant_victim_square(mover, mv.to))
    } else {
        Some(mv.to)
    };

    let found = capture_square.and_then(|sq| pieces.piece_for_color(enemy, sq));
    if found != mv.captured {
        return Err(MoveGenerationError::InvalidState(format!(
            "{mv} expects capture {:?} but board holds {found:?}",
            mv.captured
        )));
    }
    if found == Some(PieceKind::King) {
        return Err(MoveGenerationError::InvalidState(format!(
            "{mv} captures the king"
        )));
    }

    Ok(mv.captured.and(capture_square))
}

#[cfg(test)]
mod tests {
    use super::{apply_move, apply_move_copy, undo_move};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::{Move, SpecialMove};

    fn fen(text: &str) -> GameState {
        GameState::from_fen(text).expect("FEN should parse")
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut game = GameState::new_game();
        let mv = Move::new(12, 28, PieceKind::Pawn, None, SpecialMove::DoublePawnPush);
        apply_move(&mut game, mv).expect("move should apply");

        assert_eq!(game.en_passant_square, Some(20));
        assert_eq!(game.side_to_move, Color::Black);
        assert_eq!(game.halfmove_clock, 0);
        assert_eq!(game.fullmove_number, 1);
        assert!(game.validate().is_ok());
    }

    #[test]
    fn en_passant_removes_pawn_from_its_own_square() {
        let before = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let mut game = before.clone();
        let mv = Move::new(36, 43, PieceKind::Pawn, Some(PieceKind::Pawn), SpecialMove::EnPassant);
        let record = apply_move(&mut game, mv).expect("en passant should apply");

        assert_eq!(game.piece_at(35), None, "captured pawn removed from d5");
        assert_eq!(game.piece_at(43), Some((Color::White, PieceKind::Pawn)));
        assert_eq!(game.pieces.pieces(Color::Black, PieceKind::Pawn), 0);
        assert!(game.validate().is_ok());

        undo_move(&mut game, &record);
        assert_eq!(game, before);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let before = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
        let mut game = before.clone();
        let mv = Move::new(4, 6, PieceKind::King, None, SpecialMove::CastleKingSide);
        let record = apply_move(&mut game, mv).expect("castle should apply");

        assert_eq!(game.piece_at(5), Some((Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_at(7), None);
        assert_eq!(game.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(game.halfmove_clock, 4);
        assert!(game.validate().is_ok());

        undo_move(&mut game, &record);
        assert_eq!(game, before);
    }

    #[test]
    fn capturing_a_rook_removes_opponent_right() {
        let mut game = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let mv = Move::new(0, 56, PieceKind::Rook, Some(PieceKind::Rook), SpecialMove::Normal);
        apply_move(&mut game, mv).expect("capture should apply");
        assert_eq!(game.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_KINGSIDE);
    }

    #[test]
    fn promotion_places_new_piece_and_undo_restores_pawn() {
        let before = fen("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let mv = Move::new(
            49,
            56,
            PieceKind::Pawn,
            Some(PieceKind::Rook),
            SpecialMove::Promotion(PieceKind::Knight),
        );
        let (after, record) = apply_move_copy(&before, mv).expect("promotion should apply");

        assert_eq!(after.piece_at(56), Some((Color::White, PieceKind::Knight)));
        assert_eq!(after.pieces.pieces(Color::White, PieceKind::Pawn), 0);
        assert_eq!(after.pieces.pieces(Color::Black, PieceKind::Rook), 0);
        assert!(after.validate().is_ok());

        let mut restored = after;
        undo_move(&mut restored, &record);
        assert_eq!(restored, before);
    }

    #[test]
    fn mismatched_move_is_rejected_without_mutation() {
        let mut game = GameState::new_game();
        let before = game.clone();

        let wrong_piece = Move::quiet(12, 20, PieceKind::Knight);
        assert!(apply_move(&mut game, wrong_piece).is_err());

        let onto_own_piece = Move::quiet(0, 8, PieceKind::Rook);
        assert!(apply_move(&mut game, onto_own_piece).is_err());

        let phantom_capture = Move::new(12, 20, PieceKind::Pawn, Some(PieceKind::Pawn), SpecialMove::Normal);
        assert!(apply_move(&mut game, phantom_capture).is_err());

        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_onto_occupied_target_is_rejected() {
        let mut game = fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - - 0 1");
        game.en_passant_square = Some(43);
        let before = game.clone();

        let mv = Move::new(36, 43, PieceKind::Pawn, Some(PieceKind::Pawn), SpecialMove::EnPassant);
        assert!(apply_move(&mut game, mv).is_err());
        assert_eq!(game, before, "rejected move must not touch the board");
    }
}
