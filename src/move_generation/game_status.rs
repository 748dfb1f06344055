//! Game-ending conditions derived from a position.
//!
//! Checkmate and stalemate depend on the legal move list; the draw rules here
//! (insufficient material, fifty-move) depend only on the board and clocks.
//! Threefold repetition needs history and is decided by the session.

use std::fmt;

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::regions::DARK_SQUARES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::attack_table::AttackTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub const fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::ThreefoldRepetition => "threefold repetition",
        };
        f.write_str(text)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { in_check: true } => f.write_str("in progress (check)"),
            GameStatus::InProgress { in_check: false } => f.write_str("in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner:?} wins"),
            GameStatus::Stalemate => f.write_str("stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}

#[inline]
pub fn is_in_check<A: AttackTable>(generator: &LegalMoveGenerator<A>, game_state: &GameState) -> bool {
    generator.is_in_check(game_state, game_state.side_to_move)
}

pub fn is_checkmate<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
) -> MoveGenResult<bool> {
    Ok(is_in_check(generator, game_state) && !has_legal_move(generator, game_state)?)
}

pub fn is_stalemate<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
) -> MoveGenResult<bool> {
    Ok(!is_in_check(generator, game_state) && !has_legal_move(generator, game_state)?)
}

fn has_legal_move<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
) -> MoveGenResult<bool> {
    let mut scratch = game_state.clone();
    Ok(!generator.legal_moves_in_place(&mut scratch)?.is_empty())
}

/// Neither side can ever deliver mate: bare kings, a single minor piece
/// against a bare king, or bishops only, all on squares of one color.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let pieces = &game_state.pieces;
    for color in Color::ALL {
        let heavy = pieces.pieces(color, PieceKind::Pawn)
            | pieces.pieces(color, PieceKind::Rook)
            | pieces.pieces(color, PieceKind::Queen);
        if heavy != 0 {
            return false;
        }
    }

    let knights = pieces.pieces(Color::White, PieceKind::Knight)
        | pieces.pieces(Color::Black, PieceKind::Knight);
    let bishops = pieces.pieces(Color::White, PieceKind::Bishop)
        | pieces.pieces(Color::Black, PieceKind::Bishop);
    let minors = knights.count_ones() + bishops.count_ones();

    if minors <= 1 {
        return true;
    }

    knights == 0 && (bishops & DARK_SQUARES == 0 || bishops & !DARK_SQUARES == 0)
}

#[inline]
pub fn is_fifty_move_draw(game_state: &GameState) -> bool {
    game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES
}

/// Classify the position. Only mate, stalemate and insufficient material end
/// the game here; the fifty-move rule and repetition are claimable draws and
/// are reported by [`claimable_draw`].
pub fn evaluate_status<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
) -> MoveGenResult<GameStatus> {
    let in_check = is_in_check(generator, game_state);
    if !has_legal_move(generator, game_state)? {
        return Ok(if in_check {
            GameStatus::Checkmate {
                winner: game_state.side_to_move.opposite(),
            }
        } else {
            GameStatus::Stalemate
        });
    }

    if is_insufficient_material(game_state) {
        return Ok(GameStatus::Draw(DrawReason::InsufficientMaterial));
    }

    Ok(GameStatus::InProgress { in_check })
}

/// Draw either player may claim in this position. Repetition needs history,
/// so the caller passes its own verdict in.
pub fn claimable_draw(game_state: &GameState, threefold_repetition: bool) -> Option<DrawReason> {
    if is_fifty_move_draw(game_state) {
        Some(DrawReason::FiftyMoveRule)
    } else if threefold_repetition {
        Some(DrawReason::ThreefoldRepetition)
    } else {
        None
    }
}
