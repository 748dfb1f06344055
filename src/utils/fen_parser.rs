//! FEN-to-GameState parser.
//!
//! Builds a fully populated state (pieces, rights, clocks, position key) from
//! a Forsyth-Edwards Notation string and rejects positions the engine cannot
//! play from: a missing or doubled king, pawns on the first or last rank, an
//! en-passant target that no double push could have produced, or the side not
//! to move in check.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::regions::{RANK_1, RANK_8};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::attack_table::PrecomputedAttacks;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional; many tools omit them.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(format!("fullmove number '{fullmove_part}'")))?
        .max(1);

    validate_position(&game_state)?;
    game_state.refresh_zobrist_key();

    Ok(game_state)
}

fn invalid(detail: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(detail.into())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = (7 - fen_rank_idx) as Square;
        let mut file: Square = 0;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("empty-square count '{ch}'")));
                }
                file += empty_count as Square;
                if file > 8 {
                    return Err(invalid(format!("rank '{rank_str}' has too many files")));
                }
                continue;
            }

            let piece = PieceKind::from_letter(ch)
                .ok_or_else(|| invalid(format!("piece character '{ch}'")))?;
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };

            if file >= 8 {
                return Err(invalid(format!("rank '{rank_str}' has too many files")));
            }

            game_state.pieces.put(color, piece, board_rank * 8 + file);
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not cover 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(format!("castling rights character '{ch}'"))),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(format!("en-passant square '{en_passant_part}'")))
}

fn validate_position(game_state: &GameState) -> ChessResult<()> {
    for color in Color::ALL {
        let kings = game_state.pieces.pieces(color, PieceKind::King).count_ones();
        if kings != 1 {
            return Err(invalid(format!("{color:?} has {kings} kings")));
        }
    }

    let pawns = game_state.pieces.pieces(Color::White, PieceKind::Pawn)
        | game_state.pieces.pieces(Color::Black, PieceKind::Pawn);
    if pawns & (RANK_1 | RANK_8) != 0 {
        return Err(invalid("pawn on the first or last rank"));
    }

    if let Some(ep) = game_state.en_passant_square {
        let expected_rank = match game_state.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        if rank_of(ep) != expected_rank {
            return Err(invalid(format!("en-passant square {ep} on the wrong rank")));
        }

        // The pawn that just double-pushed stands in front of the target, and
        // both the target and the square it left must be empty.
        let mover = game_state.side_to_move;
        let (victim, origin) = match mover {
            Color::White => (ep - 8, ep + 8),
            Color::Black => (ep + 8, ep - 8),
        };
        let pieces = &game_state.pieces;
        if pieces.occupied() & (square_bit(ep) | square_bit(origin)) != 0 {
            return Err(invalid(format!("en-passant square {ep} does not follow a double push")));
        }
        if pieces.piece_for_color(mover.opposite(), victim) != Some(PieceKind::Pawn) {
            return Err(invalid(format!("no pawn to capture en passant on {victim}")));
        }
    }

    let waiting = game_state.side_to_move.opposite();
    let waiting_in_check = is_king_in_check(&PrecomputedAttacks, game_state, waiting)
        .map_err(|err| invalid(err.to_string()))?;
    if waiting_in_check {
        return Err(invalid(format!("{waiting:?} is in check but not to move")));
    }

    Ok(())
}
