//! Attack and check queries over a position.
//!
//! `is_square_attacked` works backwards from the target square (a knight on
//! `sq` attacks exactly the squares a knight on those squares would attack),
//! which keeps the common question "is this square safe" cheap. The full
//! union of attacked squares is available too for callers that want it.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::attack_table::AttackTable;

/// Whether `color`'s king is attacked. A position without that king breaks
/// the one-king invariant and is reported instead of being treated as safe.
#[inline]
pub fn is_king_in_check<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    color: Color,
) -> MoveGenResult<bool> {
    let king_sq = game_state
        .king_square(color)
        .ok_or_else(|| MoveGenerationError::InvalidState(format!("{color:?} king is missing")))?;
    Ok(is_square_attacked(attacks, game_state, king_sq, color.opposite()))
}

pub fn is_square_attacked<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> bool {
    let pieces = &game_state.pieces;
    let occupied = pieces.occupied();

    // A pawn of `attacker_color` attacks `square` iff a pawn of the other
    // color on `square` would attack the pawn's square.
    if attacks.pawn_attacks(attacker_color.opposite(), square)
        & pieces.pieces(attacker_color, PieceKind::Pawn)
        != 0
    {
        return true;
    }

    if attacks.knight_attacks(square) & pieces.pieces(attacker_color, PieceKind::Knight) != 0 {
        return true;
    }

    if attacks.king_attacks(square) & pieces.pieces(attacker_color, PieceKind::King) != 0 {
        return true;
    }

    let queens = pieces.pieces(attacker_color, PieceKind::Queen);
    let bishops_queens = pieces.pieces(attacker_color, PieceKind::Bishop) | queens;
    if attacks.bishop_attacks(square, occupied) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = pieces.pieces(attacker_color, PieceKind::Rook) | queens;
    attacks.rook_attacks(square, occupied) & rooks_queens != 0
}

/// Union of every square attacked by `attacker_color` under the current
/// occupancy.
pub fn attacked_squares<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    attacker_color: Color,
) -> Bitboard {
    let occupied = game_state.pieces.occupied();
    let mut union = 0u64;

    for piece in PieceKind::ALL {
        let mut origins = game_state.pieces.pieces(attacker_color, piece);
        while origins != 0 {
            let from = origins.trailing_zeros() as Square;
            union |= attacks.attacks_from(piece, attacker_color, from, occupied);
            origins &= origins - 1;
        }
    }

    union
}

/// Every `(square, piece)` of `attacker_color` that attacks `square`.
pub fn attackers_to_square<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let target_mask = square_bit(square);
    let occupied = game_state.pieces.occupied();
    let mut attackers = Vec::<(Square, PieceKind)>::new();

    for piece in PieceKind::ALL {
        let mut origins = game_state.pieces.pieces(attacker_color, piece);
        while origins != 0 {
            let from = origins.trailing_zeros() as Square;
            if attacks.attacks_from(piece, attacker_color, from, occupied) & target_mask != 0 {
                attackers.push((from, piece));
            }
            origins &= origins - 1;
        }
    }

    attackers
}

#[cfg(test)]
mod tests {
    use super::{attacked_squares, attackers_to_square, is_king_in_check, is_square_attacked};
    use crate::game_state::chess_types::{square_bit, Color, PieceKind};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::move_generator::MoveGenerationError;
    use crate::moves::attack_table::PrecomputedAttacks;

    #[test]
    fn reverse_lookup_agrees_with_attack_union() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        let table = PrecomputedAttacks;

        for fen in fens {
            let game = GameState::from_fen(fen).expect("FEN should parse");
            for color in Color::ALL {
                let union = attacked_squares(&table, &game, color);
                for sq in 0..64u8 {
                    assert_eq!(
                        is_square_attacked(&table, &game, sq, color),
                        union & square_bit(sq) != 0,
                        "{fen}: square {sq} by {color:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn queen_on_h5_does_not_check_e8_through_f7() {
        let game = GameState::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p2Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
        )
        .expect("FEN should parse");
        let table = PrecomputedAttacks;

        assert_eq!(is_king_in_check(&table, &game, Color::Black), Ok(false));
        assert!(is_square_attacked(&table, &game, 53, Color::White));
        assert_eq!(
            attackers_to_square(&table, &game, 53, Color::White),
            vec![(39, PieceKind::Queen)]
        );
    }

    #[test]
    fn missing_king_is_reported_not_safe() {
        let mut game = GameState::new_game();
        game.pieces.remove(Color::White, PieceKind::King, 4);
        assert!(matches!(
            is_king_in_check(&PrecomputedAttacks, &game, Color::White),
            Err(MoveGenerationError::InvalidState(_))
        ));
        assert_eq!(is_king_in_check(&PrecomputedAttacks, &game, Color::Black), Ok(false));
    }
}
