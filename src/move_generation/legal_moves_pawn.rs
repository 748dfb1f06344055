//! Pseudo-legal pawn move generation.
//!
//! Pushes and captures come from separate masks: a push needs an empty
//! destination (and an empty intermediate square for the double step), a
//! capture needs an enemy piece or the en-passant target on the destination.
//! Reaching the last rank expands into one move per promotion piece.

use crate::game_state::regions::promotion_rank;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::{Move, SpecialMove};

pub fn generate_pawn_moves<A: AttackTable>(
    attacks: &A,
    game_state: &GameState,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let enemy_occ = game_state.pieces.occupancy(side.opposite());
    let empty = !game_state.pieces.occupied();
    let last_rank = promotion_rank(side);

    let mut pawns = game_state.pieces.pieces(side, PieceKind::Pawn);
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;

        // Pushes. The single step is the push square nearest the pawn.
        let pushes = attacks.pawn_pushes(side, from);
        if pushes != 0 {
            let single = match side {
                Color::White => pushes & pushes.wrapping_neg(),
                Color::Black => 1u64 << (63 - pushes.leading_zeros()),
            };
            if single & empty != 0 {
                let to = single.trailing_zeros() as Square;
                push_pawn_move(from, to, None, single & last_rank != 0, out);

                let double = pushes & !single;
                if double & empty != 0 {
                    out.push(Move::new(
                        from,
                        double.trailing_zeros() as Square,
                        PieceKind::Pawn,
                        None,
                        SpecialMove::DoublePawnPush,
                    ));
                }
            }
        }

        // Diagonal captures.
        let attack_mask = attacks.pawn_attacks(side, from);
        let mut captures = attack_mask & enemy_occ;
        while captures != 0 {
            let to = captures.trailing_zeros() as Square;
            let captured = enemy_piece_on(game_state, to);
            push_pawn_move(from, to, captured, square_bit(to) & last_rank != 0, out);
            captures &= captures - 1;
        }

        // En passant: the captured pawn sits beside us, behind the target,
        // and the target itself must be empty.
        if let Some(ep) = game_state.en_passant_square {
            if attack_mask & empty & square_bit(ep) != 0 {
                let victim = en_passant_victim_square(side, ep);
                if enemy_piece_on(game_state, victim) == Some(PieceKind::Pawn) {
                    out.push(Move::new(
                        from,
                        ep,
                        PieceKind::Pawn,
                        Some(PieceKind::Pawn),
                        SpecialMove::EnPassant,
                    ));
                }
            }
        }

        pawns &= pawns - 1;
    }
}

/// Square of the pawn removed by an en-passant capture landing on `target`.
#[inline]
pub fn en_passant_victim_square(mover: Color, target: Square) -> Square {
    match mover {
        Color::White => target - 8,
        Color::Black => target + 8,
    }
}

fn push_pawn_move(
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    promotes: bool,
    out: &mut Vec<Move>,
) {
    if promotes {
        for promo in PieceKind::PROMOTIONS {
            out.push(Move::new(
                from,
                to,
                PieceKind::Pawn,
                captured,
                SpecialMove::Promotion(promo),
            ));
        }
    } else {
        out.push(Move::new(from, to, PieceKind::Pawn, captured, SpecialMove::Normal));
    }
}
