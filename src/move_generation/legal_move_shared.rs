use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::{Move, SpecialMove};

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    game_state
        .pieces
        .piece_for_color(game_state.side_to_move.opposite(), square)
}

/// Emit one move per target bit, tagging captures with the enemy piece found
/// on the destination. Targets are visited in ascending square order.
#[inline]
pub fn push_targets(
    game_state: &GameState,
    from: Square,
    piece: PieceKind,
    mut targets: Bitboard,
    out: &mut Vec<Move>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(Move::new(
            from,
            to,
            piece,
            enemy_piece_on(game_state, to),
            SpecialMove::Normal,
        ));
        targets &= targets - 1;
    }
}

/// Pseudo-legal moves for every `piece` of the side to move, using `attacks`
/// to produce the reachable squares from each origin.
#[inline]
pub fn generate_piece_moves(
    game_state: &GameState,
    piece: PieceKind,
    out: &mut Vec<Move>,
    attacks: impl Fn(Square, Bitboard) -> Bitboard,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.pieces.occupancy(side);
    let occupied = game_state.pieces.occupied();

    let mut origins = game_state.pieces.pieces(side, piece);
    while origins != 0 {
        let from = origins.trailing_zeros() as Square;
        let targets = attacks(from, occupied) & !own_occ;
        push_targets(game_state, from, piece, targets, out);
        origins &= origins - 1;
    }
}
