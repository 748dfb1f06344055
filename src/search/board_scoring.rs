//! Pluggable board evaluation.
//!
//! Search delegates static scoring to [`BoardScorer`], so heuristics can be
//! swapped without touching the search code. Every scorer is deterministic
//! and returns centipawns from the perspective of the side to move.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Score of being mated at the root. Mates found `ply` plies deep score
/// `MATE_SCORE - ply` so shorter mates are preferred.
pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

#[inline]
fn from_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    match game_state.side_to_move {
        Color::White => white_minus_black,
        Color::Black => -white_minus_black,
    }
}

fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
    let mut score = 0i32;
    for piece in PieceKind::ALL {
        let white = game_state.pieces.pieces(Color::White, piece).count_ones() as i32;
        let black = game_state.pieces.pieces(Color::Black, piece).count_ones() as i32;
        score += (white - black) * piece_value(piece);
    }
    score
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        from_side_to_move(game_state, material_balance_white_minus_black(game_state))
    }
}

/// Material plus small positional terms: pieces are rewarded for standing
/// near the centre and pawns for advancing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

const PAWN_ADVANCE_BONUS: i32 = 5;

impl PositionalScorer {
    /// 6 on the four centre squares down to 0 in the corners.
    #[inline]
    pub const fn centrality(square: Square) -> i32 {
        let file_offset = (2 * file_of(square) as i32 - 7).abs();
        let rank_offset = (2 * rank_of(square) as i32 - 7).abs();
        7 - (file_offset + rank_offset) / 2
    }

    #[inline]
    const fn centrality_weight(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Knight => 4,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 1,
            PieceKind::Pawn | PieceKind::Rook | PieceKind::King => 0,
        }
    }

    fn positional_terms(game_state: &GameState, color: Color) -> i32 {
        let mut score = 0i32;

        for piece in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen] {
            let weight = Self::centrality_weight(piece);
            let mut bb = game_state.pieces.pieces(color, piece);
            while bb != 0 {
                score += weight * Self::centrality(bb.trailing_zeros() as Square);
                bb &= bb - 1;
            }
        }

        let mut pawns = game_state.pieces.pieces(color, PieceKind::Pawn);
        while pawns != 0 {
            let rank = rank_of(pawns.trailing_zeros() as Square) as i32;
            let advanced = match color {
                Color::White => rank - 1,
                Color::Black => 6 - rank,
            };
            score += advanced * PAWN_ADVANCE_BONUS;
            pawns &= pawns - 1;
        }

        score
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let white_minus_black = material_balance_white_minus_black(game_state)
            + Self::positional_terms(game_state, Color::White)
            - Self::positional_terms(game_state, Color::Black);
        from_side_to_move(game_state, white_minus_black)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardScorer, MaterialScorer, PositionalScorer};
    use crate::game_state::game_state::GameState;

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(MaterialScorer.score(&game), 0);
        assert_eq!(PositionalScorer.score(&game), 0);
    }

    #[test]
    fn material_is_relative_to_side_to_move() {
        let white = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN");
        let black = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN");
        assert_eq!(MaterialScorer.score(&white), 900);
        assert_eq!(MaterialScorer.score(&black), -900);
    }

    #[test]
    fn centrality_peaks_in_the_middle() {
        assert_eq!(PositionalScorer::centrality(0), 0);
        assert_eq!(PositionalScorer::centrality(63), 0);
        assert_eq!(PositionalScorer::centrality(27), 6);
        assert_eq!(PositionalScorer::centrality(36), 6);
        assert!(PositionalScorer::centrality(18) > PositionalScorer::centrality(16));
    }

    #[test]
    fn positional_prefers_central_knight_and_advanced_pawn() {
        let rim = GameState::from_fen("4k3/8/8/8/8/8/4P3/N3K3 w - - 0 1").expect("FEN");
        let centre = GameState::from_fen("4k3/8/8/8/3NP3/8/8/4K3 w - - 0 1").expect("FEN");
        assert_eq!(MaterialScorer.score(&rim), MaterialScorer.score(&centre));
        assert!(PositionalScorer.score(&centre) > PositionalScorer.score(&rim));
    }
}
