//! Attack/mask lookup behind a trait so the move generator can be handed an
//! alternative table.
//!
//! Both implementations are immutable after construction and hold no interior
//! state, so a single instance can be shared freely across threads.

use crate::game_state::chess_types::{Bitboard, Color, PieceKind, Square};
use crate::moves::bishop_moves::{bishop_attacks, bishop_attacks_traced};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::{pawn_attacks, pawn_pushes};
use crate::moves::queen_moves::{queen_attacks, queen_attacks_traced};
use crate::moves::rook_moves::{rook_attacks, rook_attacks_traced};

pub trait AttackTable: Send + Sync {
    fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard;
    fn pawn_pushes(&self, color: Color, square: Square) -> Bitboard;
    fn knight_attacks(&self, square: Square) -> Bitboard;
    fn king_attacks(&self, square: Square) -> Bitboard;
    fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard;
    fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard;

    #[inline]
    fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(square, occupancy) | self.rook_attacks(square, occupancy)
    }

    /// Squares attacked by `piece` of `color` standing on `square`.
    ///
    /// Occupancy only matters for sliders; the first occupied square along
    /// each ray is included so captures can be masked in by the caller.
    #[inline]
    fn attacks_from(
        &self,
        piece: PieceKind,
        color: Color,
        square: Square,
        occupancy: Bitboard,
    ) -> Bitboard {
        match piece {
            PieceKind::Pawn => self.pawn_attacks(color, square),
            PieceKind::Knight => self.knight_attacks(square),
            PieceKind::Bishop => self.bishop_attacks(square, occupancy),
            PieceKind::Rook => self.rook_attacks(square, occupancy),
            PieceKind::Queen => self.queen_attacks(square, occupancy),
            PieceKind::King => self.king_attacks(square),
        }
    }
}

/// Compile-time tables plus single-scan ray resolution for sliders.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecomputedAttacks;

impl AttackTable for PrecomputedAttacks {
    #[inline]
    fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        pawn_attacks(color, square)
    }

    #[inline]
    fn pawn_pushes(&self, color: Color, square: Square) -> Bitboard {
        pawn_pushes(color, square)
    }

    #[inline]
    fn knight_attacks(&self, square: Square) -> Bitboard {
        knight_attacks(square)
    }

    #[inline]
    fn king_attacks(&self, square: Square) -> Bitboard {
        king_attacks(square)
    }

    #[inline]
    fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        bishop_attacks(square, occupancy)
    }

    #[inline]
    fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        rook_attacks(square, occupancy)
    }

    #[inline]
    fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        queen_attacks(square, occupancy)
    }
}

/// Walks every slider ray square by square. Slower, but shares no code with
/// the ray-scan path, which makes it a useful cross-check.
#[derive(Debug, Clone, Copy, Default)]
pub struct RayTracingAttacks;

impl AttackTable for RayTracingAttacks {
    fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        pawn_attacks(color, square)
    }

    fn pawn_pushes(&self, color: Color, square: Square) -> Bitboard {
        pawn_pushes(color, square)
    }

    fn knight_attacks(&self, square: Square) -> Bitboard {
        knight_attacks(square)
    }

    fn king_attacks(&self, square: Square) -> Bitboard {
        king_attacks(square)
    }

    fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        bishop_attacks_traced(square, occupancy)
    }

    fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        rook_attacks_traced(square, occupancy)
    }

    fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        queen_attacks_traced(square, occupancy)
    }
}
