//! Twelve piece bitboards plus cached per-color occupancy.
//!
//! The only mutators are [`PieceSet::put`] and [`PieceSet::remove`]; both keep
//! the occupancy caches in step with the piece boards so aggregates never
//! drift. Move application is responsible for clearing a destination before
//! placing a piece on it.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PieceSet {
    // [color][piece_kind]
    boards: [[Bitboard; 6]; 2],
    occupancy_by_color: [Bitboard; 2],
}

/// Description of a broken piece-set invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PieceSetViolation {
    #[error("{color:?} has two piece kinds on square {square}")]
    OverlappingPieces { color: Color, square: Square },
    #[error("both colors occupy square {square}")]
    OverlappingColors { square: Square },
    #[error("{color:?} occupancy cache disagrees with piece boards")]
    StaleOccupancy { color: Color },
    #[error("{color:?} has {count} kings")]
    KingCount { color: Color, count: u32 },
}

impl PieceSet {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            boards: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
        }
    }

    #[inline]
    pub const fn pieces(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.boards[color.index()][piece.index()]
    }

    #[inline]
    pub const fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    #[inline]
    pub const fn is_occupied(&self, square: Square) -> bool {
        self.occupied() & square_bit(square) != 0
    }

    /// Set the bit for `(color, piece)` on `square`. No-op if already set.
    #[inline]
    pub fn put(&mut self, color: Color, piece: PieceKind, square: Square) {
        let bit = square_bit(square);
        self.boards[color.index()][piece.index()] |= bit;
        self.occupancy_by_color[color.index()] |= bit;
    }

    /// Clear the bit for `(color, piece)` on `square`. No-op if already clear.
    #[inline]
    pub fn remove(&mut self, color: Color, piece: PieceKind, square: Square) {
        let bit = square_bit(square);
        let board = &mut self.boards[color.index()][piece.index()];
        if *board & bit == 0 {
            return;
        }
        *board &= !bit;
        self.occupancy_by_color[color.index()] &= !bit;
    }

    pub fn piece_for_color(&self, color: Color, square: Square) -> Option<PieceKind> {
        let bit = square_bit(square);
        if self.occupancy(color) & bit == 0 {
            return None;
        }
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.pieces(color, *piece) & bit != 0)
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        Color::ALL.into_iter().find_map(|color| {
            self.piece_for_color(color, square)
                .map(|piece| (color, piece))
        })
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Check every structural invariant of the piece boards.
    pub fn validate(&self) -> Result<(), PieceSetViolation> {
        for color in Color::ALL {
            let mut seen = 0u64;
            let mut union = 0u64;
            for piece in PieceKind::ALL {
                let board = self.pieces(color, piece);
                let overlap = seen & board;
                if overlap != 0 {
                    return Err(PieceSetViolation::OverlappingPieces {
                        color,
                        square: overlap.trailing_zeros() as Square,
                    });
                }
                seen |= board;
                union |= board;
            }
            if union != self.occupancy(color) {
                return Err(PieceSetViolation::StaleOccupancy { color });
            }
            let kings = self.pieces(color, PieceKind::King).count_ones();
            if kings != 1 {
                return Err(PieceSetViolation::KingCount { color, count: kings });
            }
        }

        let shared = self.occupancy(Color::White) & self.occupancy(Color::Black);
        if shared != 0 {
            return Err(PieceSetViolation::OverlappingColors {
                square: shared.trailing_zeros() as Square,
            });
        }

        Ok(())
    }
}
