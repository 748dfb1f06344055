//! The move value produced by generation and consumed by apply/undo.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_name;

/// Special-rule tag carried by a [`Move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMove {
    Normal,
    DoublePawnPush,
    EnPassant,
    CastleKingSide,
    CastleQueenSide,
    Promotion(PieceKind),
}

/// A fully described move. Generated fresh for each position and never
/// mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub special: SpecialMove,
}

impl Move {
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: PieceKind,
        captured: Option<PieceKind>,
        special: SpecialMove,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            special,
        }
    }

    #[inline]
    pub const fn quiet(from: Square, to: Square, piece: PieceKind) -> Self {
        Self::new(from, to, piece, None, SpecialMove::Normal)
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(
            self.special,
            SpecialMove::CastleKingSide | SpecialMove::CastleQueenSide
        )
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match self.special {
            SpecialMove::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    /// Piece standing on the destination after the move.
    #[inline]
    pub const fn piece_after(&self) -> PieceKind {
        match self.special {
            SpecialMove::Promotion(piece) => piece,
            _ => self.piece,
        }
    }

    /// Captures and promotions reset the fifty-move count along with pawn moves.
    #[inline]
    pub const fn is_irreversible(&self) -> bool {
        self.captured.is_some() || matches!(self.piece, PieceKind::Pawn)
    }
}

/// Coordinate notation, for example `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from), square_name(self.to))?;
        if let Some(piece) = self.promotion() {
            write!(f, "{}", piece.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
