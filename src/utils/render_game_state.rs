//! Terminal-oriented Unicode board renderer.
//!
//! Used by diagnostics when an invariant breaks, by the demo binary, and
//! handy from tests when a position needs eyeballing.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string for terminal output, White at the
/// bottom.
pub fn render_game_state(game_state: &GameState) -> String {
    render_grid(|sq| match game_state.piece_at(sq) {
        Some((color, piece)) => piece_to_unicode(color, piece),
        None => '·',
    })
}

/// Render a single bitboard as `x` (set) and `·` (clear).
pub fn render_bitboard(bitboard: Bitboard) -> String {
    render_grid(|sq| if bitboard & square_bit(sq) != 0 { 'x' } else { '·' })
}

fn render_grid(cell: impl Fn(Square) -> char) -> String {
    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let rank_char = char::from(b'1' + rank);
        out.push(rank_char);
        out.push(' ');

        for file in 0..8u8 {
            out.push(cell(rank * 8 + file));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
