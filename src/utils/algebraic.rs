//! Square and bitboard conversions for coordinate names such as `e4`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{file_of, rank_of, Bitboard, Square};

/// Convert a coordinate (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidNotation(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Name of a square index (`0..=63`), for example "e4".
#[inline]
pub fn square_name(square: Square) -> String {
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

/// Names of every square in `bitboard`, ascending.
pub fn bitboard_to_squares(mut bitboard: Bitboard) -> Vec<String> {
    let mut names = Vec::with_capacity(bitboard.count_ones() as usize);
    while bitboard != 0 {
        names.push(square_name(bitboard.trailing_zeros() as Square));
        bitboard &= bitboard - 1;
    }
    names
}
