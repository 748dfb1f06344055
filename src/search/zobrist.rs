//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys come from a fixed-seed `StdRng`, so hashes are identical across runs
//! and across threads. `apply_move` maintains the key incrementally by XOR-ing
//! the same terms this module exposes; `compute_zobrist_key` rebuilds it from
//! scratch and is what `GameState::validate` compares against.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::{chess_types::*, game_state::GameState};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    // Index 0 (no rights) hashes to zero so a bare position needs no term.
    let mut castling = [0u64; 16];
    for key in castling.iter_mut().skip(1) {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][piece.index()][square as usize]
}

/// Contribution of a whole castling-rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

/// Contribution of an en-passant target; only its file matters.
#[inline]
pub fn en_passant_key(square: Square) -> u64 {
    tables().en_passant_file[file_of(square) as usize]
}

/// XOR-ed in when Black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for color in Color::ALL {
        for piece in PieceKind::ALL {
            let mut bb = game_state.pieces.pieces(color, piece);
            while bb != 0 {
                let sq = bb.trailing_zeros() as Square;
                key ^= piece_square_key(color, piece, sq);
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Black {
        key ^= side_to_move_key();
    }
    key ^= castling_key(game_state.castling_rights);
    if let Some(ep) = game_state.en_passant_square {
        key ^= en_passant_key(ep);
    }

    key
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;
    use crate::moves::attack_table::PrecomputedAttacks;

    fn play(game: &mut GameState, coordinate: &str) {
        let moves = LegalMoveGenerator::<PrecomputedAttacks>::default()
            .generate_legal_moves(game)
            .expect("position should generate");
        let mv = moves
            .into_iter()
            .find(|mv| mv.to_string() == coordinate)
            .expect("move should be legal");
        apply_move(game, mv).expect("move should apply");
    }

    #[test]
    fn incremental_key_matches_full_recompute() {
        let mut game = GameState::new_game();
        for coordinate in ["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "g1f3", "c6b5", "e1g1"] {
            play(&mut game, coordinate);
            assert_eq!(game.zobrist_key, compute_zobrist_key(&game), "after {coordinate}");
        }
    }

    #[test]
    fn transposition_reaches_the_same_key() {
        let mut a = GameState::new_game();
        for coordinate in ["g1f3", "g8f6", "b1c3", "b8c6"] {
            play(&mut a, coordinate);
        }
        let mut b = GameState::new_game();
        for coordinate in ["b1c3", "b8c6", "g1f3", "g8f6"] {
            play(&mut b, coordinate);
        }
        assert_eq!(a.zobrist_key, b.zobrist_key);
    }

    #[test]
    fn side_to_move_changes_the_key() {
        let white = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN");
        let black = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN");
        assert_ne!(white.zobrist_key, black.zobrist_key);
    }
}
