//! Bishop attack bitboard generation utilities.
//!
//! Provides the empty-board diagonal mask per square and occupancy-aware
//! attack sets used by legal move generation, check detection and scoring.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::ray_tables::{ray_attacks, trace_ray, Direction, RAYS};

pub const BISHOP_RAYS: [Bitboard; 64] = generate_bishop_rays();

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Direction::BISHOP
        .into_iter()
        .fold(0, |acc, dir| acc | ray_attacks(dir, square, occupancy))
}

/// Square-by-square variant of [`bishop_attacks`].
pub fn bishop_attacks_traced(square: Square, occupancy: Bitboard) -> Bitboard {
    Direction::BISHOP
        .into_iter()
        .fold(0, |acc, dir| acc | trace_ray(square, dir, occupancy))
}

const fn generate_bishop_rays() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = RAYS[Direction::NorthEast.index()][sq]
            | RAYS[Direction::NorthWest.index()][sq]
            | RAYS[Direction::SouthEast.index()][sq]
            | RAYS[Direction::SouthWest.index()][sq];
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, bishop_attacks_traced, BISHOP_RAYS};

    #[test]
    fn bishop_rays_from_d4_have_thirteen_squares() {
        let d4 = 27u8;
        assert_eq!(BISHOP_RAYS[d4 as usize].count_ones(), 13);
        assert_eq!(bishop_attacks(d4, 0), BISHOP_RAYS[d4 as usize]);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let c1 = 2u8;
        let blocker_on_e3 = 1u64 << 20;
        let attacks = bishop_attacks(c1, blocker_on_e3);

        assert_ne!(attacks & (1u64 << 20), 0);
        assert_eq!(attacks & (1u64 << 29), 0);
        assert_eq!(attacks, bishop_attacks_traced(c1, blocker_on_e3));
    }
}
