//! Per-direction ray masks and the blocker-resolving ray lookup shared by the
//! sliding pieces.
//!
//! A ray from `square` in direction `d` contains every square reachable on an
//! empty board. With blockers present, the first occupied square along the
//! ray is found with one bit scan (lowest bit for directions that increase the
//! square index, highest bit for the others) and everything beyond it is
//! removed by xoring the blocker's own ray.

use crate::game_state::chess_types::{Bitboard, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    NorthEast,
    NorthWest,
    South,
    West,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ROOK: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const BISHOP: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::NorthEast => 2,
            Direction::NorthWest => 3,
            Direction::South => 4,
            Direction::West => 5,
            Direction::SouthEast => 6,
            Direction::SouthWest => 7,
        }
    }

    /// `(file_step, rank_step)`.
    #[inline]
    pub const fn steps(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::SouthEast => (1, -1),
            Direction::SouthWest => (-1, -1),
        }
    }

    /// True when stepping along the ray increases the square index.
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::NorthEast | Direction::NorthWest
        )
    }
}

pub const RAYS: [[Bitboard; 64]; 8] = generate_rays();

const fn generate_rays() -> [[Bitboard; 64]; 8] {
    let directions = [
        Direction::North,
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::South,
        Direction::West,
        Direction::SouthEast,
        Direction::SouthWest,
    ];
    let mut table = [[0u64; 64]; 8];
    let mut d = 0usize;

    while d < 8 {
        let (file_step, rank_step) = directions[d].steps();
        let mut sq = 0usize;
        while sq < 64 {
            table[directions[d].index()][sq] = trace_ray_const(sq as i32, file_step, rank_step);
            sq += 1;
        }
        d += 1;
    }

    table
}

pub(crate) const fn trace_ray_const(square: i32, file_step: i32, rank_step: i32) -> Bitboard {
    let mut file = (square % 8) + file_step;
    let mut rank = (square / 8) + rank_step;
    let mut attacks = 0u64;

    while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
        let target = (rank * 8 + file) as usize;
        attacks |= 1u64 << target;
        file += file_step;
        rank += rank_step;
    }

    attacks
}

/// Squares attacked along one ray, stopping at (and including) the first
/// occupied square.
#[inline]
pub fn ray_attacks(direction: Direction, square: Square, occupancy: Bitboard) -> Bitboard {
    let ray = RAYS[direction.index()][square as usize];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }

    let first = if direction.is_positive() {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    ray ^ RAYS[direction.index()][first as usize]
}

/// Step-by-step ray walk; the reference behavior for [`ray_attacks`].
pub fn trace_ray(square: Square, direction: Direction, occupancy: Bitboard) -> Bitboard {
    let (file_step, rank_step) = direction.steps();
    let mut file = i32::from(square % 8) + file_step;
    let mut rank = i32::from(square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::{ray_attacks, trace_ray, Direction, RAYS};

    #[test]
    fn north_ray_from_a1_is_the_a_file() {
        assert_eq!(RAYS[Direction::North.index()][0], 0x0101_0101_0101_0100);
    }

    #[test]
    fn blocked_rays_match_traced_rays() {
        let occupancy = (1u64 << 35) | (1u64 << 19) | (1u64 << 29) | (1u64 << 9);
        for direction in Direction::ROOK.into_iter().chain(Direction::BISHOP) {
            for sq in 0..64u8 {
                assert_eq!(
                    ray_attacks(direction, sq, occupancy),
                    trace_ray(sq, direction, occupancy),
                    "{direction:?} from {sq}"
                );
            }
        }
    }
}
