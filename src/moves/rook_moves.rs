use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::ray_tables::{ray_attacks, trace_ray, Direction, RAYS};

pub const ROOK_RAYS: [Bitboard; 64] = generate_rook_rays();

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    Direction::ROOK
        .into_iter()
        .fold(0, |acc, dir| acc | ray_attacks(dir, square, occupancy))
}

pub fn rook_attacks_traced(square: Square, occupancy: Bitboard) -> Bitboard {
    Direction::ROOK
        .into_iter()
        .fold(0, |acc, dir| acc | trace_ray(square, dir, occupancy))
}

const fn generate_rook_rays() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = RAYS[Direction::North.index()][sq]
            | RAYS[Direction::East.index()][sq]
            | RAYS[Direction::South.index()][sq]
            | RAYS[Direction::West.index()][sq];
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{rook_attacks, rook_attacks_traced, ROOK_RAYS};

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        let d4 = 27u8;
        assert_eq!(ROOK_RAYS[d4 as usize].count_ones(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks(a1, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
        assert_eq!(attacks, rook_attacks_traced(a1, blocker_on_a4));
    }

    #[test]
    fn rook_on_h8_boxed_in_attacks_only_neighbours() {
        let h8 = 63u8;
        let blockers = (1u64 << 62) | (1u64 << 55);
        assert_eq!(rook_attacks(h8, blockers), blockers);
    }
}
