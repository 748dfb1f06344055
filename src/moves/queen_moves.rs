use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bishop_moves::{bishop_attacks, bishop_attacks_traced};
use crate::moves::rook_moves::{rook_attacks, rook_attacks_traced};

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

pub fn queen_attacks_traced(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks_traced(square, occupancy) | rook_attacks_traced(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::{queen_attacks, queen_attacks_traced};

    #[test]
    fn open_board_queen_on_d4_sees_twenty_seven_squares() {
        assert_eq!(queen_attacks(27, 0).count_ones(), 27);
        assert_eq!(queen_attacks_traced(27, 0).count_ones(), 27);
    }

    #[test]
    fn queen_attacks_match_union() {
        let d4 = 27u8;
        let blockers = (1u64 << 43) | (1u64 << 30);
        let attacks = queen_attacks(d4, blockers);

        assert_ne!(attacks & (1u64 << 43), 0);
        assert_ne!(attacks & (1u64 << 30), 0);
        assert_eq!(attacks & (1u64 << 51), 0);
        assert_eq!(attacks & (1u64 << 31), 0);
    }
}
