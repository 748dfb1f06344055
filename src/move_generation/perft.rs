use std::sync::Arc;
use std::thread;

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::attack_table::{AttackTable, PrecomputedAttacks};
use crate::moves::chess_move::{Move, SpecialMove};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Count leaf positions `depth` plies below `game_state`, classifying the move
/// that reached each leaf.
pub fn perft<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    let mut scratch = game_state.clone();
    let mut total = PerftCounts::default();
    if depth == 0 {
        total.nodes = 1;
        return Ok(total);
    }
    perft_recurse(generator, &mut scratch, depth, &mut total)?;
    Ok(total)
}

/// Perft with the default attack tables.
pub fn perft_legal(game_state: &GameState, depth: u8) -> MoveGenResult<PerftCounts> {
    perft(&LegalMoveGenerator::<PrecomputedAttacks>::default(), game_state, depth)
}

/// Node count below each root move, in generation order.
pub fn perft_divide<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<Vec<(Move, u64)>> {
    let mut scratch = game_state.clone();
    let root_moves = generator.legal_moves_in_place(&mut scratch)?;
    let mut divided = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let record = apply_move(&mut scratch, mv)?;
        let below = perft(generator, &scratch, depth.saturating_sub(1))?;
        undo_move(&mut scratch, &record);
        divided.push((mv, below.nodes));
    }

    Ok(divided)
}

/// One worker thread per root move. Totals match [`perft`].
pub fn perft_multi_threaded<A: AttackTable + 'static>(
    generator: Arc<LegalMoveGenerator<A>>,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth <= 1 {
        return perft(generator.as_ref(), game_state, depth);
    }

    let mut scratch = game_state.clone();
    let root_moves = generator.legal_moves_in_place(&mut scratch)?;
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let generator_ref = Arc::clone(&generator);
        let mut child = game_state.clone();
        handles.push(thread::spawn(move || -> MoveGenResult<PerftCounts> {
            apply_move(&mut child, mv)?;
            let mut local = PerftCounts::default();
            perft_recurse(generator_ref.as_ref(), &mut child, depth - 1, &mut local)?;
            Ok(local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle
            .join()
            .map_err(|_| MoveGenerationError::InvalidState("perft worker thread panicked".to_owned()))??;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &mut GameState,
    depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    let moves = generator.legal_moves_in_place(game_state)?;

    for mv in moves {
        if depth == 1 {
            classify_leaf(generator, game_state, mv, counts)?;
            continue;
        }
        let record = apply_move(game_state, mv)?;
        perft_recurse(generator, game_state, depth - 1, counts)?;
        undo_move(game_state, &record);
    }

    Ok(())
}

fn classify_leaf<A: AttackTable>(
    generator: &LegalMoveGenerator<A>,
    game_state: &mut GameState,
    mv: Move,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    match mv.special {
        SpecialMove::EnPassant => counts.en_passant += 1,
        SpecialMove::CastleKingSide | SpecialMove::CastleQueenSide => counts.castles += 1,
        SpecialMove::Promotion(_) => counts.promotions += 1,
        SpecialMove::Normal | SpecialMove::DoublePawnPush => {}
    }

    let record = apply_move(game_state, mv)?;
    if generator.is_in_check(game_state, game_state.side_to_move) {
        counts.checks += 1;
        if generator.legal_moves_in_place(game_state)?.is_empty() {
            counts.checkmates += 1;
        }
    }
    undo_move(game_state, &record);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> u64 {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        perft_legal(&game, depth).expect("perft should run").nodes
    }

    #[test]
    fn depth_zero_counts_single_node() {
        let counts = perft_legal(&GameState::new_game(), 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_node_counts() {
        assert_eq!(nodes(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(nodes(STARTING_POSITION_FEN, 2), 400);
        assert_eq!(nodes(STARTING_POSITION_FEN, 3), 8902);
    }

    #[test]
    fn start_position_depth_three_breakdown() {
        let counts = perft_legal(&GameState::new_game(), 3).expect("perft should run");
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checks, 12);
        assert_eq!(counts.checkmates, 0);
        assert_eq!(counts.castles, 0);
    }

    #[test]
    fn kiwipete_node_counts_and_breakdown() {
        assert_eq!(nodes(KIWIPETE, 1), 48);
        let counts = perft_legal(&GameState::from_fen(KIWIPETE).expect("FEN"), 2).expect("perft");
        assert_eq!(counts.nodes, 2039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.checks, 3);
    }

    #[test]
    fn endgame_position_node_counts() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2812);
    }

    #[test]
    fn promotion_heavy_position_node_counts() {
        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1486);
    }

    #[test]
    fn divide_sums_to_perft_and_threads_agree() {
        let game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let generator = LegalMoveGenerator::<PrecomputedAttacks>::default();

        let divided = perft_divide(&generator, &game, 2).expect("divide should run");
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 2039);

        let threaded = perft_multi_threaded(Arc::new(generator), &game, 2).expect("perft should run");
        assert_eq!(threaded, perft_legal(&game, 2).expect("perft should run"));
    }
}
