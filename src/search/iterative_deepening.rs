//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration searches one ply deeper than the last, starting from the
//! previous iteration's best move. Searching stops at `max_depth`, or when
//! the time or node budget runs out; an interrupted iteration is discarded and
//! the best move of the last completed iteration is returned instead.
//!
//! Scores are from the side to move's point of view. Mate in `n` plies scores
//! `MATE_SCORE - n`, so shorter mates win ties against longer ones. Positions
//! repeated on the search path (or earlier in the game), positions under the
//! fifty-move rule and dead-drawn material all score zero.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::game_state::GameState;
use crate::move_generation::game_status::is_insufficient_material;
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenResult;
use crate::moves::attack_table::AttackTable;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{piece_value, BoardScorer, MATE_SCORE};

const INFINITY: i32 = MATE_SCORE + 1;
const CLOCK_CHECK_INTERVAL: u64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime_ms: Option<u64>,
    pub max_nodes: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            movetime_ms: None,
            max_nodes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    /// A time or node budget cut the search short.
    pub budget_exhausted: bool,
}

/// Search `game_state` and return the best move found.
///
/// `history` holds the keys of positions that occurred earlier in the game;
/// reaching one of them again inside the tree is scored as a draw.
pub fn iterative_deepening_search<A: AttackTable, S: BoardScorer + ?Sized>(
    game_state: &GameState,
    generator: &LegalMoveGenerator<A>,
    scorer: &S,
    config: SearchConfig,
    history: &[u64],
) -> MoveGenResult<SearchResult> {
    let mut scratch = game_state.clone();
    let mut searcher = Searcher {
        generator,
        scorer,
        deadline: config
            .movetime_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms)),
        max_nodes: config.max_nodes,
        nodes: 0,
        stopped: false,
        path: history.to_vec(),
    };

    let mut root_moves = generator.legal_moves_in_place(&mut scratch)?;
    if root_moves.is_empty() {
        return Ok(SearchResult {
            best_move: None,
            best_score: searcher.terminal_score(&scratch, 0),
            reached_depth: 0,
            nodes: 1,
            budget_exhausted: false,
        });
    }

    if config.max_depth == 0 || root_moves.len() == 1 {
        return Ok(SearchResult {
            best_move: root_moves.first().copied(),
            best_score: scorer.score(&scratch),
            reached_depth: 0,
            nodes: 1,
            budget_exhausted: false,
        });
    }

    let mut result = SearchResult::default();
    searcher.path.push(scratch.zobrist_key);

    for depth in 1..=config.max_depth {
        order_moves(&mut root_moves, result.best_move);
        let outcome = searcher.search_root(&mut scratch, &root_moves, depth)?;

        match outcome {
            RootOutcome::Completed(mv, score) => {
                result.best_move = Some(mv);
                result.best_score = score;
                result.reached_depth = depth;
                log::debug!(
                    "depth {depth} score {score} nodes {} best {mv}",
                    searcher.nodes
                );
                if score.abs() >= MATE_SCORE - i32::from(depth) {
                    // A forced mate was found; deeper iterations cannot improve it.
                    break;
                }
            }
            RootOutcome::Interrupted(partial) => {
                result.budget_exhausted = true;
                if result.best_move.is_none() {
                    let (mv, score) = partial.unwrap_or((root_moves[0], scorer.score(&scratch)));
                    result.best_move = Some(mv);
                    result.best_score = score;
                }
                log::debug!(
                    "search budget exhausted during depth {depth} after {} nodes",
                    searcher.nodes
                );
                break;
            }
        }
    }

    result.nodes = searcher.nodes;
    Ok(result)
}

/// Previous best move first, then captures by most valuable victim and least
/// valuable attacker, then promotions, then quiet moves in generation order.
pub fn order_moves(moves: &mut [Move], best_first: Option<Move>) {
    moves.sort_by_key(|mv| {
        if Some(*mv) == best_first {
            return Reverse(i32::MAX);
        }
        let capture = mv
            .captured
            .map_or(0, |victim| 10_000 + 10 * piece_value(victim) - piece_value(mv.piece));
        let promotion = mv.promotion().map_or(0, piece_value);
        Reverse(capture + promotion)
    });
}

enum RootOutcome {
    Completed(Move, i32),
    Interrupted(Option<(Move, i32)>),
}

struct Searcher<'a, A: AttackTable, S: BoardScorer + ?Sized> {
    generator: &'a LegalMoveGenerator<A>,
    scorer: &'a S,
    deadline: Option<Instant>,
    max_nodes: Option<u64>,
    nodes: u64,
    stopped: bool,
    path: Vec<u64>,
}

impl<A: AttackTable, S: BoardScorer + ?Sized> Searcher<'_, A, S> {
    fn search_root(
        &mut self,
        game_state: &mut GameState,
        moves: &[Move],
        depth: u8,
    ) -> MoveGenResult<RootOutcome> {
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(Move, i32)> = None;

        for &mv in moves {
            let record = apply_move(game_state, mv)?;
            let score = -self.negamax(game_state, depth - 1, -beta, -alpha, 1)?;
            undo_move(game_state, &record);

            if self.stopped {
                return Ok(RootOutcome::Interrupted(best));
            }
            log::trace!("depth {depth} root {mv} score {score}");

            // Strictly better only: ties keep the earlier move.
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        match best {
            Some((mv, score)) => Ok(RootOutcome::Completed(mv, score)),
            None => Ok(RootOutcome::Interrupted(None)),
        }
    }

    fn negamax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
    ) -> MoveGenResult<i32> {
        self.nodes += 1;
        if self.out_of_budget() {
            return Ok(0);
        }

        let key = game_state.zobrist_key;
        if self.path.contains(&key) {
            return Ok(0);
        }

        let mut moves = self.generator.legal_moves_in_place(game_state)?;
        if moves.is_empty() {
            return Ok(self.terminal_score(game_state, ply));
        }
        if game_state.halfmove_clock >= FIFTY_MOVE_HALFMOVES || is_insufficient_material(game_state) {
            return Ok(0);
        }
        if depth == 0 {
            return Ok(self.scorer.score(game_state));
        }

        order_moves(&mut moves, None);
        self.path.push(key);

        let mut best = -INFINITY;
        for mv in moves {
            let record = apply_move(game_state, mv)?;
            let score = -self.negamax(game_state, depth - 1, -beta, -alpha, ply.saturating_add(1))?;
            undo_move(game_state, &record);

            if self.stopped {
                break;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        self.path.pop();
        Ok(best)
    }

    fn terminal_score(&self, game_state: &GameState, ply: u8) -> i32 {
        if self.generator.is_in_check(game_state, game_state.side_to_move) {
            -MATE_SCORE + i32::from(ply)
        } else {
            0
        }
    }

    fn out_of_budget(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if self.max_nodes.is_some_and(|max| self.nodes > max) {
            self.stopped = true;
        } else if self.nodes % CLOCK_CHECK_INTERVAL == 0 {
            if let Some(deadline) = self.deadline {
                self.stopped = Instant::now() >= deadline;
            }
        }
        self.stopped
    }
}
