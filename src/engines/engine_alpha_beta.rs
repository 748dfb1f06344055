//! Searching engine: iterative deepening alpha-beta over a pluggable
//! evaluation.
//!
//! Options (names are case-insensitive):
//! - `Depth`: maximum search depth in plies (1..=32).
//! - `MoveTime`: default per-move budget in milliseconds, `0` for none.
//! - `Nodes`: node budget per move, `0` for none.
//! - `Evaluation`: `material` or `positional`.

use crate::engines::engine_trait::{Engine, MoveSelection, SearchConstraints};
use crate::engines::time_management::{resolve_constraints, TimeManagementStrategy};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::game_status::evaluate_status;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::search::board_scoring::{BoardScorer, MaterialScorer, PositionalScorer};
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig};

const MAX_DEPTH: u8 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Evaluation {
    Material,
    #[default]
    Positional,
}

impl Evaluation {
    fn scorer(self) -> &'static dyn BoardScorer {
        match self {
            Evaluation::Material => &MaterialScorer,
            Evaluation::Positional => &PositionalScorer,
        }
    }
}

pub struct AlphaBetaEngine {
    move_generator: LegalMoveGenerator,
    config: SearchConfig,
    evaluation: Evaluation,
    time_strategy: TimeManagementStrategy,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            move_generator: LegalMoveGenerator::default(),
            config,
            evaluation: Evaluation::default(),
            time_strategy: TimeManagementStrategy::default(),
        }
    }

    pub fn with_evaluation(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_time_strategy(mut self, strategy: TimeManagementStrategy) -> Self {
        self.time_strategy = strategy;
        self
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    #[inline]
    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    /// Engine defaults overridden by whatever the caller constrained.
    fn effective_config(&self, game_state: &GameState, constraints: &SearchConstraints) -> SearchConfig {
        let resolved = resolve_constraints(game_state, constraints, self.time_strategy);
        SearchConfig {
            max_depth: resolved.depth.unwrap_or(self.config.max_depth).clamp(1, MAX_DEPTH),
            movetime_ms: resolved.movetime_ms.or(self.config.movetime_ms),
            max_nodes: resolved.nodes.or(self.config.max_nodes),
        }
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

fn invalid_option(name: &str, value: &str) -> ChessError {
    ChessError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

/// Parse a number where `0` means "no limit".
fn parse_limit(name: &str, value: &str) -> ChessResult<Option<u64>> {
    let parsed = value
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid_option(name, value))?;
    Ok((parsed > 0).then_some(parsed))
}

impl Engine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "Wake Alpha-Beta"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        match name.to_ascii_lowercase().as_str() {
            "depth" => {
                let depth = value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|depth| (1..=MAX_DEPTH).contains(depth))
                    .ok_or_else(|| invalid_option(name, value))?;
                self.config.max_depth = depth;
            }
            "movetime" => self.config.movetime_ms = parse_limit(name, value)?,
            "nodes" => self.config.max_nodes = parse_limit(name, value)?,
            "evaluation" => {
                self.evaluation = match value.trim().to_ascii_lowercase().as_str() {
                    "material" => Evaluation::Material,
                    "positional" => Evaluation::Positional,
                    _ => return Err(invalid_option(name, value)),
                };
            }
            _ => return Err(invalid_option(name, value)),
        }
        log::debug!("{}: option {name} set to {value}", self.name());
        Ok(())
    }

    fn select_move_with_history(
        &mut self,
        game_state: &GameState,
        history: &[u64],
        constraints: &SearchConstraints,
    ) -> ChessResult<MoveSelection> {
        let config = self.effective_config(game_state, constraints);
        let result = iterative_deepening_search(
            game_state,
            &self.move_generator,
            self.evaluation.scorer(),
            config,
            history,
        )
        .map_err(|err| ChessError::from_move_generation(err, game_state, None))?;

        let Some(mv) = result.best_move else {
            let status = evaluate_status(&self.move_generator, game_state)
                .map_err(|err| ChessError::from_move_generation(err, game_state, None))?;
            return Ok(MoveSelection::GameOver(status));
        };

        log::info!(
            "{} selected {mv} (score {}, depth {}, nodes {}{})",
            self.name(),
            result.best_score,
            result.reached_depth,
            result.nodes,
            if result.budget_exhausted { ", budget exhausted" } else { "" }
        );

        Ok(MoveSelection::Play {
            mv,
            score: result.best_score,
            depth: result.reached_depth,
            nodes: result.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AlphaBetaEngine, Evaluation};
    use crate::engines::engine_trait::{Engine, MoveSelection, SearchConstraints};
    use crate::engines::time_management::TimeManagementStrategy;
    use crate::errors::ChessError;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::game_status::GameStatus;

    #[test]
    fn single_legal_move_is_returned_at_any_depth() {
        // The checked king on a1 can only step to a2.
        let game = GameState::from_fen("k7/8/8/8/8/8/8/K1q5 w - - 0 1").expect("FEN should parse");
        for depth in [1, 4, 8] {
            let mut engine = AlphaBetaEngine::default();
            let selection = engine
                .select_move(&game, &SearchConstraints::depth(depth))
                .expect("selection should succeed");
            assert_eq!(
                selection.chosen_move().map(|mv| mv.to_string()),
                Some("a1a2".to_owned())
            );
        }
    }

    #[test]
    fn mated_position_reports_game_over() {
        let game =
            GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .expect("FEN should parse");
        let selection = AlphaBetaEngine::default()
            .select_move(&game, &SearchConstraints::default())
            .expect("selection should succeed");
        assert_eq!(
            selection,
            MoveSelection::GameOver(GameStatus::Checkmate { winner: Color::Black })
        );
    }

    #[test]
    fn options_are_validated() {
        let mut engine = AlphaBetaEngine::default();
        engine.set_option("Depth", "6").expect("depth should be accepted");
        engine.set_option("movetime", "0").expect("zero movetime disables the limit");
        engine.set_option("Evaluation", "Material").expect("evaluation should be accepted");
        assert_eq!(engine.config().max_depth, 6);
        assert_eq!(engine.config().movetime_ms, None);
        assert_eq!(engine.evaluation(), Evaluation::Material);

        for (name, value) in [("Depth", "0"), ("Depth", "deep"), ("Nodes", "-1"), ("Evaluation", "vibes"), ("Hash", "16")] {
            assert!(
                matches!(engine.set_option(name, value), Err(ChessError::InvalidOption { .. })),
                "{name}={value}"
            );
        }
    }

    #[test]
    fn clock_budget_still_finds_a_move() {
        let game = GameState::new_game();
        let constraints = SearchConstraints {
            depth: Some(3),
            white_time_ms: Some(5_000),
            white_increment_ms: Some(100),
            ..SearchConstraints::default()
        };
        let mut engine =
            AlphaBetaEngine::default().with_time_strategy(TimeManagementStrategy::Fraction20);
        let selection = engine
            .select_move(&game, &constraints)
            .expect("selection should succeed");
        assert!(selection.chosen_move().is_some());
    }

    #[test]
    fn captures_hanging_queen() {
        let game = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        let mut engine = AlphaBetaEngine::default().with_evaluation(Evaluation::Material);
        let selection = engine
            .select_move(&game, &SearchConstraints::depth(2))
            .expect("selection should succeed");
        assert_eq!(
            selection.chosen_move().map(|mv| mv.to_string()),
            Some("d1d5".to_owned())
        );
    }
}
