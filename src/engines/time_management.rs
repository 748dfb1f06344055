//! Time-management strategies for per-move budgeting.
//!
//! Callers pass raw clock data (remaining time, increments, moves to go) and
//! the engine turns it into a single move-time budget here.

use crate::engines::engine_trait::SearchConstraints;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeManagementStrategy {
    /// Spend 1/20th of the remaining clock.
    Fraction20,
    /// Scale by game phase, increment and moves to go, keeping a reserve.
    #[default]
    Adaptive,
}

/// Fill in `movetime_ms` from the mover's clock unless it was set explicitly.
pub fn resolve_constraints(
    game_state: &GameState,
    constraints: &SearchConstraints,
    strategy: TimeManagementStrategy,
) -> SearchConstraints {
    if constraints.movetime_ms.is_some() {
        return constraints.clone();
    }

    let mut resolved = constraints.clone();
    let (remaining, increment) = match game_state.side_to_move {
        Color::White => (constraints.white_time_ms, constraints.white_increment_ms),
        Color::Black => (constraints.black_time_ms, constraints.black_increment_ms),
    };

    if let Some(remaining) = remaining {
        resolved.movetime_ms = Some(match strategy {
            TimeManagementStrategy::Fraction20 => (remaining / 20).max(1),
            TimeManagementStrategy::Adaptive => {
                adaptive_budget_ms(game_state, remaining, increment, constraints.moves_to_go)
            }
        });
    }

    resolved
}

fn adaptive_budget_ms(
    game_state: &GameState,
    remaining_ms: u64,
    increment_ms: Option<u64>,
    moves_to_go: Option<u16>,
) -> u64 {
    let moves_played = u64::from(game_state.fullmove_number.saturating_sub(1));
    let expected_moves_left = match moves_to_go {
        Some(mtg) => u64::from(mtg.max(1)),
        None if moves_played < 10 => 40,
        None if moves_played < 30 => 28,
        None => 18,
    };

    let reserve = (remaining_ms / 25).clamp(1, 1_000).min(remaining_ms.saturating_sub(1));
    let usable = remaining_ms.saturating_sub(reserve);
    let base = usable / expected_moves_left;
    let increment_bonus = increment_ms.unwrap_or(0).saturating_mul(3) / 4;
    let target = base.saturating_add(increment_bonus);

    let max_budget = (remaining_ms / 4).max(1);
    target.clamp(1, max_budget)
}

#[cfg(test)]
mod tests {
    use super::{resolve_constraints, TimeManagementStrategy};
    use crate::engines::engine_trait::SearchConstraints;
    use crate::game_state::game_state::GameState;

    #[test]
    fn explicit_movetime_wins() {
        let constraints = SearchConstraints {
            movetime_ms: Some(250),
            white_time_ms: Some(60_000),
            ..SearchConstraints::default()
        };
        let resolved = resolve_constraints(
            &GameState::new_game(),
            &constraints,
            TimeManagementStrategy::Adaptive,
        );
        assert_eq!(resolved.movetime_ms, Some(250));
    }

    #[test]
    fn fraction_uses_the_movers_clock() {
        let constraints = SearchConstraints {
            white_time_ms: Some(60_000),
            black_time_ms: Some(2_000),
            ..SearchConstraints::default()
        };
        let white = GameState::new_game();
        let black = GameState::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("FEN should parse");

        let strategy = TimeManagementStrategy::Fraction20;
        assert_eq!(resolve_constraints(&white, &constraints, strategy).movetime_ms, Some(3_000));
        assert_eq!(resolve_constraints(&black, &constraints, strategy).movetime_ms, Some(100));
    }

    #[test]
    fn adaptive_budget_stays_within_a_quarter_of_the_clock() {
        let constraints = SearchConstraints {
            white_time_ms: Some(400),
            white_increment_ms: Some(10_000),
            ..SearchConstraints::default()
        };
        let resolved = resolve_constraints(
            &GameState::new_game(),
            &constraints,
            TimeManagementStrategy::Adaptive,
        );
        assert_eq!(resolved.movetime_ms, Some(100));
    }

    #[test]
    fn no_clock_leaves_movetime_unset() {
        let resolved = resolve_constraints(
            &GameState::new_game(),
            &SearchConstraints::depth(3),
            TimeManagementStrategy::Adaptive,
        );
        assert_eq!(resolved.movetime_ms, None);
        assert_eq!(resolved.depth, Some(3));
    }
}
