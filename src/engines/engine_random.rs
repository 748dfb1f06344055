//! Random-move engine.
//!
//! Picks uniformly among the legal moves. Seeded instances are reproducible,
//! which makes this the opponent of choice for playout tests.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, MoveSelection, SearchConstraints};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::game_status::evaluate_status;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    /// `None` seeds from the thread-local generator.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            move_generator: LegalMoveGenerator::default(),
            rng: seeded_rng(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new(None)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Wake Random"
    }

    fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        if !name.eq_ignore_ascii_case("seed") {
            return Err(ChessError::InvalidOption {
                name: name.to_owned(),
                value: value.to_owned(),
            });
        }
        let seed = value.trim().parse::<u64>().map_err(|_| ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })?;
        self.rng = seeded_rng(Some(seed));
        Ok(())
    }

    fn select_move_with_history(
        &mut self,
        game_state: &GameState,
        _history: &[u64],
        _constraints: &SearchConstraints,
    ) -> ChessResult<MoveSelection> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(game_state)
            .map_err(|err| ChessError::from_move_generation(err, game_state, None))?;

        match legal_moves.choose(&mut self.rng) {
            Some(&mv) => {
                log::debug!("{} picked {mv} from {} moves", self.name(), legal_moves.len());
                Ok(MoveSelection::Play {
                    mv,
                    score: 0,
                    depth: 0,
                    nodes: legal_moves.len() as u64,
                })
            }
            None => {
                let status = evaluate_status(&self.move_generator, game_state)
                    .map_err(|err| ChessError::from_move_generation(err, game_state, None))?;
                Ok(MoveSelection::GameOver(status))
            }
        }
    }
}
