//! Game driver for front ends (CLI, PGN replay, self-play).
//!
//! `Game` owns the position and its history. Moves come in either as typed
//! [`Move`]s, as text in SAN or coordinate notation, or from an [`Engine`].
//! Every applied move is checked against the board invariants; a violation
//! rolls the position back and surfaces as a fatal [`ChessError::Internal`].

use crate::engines::engine_trait::{Engine, MoveSelection, SearchConstraints};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::REPETITION_CLAIM_COUNT;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::game_state::undo_state::UndoRecord;
use crate::move_generation::game_status::{claimable_draw, evaluate_status, DrawReason, GameStatus};
use crate::move_generation::legal_move_apply::{apply_move, undo_move};
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::parse_long_algebraic;
use crate::utils::render_game_state::render_game_state;
use crate::utils::san::{move_to_san, parse_san};

/// What happened after a move was played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub san: String,
    pub status: GameStatus,
    /// A draw the player to move may now claim, if any.
    pub draw_claim_allowed: Option<DrawReason>,
    pub fen: String,
}

#[derive(Debug, Clone)]
pub struct Game {
    generator: LegalMoveGenerator,
    state: GameState,
    undo_records: Vec<UndoRecord>,
    san_history: Vec<String>,
    /// Keys of every position reached, the current one last.
    position_keys: Vec<u64>,
    claimed_draw: Option<DrawReason>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    fn from_state(state: GameState) -> Self {
        let position_keys = vec![state.zobrist_key];
        Self {
            generator: LegalMoveGenerator::default(),
            state,
            undo_records: Vec::new(),
            san_history: Vec::new(),
            position_keys,
            claimed_draw: None,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn played_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.undo_records.iter().map(|record| record.mv)
    }

    #[inline]
    pub fn san_history(&self) -> &[String] {
        &self.san_history
    }

    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    pub fn legal_moves(&self) -> ChessResult<Vec<Move>> {
        self.generator
            .generate_legal_moves(&self.state)
            .map_err(|err| ChessError::from_move_generation(err, &self.state, None))
    }

    pub fn status(&self) -> ChessResult<GameStatus> {
        if let Some(reason) = self.claimed_draw {
            return Ok(GameStatus::Draw(reason));
        }
        evaluate_status(&self.generator, &self.state)
            .map_err(|err| ChessError::from_move_generation(err, &self.state, None))
    }

    /// How many times the current position has occurred, this one included.
    pub fn repetition_count(&self) -> usize {
        let current = self.state.zobrist_key;
        self.position_keys.iter().filter(|&&key| key == current).count()
    }

    pub fn can_claim_draw(&self) -> Option<DrawReason> {
        if self.claimed_draw.is_some() {
            return None;
        }
        claimable_draw(&self.state, self.repetition_count() >= REPETITION_CLAIM_COUNT)
    }

    /// End the game as a draw if one can be claimed now.
    pub fn claim_draw(&mut self) -> ChessResult<GameStatus> {
        let status = self.status()?;
        if status.is_over() {
            return Err(ChessError::GameOver(status));
        }
        let reason = self
            .can_claim_draw()
            .ok_or_else(|| ChessError::illegal("draw claim", "no draw can be claimed in this position"))?;
        log::info!("draw claimed: {reason}");
        self.claimed_draw = Some(reason);
        Ok(GameStatus::Draw(reason))
    }

    /// Play `mv`, which must be one of [`Game::legal_moves`].
    pub fn play_move(&mut self, mv: Move) -> ChessResult<MoveOutcome> {
        let status = self.status()?;
        if status.is_over() {
            log::warn!("rejected {mv}: game is over ({status})");
            return Err(ChessError::GameOver(status));
        }

        let legal_moves = self.legal_moves()?;
        if !legal_moves.contains(&mv) {
            log::warn!("rejected {mv}: not legal in {}", self.fen());
            return Err(ChessError::illegal(mv.to_string(), "not a legal move in this position"));
        }

        let san = move_to_san(&self.generator, &self.state, mv)
            .map_err(|err| ChessError::from_move_generation(err, &self.state, Some(mv)))?;

        let last_valid = self.state.clone();
        let record = apply_move(&mut self.state, mv)
            .map_err(|err| ChessError::from_move_generation(err, &last_valid, Some(mv)))?;

        if let Err(violation) = self.state.validate() {
            log::error!(
                "invariant violated after {mv}: {violation}\n{}",
                render_game_state(&self.state)
            );
            self.state = last_valid;
            return Err(ChessError::internal(violation.to_string(), &self.state, Some(mv)));
        }

        self.undo_records.push(record);
        self.san_history.push(san.clone());
        self.position_keys.push(self.state.zobrist_key);

        let status = self.status()?;
        let draw_claim_allowed = self.can_claim_draw();
        log::info!("{}. {san} ({status})", Self::move_number_label(&last_valid));

        Ok(MoveOutcome {
            mv,
            san,
            status,
            draw_claim_allowed,
            fen: self.fen(),
        })
    }

    /// Play a move given in SAN (`Nf3`, `O-O`) or coordinate form (`g1f3`).
    pub fn play_notation(&mut self, text: &str) -> ChessResult<MoveOutcome> {
        let status = self.status()?;
        if status.is_over() {
            log::warn!("rejected '{text}': game is over ({status})");
            return Err(ChessError::GameOver(status));
        }

        let legal_moves = self.legal_moves()?;
        let parsed = match parse_long_algebraic(text, &legal_moves) {
            Err(ChessError::InvalidNotation(_)) => parse_san(text, &legal_moves),
            coordinate => coordinate,
        };
        match parsed {
            Ok(mv) => self.play_move(mv),
            Err(err) => {
                log::warn!("rejected '{text}': {err}");
                Err(err)
            }
        }
    }

    /// Take back the last move. Returns `None` at the start of the game.
    pub fn undo_last(&mut self) -> Option<Move> {
        let record = self.undo_records.pop()?;
        undo_move(&mut self.state, &record);
        self.san_history.pop();
        self.position_keys.pop();
        self.claimed_draw = None;
        log::debug!("took back {}", record.mv);
        Some(record.mv)
    }

    /// Ask `engine` for a move and play it.
    ///
    /// Returns `Ok(None)` when the game is already over.
    pub fn play_computer_move(
        &mut self,
        engine: &mut dyn Engine,
        constraints: &SearchConstraints,
    ) -> ChessResult<Option<MoveOutcome>> {
        if self.status()?.is_over() {
            return Ok(None);
        }

        let history = &self.position_keys[..self.position_keys.len().saturating_sub(1)];
        match engine.select_move_with_history(&self.state, history, constraints)? {
            MoveSelection::Play { mv, .. } => self.play_move(mv).map(Some),
            MoveSelection::GameOver(status) => {
                log::debug!("{} reports game over: {status}", engine.name());
                Ok(None)
            }
        }
    }

    fn move_number_label(before: &GameState) -> String {
        match before.side_to_move {
            Color::White => before.fullmove_number.to_string(),
            Color::Black => format!("{}...", before.fullmove_number),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
