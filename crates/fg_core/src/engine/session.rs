//! Caller-owned game session.
//!
//! All mutable cross-game state lives here: the RNG, the tiered pools with
//! their cursors, and the difficulty progression. One session serves one
//! logical player; hosts that juggle many players keep one `GameSession` per
//! session id and persist `DifficultyState` snapshots across process
//! boundaries. Game values themselves stay immutable; every move returns a
//! new `Game`.

use std::sync::Arc;

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::data::PlayerDataset;
use crate::error::{EngineError, Result};
use crate::models::{CategoryType, Difficulty, Game, GameOutcome, Turn};

use super::board;
use super::categories::{self, SelectionOutcome, SelectorConfig};
use super::difficulty::{DifficultyState, DifficultyTracker};
use super::guess;
use super::opponent::{self, OpponentConfig};
use super::pool::PriorityPool;
use super::rules::{self, MoveError};

/// Generation refuses to run below this dataset size.
pub const MIN_DATASET_RECORDS: usize = 9;

/// Outcome envelope of every move operation. `success == false` carries the
/// input game unchanged plus a human-readable reason.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub success: bool,
    pub game: Game,
    pub message: Option<String>,
}

impl MoveResult {
    fn ok(game: Game) -> Self {
        Self {
            success: true,
            game,
            message: None,
        }
    }

    fn rejected(game: Game, error: MoveError) -> Self {
        Self {
            success: false,
            game,
            message: Some(error.to_string()),
        }
    }
}

/// A freshly generated game plus generation diagnostics
#[derive(Debug, Clone)]
pub struct GeneratedGame {
    pub game: Game,
    /// Which selector path produced the categories
    pub selection: SelectionOutcome,
    /// True when at least one interior cell has no occupant
    pub degraded: bool,
}

/// Per-session engine handle
#[derive(Debug)]
pub struct GameSession {
    dataset: Arc<PlayerDataset>,
    rng: ChaCha8Rng,
    pool: PriorityPool,
    tracker: DifficultyTracker,
    pub selector_config: SelectorConfig,
    pub opponent_config: OpponentConfig,
}

impl GameSession {
    /// New session with an entropy-seeded RNG
    pub fn new(dataset: Arc<PlayerDataset>) -> Self {
        Self::with_rng(dataset, ChaCha8Rng::from_entropy())
    }

    /// New session with a deterministic RNG, for replay and tests
    pub fn with_seed(dataset: Arc<PlayerDataset>, seed: u64) -> Self {
        Self::with_rng(dataset, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(dataset: Arc<PlayerDataset>, rng: ChaCha8Rng) -> Self {
        Self {
            dataset,
            rng,
            pool: PriorityPool::new(),
            tracker: DifficultyTracker::new(),
            selector_config: SelectorConfig::default(),
            opponent_config: OpponentConfig::default(),
        }
    }

    pub fn dataset(&self) -> &PlayerDataset {
        &self.dataset
    }

    /// Generate a new game.
    ///
    /// `difficulty` overrides the progression's current tier for this one
    /// game without touching the tracker; `force_reset` drops the
    /// progression and the pools back to their initial state first.
    pub fn generate_game(
        &mut self,
        difficulty: Option<Difficulty>,
        force_reset: bool,
    ) -> Result<GeneratedGame> {
        let found = self.dataset.len();
        if found < MIN_DATASET_RECORDS {
            return Err(EngineError::InsufficientDataset { found });
        }

        if force_reset {
            self.tracker.reset();
            self.pool.reset();
        }
        let level = difficulty.unwrap_or_else(|| self.tracker.difficulty());

        let selection = categories::select(
            &self.dataset,
            level,
            &mut self.rng,
            &self.selector_config,
        );
        let built = board::build(
            &self.dataset,
            &selection.layout,
            level,
            &mut self.pool,
            &mut self.rng,
        );

        let game = Game {
            id: Game::new_id(),
            grid: built.grid,
            row_types: selection.layout.row_types,
            row_values: selection.layout.row_values,
            col_types: selection.layout.col_types,
            col_values: selection.layout.col_values,
            turn: Turn::User,
            winner: None,
            is_complete: false,
            difficulty: level,
            previous_difficulty: self.tracker.take_advanced_from(),
            progress_percent: self.tracker.progress_percent(),
            created_at: Utc::now(),
        };
        log::info!(
            "generated game {} at {} (selection: {:?}, degraded: {})",
            game.id,
            level.name(),
            selection.outcome,
            built.degraded
        );
        Ok(GeneratedGame {
            game,
            selection: selection.outcome,
            degraded: built.degraded,
        })
    }

    /// Mark a preset cell for the user.
    pub fn place_user_mark(&mut self, game: &Game, row: usize, col: usize) -> MoveResult {
        match rules::place_user_mark(game, row, col) {
            Ok(mut next) => {
                self.settle_terminal(&mut next);
                MoveResult::ok(next)
            }
            Err(error) => MoveResult::rejected(game.clone(), error),
        }
    }

    /// Resolve a free-text guess and, when it fits the cell, place it as a
    /// user mark (replacing the preset occupant).
    pub fn guess(&mut self, game: &Game, row: usize, col: usize, name: &str) -> MoveResult {
        let record = match guess::resolve(&self.dataset, name) {
            Some(record) => record.clone(),
            None => {
                return MoveResult::rejected(
                    game.clone(),
                    MoveError::UnknownPlayer {
                        guess: name.to_string(),
                    },
                )
            }
        };
        match rules::place_guess(game, row, col, &record) {
            Ok(mut next) => {
                self.settle_terminal(&mut next);
                MoveResult::ok(next)
            }
            Err(error) => MoveResult::rejected(game.clone(), error),
        }
    }

    /// Give up on the current cell hunt: the turn passes to the opponent and
    /// its reply is applied immediately.
    pub fn skip(&mut self, game: &Game) -> MoveResult {
        match rules::skip_turn(game) {
            Ok(next) => self.opponent_reply(next),
            Err(error) => MoveResult::rejected(game.clone(), error),
        }
    }

    /// Let the opponent take its cell.
    pub fn place_opponent_mark(&mut self, game: &Game) -> MoveResult {
        self.opponent_reply(game.clone())
    }

    fn opponent_reply(&mut self, game: Game) -> MoveResult {
        let cell = opponent::choose_cell(&game, &mut self.rng, &self.opponent_config);
        match rules::place_opponent_mark(&game, cell) {
            Ok(mut next) => {
                self.settle_terminal(&mut next);
                MoveResult::ok(next)
            }
            Err(error) => MoveResult::rejected(game, error),
        }
    }

    /// Fold a just-completed game into the difficulty progression and stamp
    /// the recomputed progress on it.
    fn settle_terminal(&mut self, game: &mut Game) {
        let Some(winner) = game.winner.filter(|_| game.is_complete) else {
            return;
        };
        let outcome = GameOutcome::from_winner(winner);
        self.tracker.record_outcome(outcome);
        game.progress_percent = self.tracker.progress_percent();
        log::info!(
            "game {} complete: {:?}, difficulty now {}",
            game.id,
            outcome,
            self.tracker.difficulty().name()
        );
    }

    /// Sorted distinct values present in the dataset for a category
    pub fn category_options(&self, category: CategoryType) -> Vec<String> {
        self.dataset.category_options(category)
    }

    pub fn difficulty_state(&self) -> DifficultyState {
        self.tracker.snapshot()
    }

    pub fn restore_difficulty_state(&mut self, state: DifficultyState) {
        self.tracker.restore(state);
    }
}
