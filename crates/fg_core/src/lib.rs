//! # fg_core - Category Tic-Tac-Toe Puzzle Engine
//!
//! Generates and adjudicates a 4×4 "category tic-tac-toe" puzzle over a
//! dataset of football player records: a playable 3×3 grid whose rows and
//! columns carry category constraints (country, position, league, team,
//! shirt number), with every interior cell preset to a record satisfying
//! both axes. Two parties alternate marks; three in a row wins.
//!
//! ## Design
//! - Games are immutable values: every move returns a new `Game`
//! - All cross-game state (pools, RNG, difficulty streaks) lives in a
//!   caller-owned `GameSession`, one per logical player
//! - A JSON API mirrors the session operations for transport layers

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;

// Re-export the main API surface
pub use data::{get_dataset, load_dataset_from_path, PlayerDataset, SearchFilter};
pub use engine::{
    DifficultyState, GameSession, GeneratedGame, MoveResult, OpponentConfig, SelectionOutcome,
    SelectorConfig, MIN_DATASET_RECORDS,
};
pub use error::{EngineError, Result};
pub use models::{
    CategoryType, Difficulty, Game, GameCell, GameOutcome, Mark, PlayerRecord, PriorityTier, Turn,
    Winner,
};
