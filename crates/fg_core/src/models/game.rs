//! Game value object and its supporting enums.
//!
//! A `Game` is a complete snapshot of one puzzle: the 4×4 grid (header row 0
//! and header column 0 around a playable 3×3 interior), the six axis
//! constraints, whose turn it is, and the terminal/difficulty bookkeeping.
//! Move operations never mutate a `Game`; they clone and return a new value,
//! which keeps replay and host-side persistence trivial.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::CategoryType;
use super::record::{PlayerRecord, PriorityTier};

/// Board dimension including the header row/column
pub const GRID_SIZE: usize = 4;

/// Number of playable cells (the interior 3×3)
pub const INTERIOR_CELLS: usize = 9;

/// Owner of a mark on a data cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    User,
    Opponent,
}

/// Whose move it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Turn {
    User,
    Opponent,
}

/// Terminal result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    User,
    Opponent,
    Draw,
}

/// A completed game's result from the user's perspective.
///
/// This is what the difficulty progression consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Win,
    Loss,
    Draw,
}

impl GameOutcome {
    /// Derive the user-perspective outcome from a terminal winner
    pub fn from_winner(winner: Winner) -> Self {
        match winner {
            Winner::User => GameOutcome::Win,
            Winner::Opponent => GameOutcome::Loss,
            Winner::Draw => GameOutcome::Draw,
        }
    }
}

/// Difficulty level of a game.
///
/// Progression is monotonic easy → medium → hard; regression only happens
/// through an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Get difficulty name as string
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// The next tier up, if any
    pub fn next(&self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => None,
        }
    }

    /// Tiers a record may come from when checking that a category pair is
    /// feasible at this difficulty
    pub fn admissible_tiers(&self) -> &'static [PriorityTier] {
        match self {
            Difficulty::Easy => &[PriorityTier::Famous],
            Difficulty::Medium => &[PriorityTier::Famous, PriorityTier::Medium],
            Difficulty::Hard => &[
                PriorityTier::Famous,
                PriorityTier::Medium,
                PriorityTier::Obscure,
            ],
        }
    }

    /// Target tier composition over the 9 interior cells.
    ///
    /// Easy: famous only. Medium: 5 famous + 4 medium. Hard: 3/3/3.
    pub fn cell_tier_targets(&self) -> [PriorityTier; INTERIOR_CELLS] {
        use PriorityTier::{Famous, Medium, Obscure};
        match self {
            Difficulty::Easy => [Famous; INTERIOR_CELLS],
            Difficulty::Medium => [
                Famous, Famous, Famous, Famous, Famous, Medium, Medium, Medium, Medium,
            ],
            Difficulty::Hard => [
                Famous, Famous, Famous, Medium, Medium, Medium, Obscure, Obscure, Obscure,
            ],
        }
    }
}

/// One cell of the 4×4 grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameCell {
    /// The unused top-left corner
    Blank,
    /// A header cell labeling its row or column
    Header { category: CategoryType },
    /// A playable interior cell
    Data {
        /// Preset occupant; `None` when generation could not fill the cell
        player: Option<PlayerRecord>,
        /// Mark, once either party has taken the cell
        mark: Option<Mark>,
    },
}

impl GameCell {
    /// Empty data cell
    pub fn empty_data() -> Self {
        GameCell::Data {
            player: None,
            mark: None,
        }
    }
}

/// A complete puzzle snapshot.
///
/// Invariants established at generation and preserved by every move:
/// - `grid` is 4×4; `[0][0]` is blank, row 0 / col 0 (indices 1–3) are
///   headers, the interior 3×3 are data cells
/// - row and column category types are disjoint sets
/// - Team and League never sit on opposite axes
/// - the six category values are pairwise distinct
/// - occupants of distinct cells are distinct records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Unique game identifier
    pub id: String,

    /// 4×4 board; see struct docs for the layout
    pub grid: [[GameCell; GRID_SIZE]; GRID_SIZE],

    /// Category type per interior row (index 0 = grid row 1)
    pub row_types: [CategoryType; 3],

    /// Category value per interior row
    pub row_values: [String; 3],

    /// Category type per interior column (index 0 = grid col 1)
    pub col_types: [CategoryType; 3],

    /// Category value per interior column
    pub col_values: [String; 3],

    /// Whose move it is
    pub turn: Turn,

    /// Terminal result, once the game is over
    pub winner: Option<Winner>,

    /// Whether the game has reached a terminal state
    pub is_complete: bool,

    /// Difficulty this board was generated at
    pub difficulty: Difficulty,

    /// Set only on the first game generated after a tier transition
    pub previous_difficulty: Option<Difficulty>,

    /// Progress toward the next difficulty tier (0–100)
    pub progress_percent: u8,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Game {
    /// Fresh game id (UUID v4)
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Whether `(row, col)` addresses an interior data cell
    pub fn is_interior(row: usize, col: usize) -> bool {
        (1..GRID_SIZE).contains(&row) && (1..GRID_SIZE).contains(&col)
    }

    /// All interior coordinates in row-major order
    pub fn interior_coords() -> impl Iterator<Item = (usize, usize)> {
        (1..GRID_SIZE).flat_map(|row| (1..GRID_SIZE).map(move |col| (row, col)))
    }

    /// Category constraint of an interior row (`row` in 1..=3)
    pub fn row_category(&self, row: usize) -> (CategoryType, &str) {
        (self.row_types[row - 1], self.row_values[row - 1].as_str())
    }

    /// Category constraint of an interior column (`col` in 1..=3)
    pub fn col_category(&self, col: usize) -> (CategoryType, &str) {
        (self.col_types[col - 1], self.col_values[col - 1].as_str())
    }

    /// Whether `record` satisfies both constraints of the interior cell
    pub fn satisfies_cell(&self, row: usize, col: usize, record: &PlayerRecord) -> bool {
        let (row_type, row_value) = self.row_category(row);
        let (col_type, col_value) = self.col_category(col);
        row_type.matches(record, row_value) && col_type.matches(record, col_value)
    }

    /// Occupant of an interior cell, if any
    pub fn player_at(&self, row: usize, col: usize) -> Option<&PlayerRecord> {
        match &self.grid[row][col] {
            GameCell::Data { player, .. } => player.as_ref(),
            _ => None,
        }
    }

    /// Mark on an interior cell, if any
    pub fn mark_at(&self, row: usize, col: usize) -> Option<Mark> {
        match &self.grid[row][col] {
            GameCell::Data { mark, .. } => *mark,
            _ => None,
        }
    }

    /// Interior coordinates not yet marked by either party
    pub fn unmarked_cells(&self) -> Vec<(usize, usize)> {
        Self::interior_coords()
            .filter(|&(row, col)| self.mark_at(row, col).is_none())
            .collect()
    }

    /// Place `mark` on an interior data cell. Panics on header coordinates;
    /// callers validate first.
    pub(crate) fn set_mark(&mut self, row: usize, col: usize, new_mark: Mark) {
        match &mut self.grid[row][col] {
            GameCell::Data { mark, .. } => *mark = Some(new_mark),
            _ => panic!("set_mark on non-data cell ({row}, {col})"),
        }
    }

    /// Replace the occupant of an interior data cell (guess flow)
    pub(crate) fn set_player(&mut self, row: usize, col: usize, record: PlayerRecord) {
        match &mut self.grid[row][col] {
            GameCell::Data { player, .. } => *player = Some(record),
            _ => panic!("set_player on non-data cell ({row}, {col})"),
        }
    }
}
