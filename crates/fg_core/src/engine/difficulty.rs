//! Cross-game difficulty progression.
//!
//! Five consecutive user wins at a tier advance to the next one; a loss or
//! draw resets the streak. The tracker is plain data so a stateless host can
//! snapshot it between calls and restore it into a fresh session.

use serde::{Deserialize, Serialize};

use crate::models::{Difficulty, GameOutcome};

/// Consecutive wins required to advance one tier
pub const WINS_PER_LEVEL: u8 = 5;

/// Persistable snapshot of the progression state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyState {
    pub difficulty: Difficulty,
    pub win_counter: u8,
    pub last_outcome: Option<GameOutcome>,
}

/// Progression state machine
#[derive(Debug, Clone)]
pub struct DifficultyTracker {
    difficulty: Difficulty,
    win_counter: u8,
    last_outcome: Option<GameOutcome>,
    /// Latched on advancement, consumed by the next generation so it can
    /// stamp `previous_difficulty` on the first game of the new tier
    advanced_from: Option<Difficulty>,
}

impl Default for DifficultyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyTracker {
    pub fn new() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            win_counter: 0,
            last_outcome: None,
            advanced_from: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn win_counter(&self) -> u8 {
        self.win_counter
    }

    /// Back to easy with a clean streak
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Fold one completed game into the progression
    pub fn record_outcome(&mut self, outcome: GameOutcome) {
        self.last_outcome = Some(outcome);
        match outcome {
            GameOutcome::Win => {
                self.win_counter = self.win_counter.saturating_add(1);
                if self.win_counter >= WINS_PER_LEVEL {
                    if let Some(next) = self.difficulty.next() {
                        self.advanced_from = Some(self.difficulty);
                        self.difficulty = next;
                        self.win_counter = 0;
                    }
                }
            }
            GameOutcome::Loss | GameOutcome::Draw => {
                self.win_counter = 0;
            }
        }
    }

    /// Progress toward the next tier as a percentage. Hard is terminal and
    /// reports a full bar.
    pub fn progress_percent(&self) -> u8 {
        match self.difficulty {
            Difficulty::Hard => 100,
            _ => {
                let percent = u32::from(self.win_counter) * 100 / u32::from(WINS_PER_LEVEL);
                percent.min(100) as u8
            }
        }
    }

    /// Consume the latched tier transition, if one happened since the last
    /// generation
    pub fn take_advanced_from(&mut self) -> Option<Difficulty> {
        self.advanced_from.take()
    }

    pub fn snapshot(&self) -> DifficultyState {
        DifficultyState {
            difficulty: self.difficulty,
            win_counter: self.win_counter,
            last_outcome: self.last_outcome,
        }
    }

    /// Replace difficulty, counter, and last outcome atomically
    pub fn restore(&mut self, state: DifficultyState) {
        self.difficulty = state.difficulty;
        self.win_counter = state.win_counter;
        self.last_outcome = state.last_outcome;
        self.advanced_from = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_wins_advance_one_tier() {
        let mut tracker = DifficultyTracker::new();
        for _ in 0..4 {
            tracker.record_outcome(GameOutcome::Win);
            assert_eq!(tracker.difficulty(), Difficulty::Easy);
        }
        tracker.record_outcome(GameOutcome::Win);
        assert_eq!(tracker.difficulty(), Difficulty::Medium);
        assert_eq!(tracker.win_counter(), 0);
        assert_eq!(tracker.take_advanced_from(), Some(Difficulty::Easy));
        assert_eq!(tracker.take_advanced_from(), None);
    }

    #[test]
    fn test_loss_resets_streak_without_regressing() {
        let mut tracker = DifficultyTracker::new();
        for _ in 0..3 {
            tracker.record_outcome(GameOutcome::Win);
        }
        tracker.record_outcome(GameOutcome::Loss);
        assert_eq!(tracker.difficulty(), Difficulty::Easy);
        assert_eq!(tracker.win_counter(), 0);

        tracker.record_outcome(GameOutcome::Draw);
        assert_eq!(tracker.win_counter(), 0);
    }

    #[test]
    fn test_progress_percent() {
        let mut tracker = DifficultyTracker::new();
        assert_eq!(tracker.progress_percent(), 0);
        tracker.record_outcome(GameOutcome::Win);
        assert_eq!(tracker.progress_percent(), 20);
        tracker.record_outcome(GameOutcome::Win);
        assert_eq!(tracker.progress_percent(), 40);
    }

    #[test]
    fn test_hard_is_terminal_with_full_bar() {
        let mut tracker = DifficultyTracker::new();
        tracker.restore(DifficultyState {
            difficulty: Difficulty::Hard,
            win_counter: 0,
            last_outcome: None,
        });
        for _ in 0..10 {
            tracker.record_outcome(GameOutcome::Win);
        }
        assert_eq!(tracker.difficulty(), Difficulty::Hard);
        assert_eq!(tracker.progress_percent(), 100);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut tracker = DifficultyTracker::new();
        tracker.record_outcome(GameOutcome::Win);
        tracker.record_outcome(GameOutcome::Win);
        let state = tracker.snapshot();

        let mut restored = DifficultyTracker::new();
        restored.restore(state.clone());
        assert_eq!(restored.snapshot(), state);

        // Behavior after restore matches the original tracker
        restored.record_outcome(GameOutcome::Win);
        tracker.record_outcome(GameOutcome::Win);
        assert_eq!(restored.snapshot(), tracker.snapshot());
    }
}
