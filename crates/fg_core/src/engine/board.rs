//! Board assembly.
//!
//! Turns a validated category layout into the 4×4 grid: header row/column
//! from the layout, interior cells populated in row-major order from the
//! tiered pools. Tier targets for the nine cells come from the difficulty
//! quota, shuffled so tiers are not tied to positions on the board. A cell
//! whose pools come up empty falls back to the first untaken matching record
//! (famous-only on easy), then to an augmenting relocation of earlier picks;
//! only when no assignment exists at all is the cell left without an
//! occupant.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::PlayerDataset;
use crate::models::{Difficulty, GameCell, PriorityTier, GRID_SIZE, INTERIOR_CELLS};

use super::assignment::CellAssignment;
use super::categories::CategoryLayout;
use super::pool::{CellConstraint, PoolKind, PriorityPool};

/// Assembled grid plus population diagnostics
#[derive(Debug, Clone)]
pub struct BuiltBoard {
    pub grid: [[GameCell; GRID_SIZE]; GRID_SIZE],
    /// True when at least one interior cell has no occupant
    pub degraded: bool,
}

fn cell_constraint<'a>(layout: &'a CategoryLayout, cell: usize) -> CellConstraint<'a> {
    CellConstraint {
        row_type: layout.row_types[cell / 3],
        row_value: &layout.row_values[cell / 3],
        col_type: layout.col_types[cell % 3],
        col_value: &layout.col_values[cell % 3],
    }
}

/// Eligible records of one cell for the fallback/repair paths: any matching
/// record, restricted to famous on easy so the easy-tier guarantee survives
/// degraded population.
fn fallback_candidates(
    dataset: &PlayerDataset,
    layout: &CategoryLayout,
    difficulty: Difficulty,
    cell: usize,
) -> Vec<usize> {
    let constraint = cell_constraint(layout, cell);
    dataset
        .all()
        .iter()
        .enumerate()
        .filter(|(_, r)| constraint.matches(r))
        .filter(|(_, r)| difficulty != Difficulty::Easy || r.tier == PriorityTier::Famous)
        .map(|(i, _)| i)
        .collect()
}

/// Populate the full grid for `layout` at `difficulty`.
pub fn build(
    dataset: &PlayerDataset,
    layout: &CategoryLayout,
    difficulty: Difficulty,
    pool: &mut PriorityPool,
    rng: &mut impl Rng,
) -> BuiltBoard {
    let mut targets = difficulty.cell_tier_targets();
    targets.shuffle(rng);

    let mut assignment = CellAssignment::new();
    for cell in 0..INTERIOR_CELLS {
        let constraint = cell_constraint(layout, cell);
        let used: std::collections::HashSet<usize> = assignment.used().keys().copied().collect();

        if let Some(index) = pool.draw(
            rng,
            dataset,
            &constraint,
            PoolKind::from_tier(targets[cell]),
            &used,
        ) {
            assignment.place(cell, index);
            continue;
        }

        // Tier pool exhausted for this cell: first untaken match from the
        // unrestricted candidate set
        let direct = fallback_candidates(dataset, layout, difficulty, cell)
            .into_iter()
            .find(|index| !used.contains(index));
        if let Some(index) = direct {
            assignment.place(cell, index);
            continue;
        }

        // Every candidate is taken: relocate earlier picks if possible
        let candidates =
            |cell: usize| -> Vec<usize> { fallback_candidates(dataset, layout, difficulty, cell) };
        if !assignment.try_assign(cell, &candidates) {
            log::warn!(
                "no eligible record for cell ({}, {}), leaving it empty",
                cell / 3 + 1,
                cell % 3 + 1
            );
        }
    }

    materialize(dataset, layout, &assignment)
}

fn materialize(
    dataset: &PlayerDataset,
    layout: &CategoryLayout,
    assignment: &CellAssignment,
) -> BuiltBoard {
    let mut grid: [[GameCell; GRID_SIZE]; GRID_SIZE] =
        std::array::from_fn(|_| std::array::from_fn(|_| GameCell::Blank));

    for col in 1..GRID_SIZE {
        grid[0][col] = GameCell::Header {
            category: layout.col_types[col - 1],
        };
    }
    for row in 1..GRID_SIZE {
        grid[row][0] = GameCell::Header {
            category: layout.row_types[row - 1],
        };
    }

    let mut degraded = false;
    for cell in 0..INTERIOR_CELLS {
        let player = assignment
            .record_for(cell)
            .and_then(|index| dataset.get(index))
            .cloned();
        if player.is_none() {
            degraded = true;
        }
        grid[cell / 3 + 1][cell % 3 + 1] = GameCell::Data { player, mark: None };
    }

    BuiltBoard { grid, degraded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::categories::{select, SelectorConfig};
    use crate::engine::fixtures::{nine_perfect_dataset, squad_dataset};
    use crate::models::CategoryType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    fn build_once(
        dataset: &crate::data::PlayerDataset,
        difficulty: Difficulty,
        rng: &mut StdRng,
    ) -> (CategoryLayout, BuiltBoard) {
        let selection = select(dataset, difficulty, rng, &SelectorConfig::default());
        let mut pool = PriorityPool::new();
        let board = build(dataset, &selection.layout, difficulty, &mut pool, rng);
        (selection.layout, board)
    }

    #[test]
    fn test_grid_shape() {
        let ds = squad_dataset();
        let mut rng = test_rng();
        let (layout, board) = build_once(&ds, Difficulty::Easy, &mut rng);

        assert_eq!(board.grid[0][0], GameCell::Blank);
        for i in 1..GRID_SIZE {
            assert_eq!(
                board.grid[0][i],
                GameCell::Header {
                    category: layout.col_types[i - 1]
                }
            );
            assert_eq!(
                board.grid[i][0],
                GameCell::Header {
                    category: layout.row_types[i - 1]
                }
            );
        }
        for row in 1..GRID_SIZE {
            for col in 1..GRID_SIZE {
                assert!(matches!(board.grid[row][col], GameCell::Data { .. }));
            }
        }
    }

    #[test]
    fn test_occupants_satisfy_both_axes_and_are_distinct() {
        let ds = squad_dataset();
        let mut rng = test_rng();
        let (layout, board) = build_once(&ds, Difficulty::Medium, &mut rng);

        let mut seen = HashSet::new();
        for row in 1..GRID_SIZE {
            for col in 1..GRID_SIZE {
                if let GameCell::Data {
                    player: Some(player),
                    ..
                } = &board.grid[row][col]
                {
                    assert!(layout.row_types[row - 1].matches(player, &layout.row_values[row - 1]));
                    assert!(layout.col_types[col - 1].matches(player, &layout.col_values[col - 1]));
                    assert!(seen.insert(player.uid), "record used twice: {}", player.name);
                }
            }
        }
    }

    #[test]
    fn test_easy_board_is_famous_only_and_full() {
        let ds = squad_dataset();
        let mut rng = test_rng();
        let (_, board) = build_once(&ds, Difficulty::Easy, &mut rng);

        assert!(!board.degraded);
        for row in 1..GRID_SIZE {
            for col in 1..GRID_SIZE {
                match &board.grid[row][col] {
                    GameCell::Data {
                        player: Some(player),
                        ..
                    } => assert_eq!(player.tier, PriorityTier::Famous),
                    other => panic!("unexpected cell {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_hard_board_meets_tier_quota() {
        let ds = squad_dataset();
        let mut rng = test_rng();
        let (_, board) = build_once(&ds, Difficulty::Hard, &mut rng);

        let mut famous = 0;
        let mut medium = 0;
        let mut obscure = 0;
        for row in 1..GRID_SIZE {
            for col in 1..GRID_SIZE {
                if let GameCell::Data {
                    player: Some(player),
                    ..
                } = &board.grid[row][col]
                {
                    match player.tier {
                        PriorityTier::Famous => famous += 1,
                        PriorityTier::Medium => medium += 1,
                        PriorityTier::Obscure => obscure += 1,
                        PriorityTier::Unranked => {}
                    }
                }
            }
        }
        assert!(famous >= 3, "famous quota missed: {famous}");
        assert!(medium >= 3, "medium quota missed: {medium}");
        assert!(obscure >= 3, "obscure quota missed: {obscure}");
    }

    #[test]
    fn test_perfect_nine_record_dataset_fills_every_cell() {
        let ds = nine_perfect_dataset();
        let mut rng = test_rng();
        let (_, board) = build_once(&ds, Difficulty::Easy, &mut rng);

        assert!(!board.degraded);
        let mut uids = HashSet::new();
        for row in 1..GRID_SIZE {
            for col in 1..GRID_SIZE {
                match &board.grid[row][col] {
                    GameCell::Data {
                        player: Some(player),
                        ..
                    } => assert!(uids.insert(player.uid)),
                    other => panic!("cell ({row}, {col}) left empty: {other:?}"),
                }
            }
        }
        assert_eq!(uids.len(), 9);
    }

    #[test]
    fn test_infeasible_cell_left_empty() {
        // Hand-built layout with impossible pairs: the only JPN player is at
        // Real Sociedad, so (JPN, Arsenal) and (JPN, Sevilla) cannot be filled
        let ds = squad_dataset();
        let mut rng = test_rng();
        let layout = CategoryLayout {
            row_types: [
                CategoryType::Country,
                CategoryType::Country,
                CategoryType::Position,
            ],
            row_values: ["ENG".to_string(), "JPN".to_string(), "GK".to_string()],
            col_types: [
                CategoryType::Team,
                CategoryType::Team,
                CategoryType::League,
            ],
            col_values: [
                "Arsenal".to_string(),
                "Sevilla".to_string(),
                "LaLiga".to_string(),
            ],
        };
        let mut pool = PriorityPool::new();
        let board = build(&ds, &layout, Difficulty::Hard, &mut pool, &mut rng);

        assert!(board.degraded);
        // (JPN, Arsenal) has no record; Kubo is the only JPN player
        assert_eq!(
            board.grid[2][1],
            GameCell::Data {
                player: None,
                mark: None
            }
        );
    }
}
