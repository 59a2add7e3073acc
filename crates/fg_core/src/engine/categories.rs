//! Category axis selection.
//!
//! Randomized generate-and-test: shuffle the five category types, split them
//! into disjoint row/column pools, sample one value per axis slot with a bias
//! toward well-populated values, then validate the whole layout against the
//! board invariants and per-cell feasibility. The attempt budget and the
//! deterministic fallback layout are first-class configuration; the result
//! reports which path produced the layout.

use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::PlayerDataset;
use crate::models::{CategoryType, Difficulty};

/// Values with at least this many matching records form the preferred
/// sampling bucket.
const EASY_MATCH_COUNT: usize = 5;

/// Mid bucket threshold, tried when no value reaches `EASY_MATCH_COUNT`.
const MID_MATCH_COUNT: usize = 2;

/// Attempt budget and fallback layout for the selector
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Full-constraint attempts before the relaxed retry pass
    pub max_attempts: u32,
    /// Relaxed attempts before the deterministic fallback
    pub retry_attempts: u32,
    /// Row types of the deterministic fallback layout
    pub fallback_rows: [CategoryType; 3],
    /// Column types of the deterministic fallback layout
    pub fallback_cols: [CategoryType; 3],
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 200,
            retry_attempts: 50,
            fallback_rows: [
                CategoryType::Country,
                CategoryType::Position,
                CategoryType::Position,
            ],
            fallback_cols: [
                CategoryType::League,
                CategoryType::Team,
                CategoryType::Team,
            ],
        }
    }
}

/// The six `(type, value)` constraints of one board
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLayout {
    pub row_types: [CategoryType; 3],
    pub row_values: [String; 3],
    pub col_types: [CategoryType; 3],
    pub col_values: [String; 3],
}

impl CategoryLayout {
    fn values(&self) -> impl Iterator<Item = &str> {
        self.row_values
            .iter()
            .chain(self.col_values.iter())
            .map(String::as_str)
    }
}

/// Which path produced the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// Randomized search succeeded
    Found,
    /// Deterministic fallback layout with validated values
    Fallback,
    /// Fallback layout with first-available values; cells may be infeasible
    Degraded,
}

/// Selector result
#[derive(Debug, Clone)]
pub struct CategorySelection {
    pub layout: CategoryLayout,
    pub outcome: SelectionOutcome,
}

/// Distinct values per category with their record match counts, computed once
/// per selection.
struct ValueCounts {
    by_type: HashMap<CategoryType, Vec<(String, usize)>>,
}

impl ValueCounts {
    fn build(dataset: &PlayerDataset) -> Self {
        let mut by_type = HashMap::new();
        for &category in CategoryType::all() {
            let counts: Vec<(String, usize)> = dataset
                .category_options(category)
                .into_iter()
                .map(|value| {
                    let count = dataset.count_matching(category, &value);
                    (value, count)
                })
                .collect();
            by_type.insert(category, counts);
        }
        Self { by_type }
    }

    fn options(&self, category: CategoryType) -> &[(String, usize)] {
        self.by_type
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Choose 3 row + 3 column category constraints for `difficulty`.
pub fn select(
    dataset: &PlayerDataset,
    difficulty: Difficulty,
    rng: &mut impl Rng,
    config: &SelectorConfig,
) -> CategorySelection {
    let counts = ValueCounts::build(dataset);

    for _ in 0..config.max_attempts {
        if let Some(layout) = attempt(dataset, &counts, difficulty, rng, false) {
            return CategorySelection {
                layout,
                outcome: SelectionOutcome::Found,
            };
        }
    }

    // Simplified retry: uniform value sampling, no tier admissibility
    for _ in 0..config.retry_attempts {
        if let Some(layout) = attempt(dataset, &counts, difficulty, rng, true) {
            return CategorySelection {
                layout,
                outcome: SelectionOutcome::Found,
            };
        }
    }

    log::warn!(
        "category search exhausted ({} + {} attempts), using fallback layout",
        config.max_attempts,
        config.retry_attempts
    );
    fallback_selection(dataset, &counts, difficulty, rng, config)
}

/// One randomized attempt. `relaxed` drops the match-count bias and the tier
/// admissibility requirement.
fn attempt(
    dataset: &PlayerDataset,
    counts: &ValueCounts,
    difficulty: Difficulty,
    rng: &mut impl Rng,
    relaxed: bool,
) -> Option<CategoryLayout> {
    let mut types: Vec<CategoryType> = CategoryType::all().to_vec();
    types.shuffle(rng);
    let split = rng.gen_range(1..types.len());
    let (row_pool, col_pool) = types.split_at(split);

    // Team and League may never face each other across the axes
    let crossed = |a: &[CategoryType], b: &[CategoryType]| {
        a.contains(&CategoryType::Team) && b.contains(&CategoryType::League)
    };
    if crossed(row_pool, col_pool) || crossed(col_pool, row_pool) {
        return None;
    }

    let row_types = choose_axis_types(row_pool, rng)?;
    let col_types = choose_axis_types(col_pool, rng)?;

    let mut chosen = HashSet::new();
    let row_values = sample_axis_values(&row_types, counts, &mut chosen, rng, relaxed)?;
    let col_values = sample_axis_values(&col_types, counts, &mut chosen, rng, relaxed)?;

    let layout = CategoryLayout {
        row_types,
        row_values,
        col_types,
        col_values,
    };
    validate_layout(dataset, &layout, difficulty, relaxed).then_some(layout)
}

/// Pick 3 types for one axis from its pool: every required type the pool
/// holds must appear, remaining slots are uniform draws (repetition allowed).
fn choose_axis_types(pool: &[CategoryType], rng: &mut impl Rng) -> Option<[CategoryType; 3]> {
    let mut picked: Vec<CategoryType> = pool
        .iter()
        .copied()
        .filter(|t| CategoryType::required().contains(t))
        .collect();
    if picked.len() > 3 {
        return None;
    }
    while picked.len() < 3 {
        picked.push(pool[rng.gen_range(0..pool.len())]);
    }
    picked.shuffle(rng);
    Some([picked[0], picked[1], picked[2]])
}

fn sample_axis_values(
    axis_types: &[CategoryType; 3],
    counts: &ValueCounts,
    chosen: &mut HashSet<String>,
    rng: &mut impl Rng,
    relaxed: bool,
) -> Option<[String; 3]> {
    let mut values = Vec::with_capacity(3);
    for &category in axis_types {
        let value = sample_value(category, counts, chosen, rng, relaxed)?;
        chosen.insert(value.clone());
        values.push(value);
    }
    Some([values.remove(0), values.remove(0), values.remove(0)])
}

/// Sample one unchosen value for `category`, biased toward values with many
/// matching records: the ≥5 bucket first, then ≥2, then the rest.
fn sample_value(
    category: CategoryType,
    counts: &ValueCounts,
    chosen: &HashSet<String>,
    rng: &mut impl Rng,
    relaxed: bool,
) -> Option<String> {
    let available: Vec<&(String, usize)> = counts
        .options(category)
        .iter()
        .filter(|(value, _)| !chosen.contains(value))
        .collect();
    if available.is_empty() {
        return None;
    }

    if relaxed {
        return Some(available[rng.gen_range(0..available.len())].0.clone());
    }

    for threshold in [EASY_MATCH_COUNT, MID_MATCH_COUNT, 1] {
        let bucket: Vec<&&(String, usize)> = available
            .iter()
            .filter(|(_, count)| *count >= threshold)
            .collect();
        if !bucket.is_empty() {
            return Some(bucket[rng.gen_range(0..bucket.len())].0.clone());
        }
    }
    None
}

/// Check every board invariant the selector is responsible for.
///
/// `relaxed` skips the tier admissibility part of the feasibility check.
pub fn validate_layout(
    dataset: &PlayerDataset,
    layout: &CategoryLayout,
    difficulty: Difficulty,
    relaxed: bool,
) -> bool {
    // Disjoint axis type sets
    if layout
        .row_types
        .iter()
        .any(|t| layout.col_types.contains(t))
    {
        return false;
    }

    // Team/League coherence
    let has = |types: &[CategoryType; 3], t: CategoryType| types.contains(&t);
    if (has(&layout.row_types, CategoryType::Team) && has(&layout.col_types, CategoryType::League))
        || (has(&layout.row_types, CategoryType::League)
            && has(&layout.col_types, CategoryType::Team))
    {
        return false;
    }

    // All four required types covered across both axes
    let union: HashSet<CategoryType> = layout
        .row_types
        .iter()
        .chain(layout.col_types.iter())
        .copied()
        .collect();
    if !CategoryType::required().iter().all(|t| union.contains(t)) {
        return false;
    }

    // Six pairwise distinct values
    let values: HashSet<&str> = layout.values().collect();
    if values.len() != 6 {
        return false;
    }

    // No trivial self-referential cell
    for (&row_type, row_value) in layout.row_types.iter().zip(layout.row_values.iter()) {
        for (&col_type, col_value) in layout.col_types.iter().zip(layout.col_values.iter()) {
            if row_type == col_type && row_value == col_value {
                return false;
            }
        }
    }

    // Every cell feasible, and distinct records assignable to all nine cells
    // at once (per-pair matches alone let two cells compete for one record)
    let admissible = difficulty.admissible_tiers();
    let candidates = |cell: usize| -> Vec<usize> {
        let (row_type, row_value) = (layout.row_types[cell / 3], &layout.row_values[cell / 3]);
        let (col_type, col_value) = (layout.col_types[cell % 3], &layout.col_values[cell % 3]);
        dataset
            .indices_matching_pair(row_type, row_value, col_type, col_value)
            .filter(|&idx| {
                relaxed
                    || dataset
                        .get(idx)
                        .map(|r| admissible.contains(&r.tier))
                        .unwrap_or(false)
            })
            .collect()
    };
    crate::engine::assignment::full_assignment_exists(&candidates)
}

/// Deterministic fallback: fixed type layout, values re-derived by the same
/// matching checks, degrading to first-available values when even that fails.
fn fallback_selection(
    dataset: &PlayerDataset,
    counts: &ValueCounts,
    difficulty: Difficulty,
    rng: &mut impl Rng,
    config: &SelectorConfig,
) -> CategorySelection {
    for relaxed in [false, true] {
        for _ in 0..config.retry_attempts {
            let mut chosen = HashSet::new();
            let row_values =
                sample_axis_values(&config.fallback_rows, counts, &mut chosen, rng, relaxed);
            let col_values =
                sample_axis_values(&config.fallback_cols, counts, &mut chosen, rng, relaxed);
            if let (Some(row_values), Some(col_values)) = (row_values, col_values) {
                let layout = CategoryLayout {
                    row_types: config.fallback_rows,
                    row_values,
                    col_types: config.fallback_cols,
                    col_values,
                };
                if validate_layout(dataset, &layout, difficulty, relaxed) {
                    return CategorySelection {
                        layout,
                        outcome: SelectionOutcome::Fallback,
                    };
                }
            }
        }
    }

    log::warn!("fallback value search failed, degrading to first available values");
    CategorySelection {
        layout: first_available_layout(counts, config),
        outcome: SelectionOutcome::Degraded,
    }
}

/// Last resort: first value per type slot not already taken. Cells of this
/// layout may have no matching record; the board builder leaves those empty.
fn first_available_layout(counts: &ValueCounts, config: &SelectorConfig) -> CategoryLayout {
    let mut chosen: HashSet<String> = HashSet::new();
    let mut next_value = |category: CategoryType| -> String {
        let options = counts.options(category);
        let value = options
            .iter()
            .map(|(v, _)| v)
            .find(|v| !chosen.contains(*v))
            .or_else(|| options.first().map(|(v, _)| v))
            .cloned()
            .unwrap_or_default();
        chosen.insert(value.clone());
        value
    };

    let row_values = config.fallback_rows.map(&mut next_value);
    let col_values = config.fallback_cols.map(&mut next_value);
    CategoryLayout {
        row_types: config.fallback_rows,
        row_values,
        col_types: config.fallback_cols,
        col_values,
    }
}
