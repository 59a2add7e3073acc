//! Tiered, shuffled record pools.
//!
//! Each priority tier gets its own randomized ordering of dataset indices
//! with an independent forward cursor. Drawing scans from the cursor, wraps
//! around once, and advances past the returned record, which keeps repeat
//! picks rare within and across games of one session. A wrap that yields no
//! candidate reshuffles the pool and reports `None` so the caller can fall
//! back to the unrestricted candidate set.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::PlayerDataset;
use crate::models::{CategoryType, PriorityTier};

/// Which pool to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    Famous,
    Medium,
    Obscure,
    /// Every record regardless of tier; used once tier minimums are met
    All,
}

impl PoolKind {
    pub fn from_tier(tier: PriorityTier) -> Self {
        match tier {
            PriorityTier::Famous => PoolKind::Famous,
            PriorityTier::Medium => PoolKind::Medium,
            PriorityTier::Obscure => PoolKind::Obscure,
            PriorityTier::Unranked => PoolKind::All,
        }
    }

    fn index(&self) -> usize {
        match self {
            PoolKind::Famous => 0,
            PoolKind::Medium => 1,
            PoolKind::Obscure => 2,
            PoolKind::All => 3,
        }
    }
}

/// Both axis constraints of one interior cell
#[derive(Debug, Clone, Copy)]
pub struct CellConstraint<'a> {
    pub row_type: CategoryType,
    pub row_value: &'a str,
    pub col_type: CategoryType,
    pub col_value: &'a str,
}

impl CellConstraint<'_> {
    pub fn matches(&self, record: &crate::models::PlayerRecord) -> bool {
        self.row_type.matches(record, self.row_value)
            && self.col_type.matches(record, self.col_value)
    }
}

#[derive(Debug, Clone, Default)]
struct ShuffledPool {
    order: Vec<usize>,
    cursor: usize,
}

impl ShuffledPool {
    /// Scan one full wrap from the cursor; advance past a hit.
    fn draw(
        &mut self,
        rng: &mut impl Rng,
        dataset: &PlayerDataset,
        constraint: &CellConstraint<'_>,
        used: &HashSet<usize>,
    ) -> Option<usize> {
        let len = self.order.len();
        if len == 0 {
            return None;
        }
        for step in 0..len {
            let slot = (self.cursor + step) % len;
            let index = self.order[slot];
            if used.contains(&index) {
                continue;
            }
            let record = dataset.get(index)?;
            if constraint.matches(record) {
                self.cursor = (slot + 1) % len;
                return Some(index);
            }
        }
        // Barren wrap: reshuffle so the next draw sees a fresh ordering
        self.order.shuffle(rng);
        self.cursor = 0;
        None
    }
}

/// Per-session tiered pools with wrap-around cursors
#[derive(Debug, Clone, Default)]
pub struct PriorityPool {
    pools: Option<[ShuffledPool; 4]>,
}

impl PriorityPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all pools; they rebuild (reshuffled) on the next draw
    pub fn reset(&mut self) {
        self.pools = None;
    }

    fn ensure_built(&mut self, rng: &mut impl Rng, dataset: &PlayerDataset) {
        if self.pools.is_some() {
            return;
        }
        fn tier_pool(
            tier: PriorityTier,
            rng: &mut impl Rng,
            dataset: &PlayerDataset,
        ) -> ShuffledPool {
            let mut order: Vec<usize> = dataset
                .all()
                .iter()
                .enumerate()
                .filter_map(|(i, r)| (r.tier == tier).then_some(i))
                .collect();
            order.shuffle(rng);
            ShuffledPool { order, cursor: 0 }
        }
        let mut all: Vec<usize> = (0..dataset.len()).collect();
        all.shuffle(rng);

        self.pools = Some([
            tier_pool(PriorityTier::Famous, rng, dataset),
            tier_pool(PriorityTier::Medium, rng, dataset),
            tier_pool(PriorityTier::Obscure, rng, dataset),
            ShuffledPool {
                order: all,
                cursor: 0,
            },
        ]);
    }

    /// Draw a record for one cell from the requested pool.
    ///
    /// Returns the dataset index of an unused record matching both axis
    /// constraints, or `None` after a barren wrap (the pool has been
    /// reshuffled; the caller decides on a fallback).
    pub fn draw(
        &mut self,
        rng: &mut impl Rng,
        dataset: &PlayerDataset,
        constraint: &CellConstraint<'_>,
        kind: PoolKind,
        used: &HashSet<usize>,
    ) -> Option<usize> {
        self.ensure_built(rng, dataset);
        let pools = self.pools.as_mut().expect("pools built above");
        pools[kind.index()].draw(rng, dataset, constraint, used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRecord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn record(uid: u32, name: &str, country: &str, tier: PriorityTier) -> PlayerRecord {
        PlayerRecord {
            uid,
            name: name.to_string(),
            team: "Arsenal".to_string(),
            nationality: country.to_string(),
            position: "ST".to_string(),
            league: "Premier League".to_string(),
            shirt_number: None,
            tier,
        }
    }

    fn dataset() -> PlayerDataset {
        PlayerDataset::new(vec![
            record(1, "A", "ENG", PriorityTier::Famous),
            record(2, "B", "ENG", PriorityTier::Famous),
            record(3, "C", "FRA", PriorityTier::Medium),
            record(4, "D", "ENG", PriorityTier::Obscure),
        ])
    }

    fn constraint() -> CellConstraint<'static> {
        CellConstraint {
            row_type: CategoryType::Country,
            row_value: "ENG",
            col_type: CategoryType::Position,
            col_value: "ST",
        }
    }

    #[test]
    fn test_draw_respects_tier_pool() {
        let ds = dataset();
        let mut rng = test_rng();
        let mut pool = PriorityPool::new();
        let used = HashSet::new();

        let idx = pool
            .draw(&mut rng, &ds, &constraint(), PoolKind::Famous, &used)
            .expect("famous pool has ENG strikers");
        assert_eq!(ds.get(idx).unwrap().tier, PriorityTier::Famous);
    }

    #[test]
    fn test_draw_skips_used_records() {
        let ds = dataset();
        let mut rng = test_rng();
        let mut pool = PriorityPool::new();
        let mut used = HashSet::new();

        let first = pool
            .draw(&mut rng, &ds, &constraint(), PoolKind::Famous, &used)
            .unwrap();
        used.insert(first);
        let second = pool
            .draw(&mut rng, &ds, &constraint(), PoolKind::Famous, &used)
            .unwrap();
        assert_ne!(first, second);

        used.insert(second);
        // Both famous ENG records taken: barren wrap
        assert_eq!(
            pool.draw(&mut rng, &ds, &constraint(), PoolKind::Famous, &used),
            None
        );
    }

    #[test]
    fn test_draw_advances_cursor_between_calls() {
        let ds = dataset();
        let mut rng = test_rng();
        let mut pool = PriorityPool::new();
        let used = HashSet::new();

        let first = pool
            .draw(&mut rng, &ds, &constraint(), PoolKind::Famous, &used)
            .unwrap();
        // Without marking it used, the cursor still moves past it
        let second = pool
            .draw(&mut rng, &ds, &constraint(), PoolKind::Famous, &used)
            .unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_no_candidate_in_tier_returns_none() {
        let ds = dataset();
        let mut rng = test_rng();
        let mut pool = PriorityPool::new();
        let used = HashSet::new();

        let c = CellConstraint {
            row_type: CategoryType::Country,
            row_value: "BRA",
            col_type: CategoryType::Position,
            col_value: "ST",
        };
        assert_eq!(pool.draw(&mut rng, &ds, &c, PoolKind::All, &used), None);
    }

    #[test]
    fn test_all_pool_spans_tiers() {
        let ds = dataset();
        let mut rng = test_rng();
        let mut pool = PriorityPool::new();
        let mut used = HashSet::new();

        let mut tiers = Vec::new();
        while let Some(idx) = pool.draw(&mut rng, &ds, &constraint(), PoolKind::All, &used) {
            used.insert(idx);
            tiers.push(ds.get(idx).unwrap().tier);
        }
        // ENG strikers exist in famous and obscure tiers
        assert_eq!(tiers.len(), 3);
        assert!(tiers.contains(&PriorityTier::Obscure));
    }
}
