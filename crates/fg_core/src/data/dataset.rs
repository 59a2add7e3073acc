//! In-memory player dataset accessor.
//!
//! The engine reads everything through this type: full scans for category
//! analysis, filtered search for the API, and index-addressed access for the
//! tiered pools. Records keep their ingestion order: guess ties resolve to
//! the first dataset-order match and pool cursors are defined over stable
//! indices, so the store is an ordered `Vec` rather than a hash index.

use serde::{Deserialize, Serialize};

use crate::models::{CategoryType, PlayerRecord};

/// Ordered, read-only collection of player records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerDataset {
    records: Vec<PlayerRecord>,
}

/// Field filters for `PlayerDataset::search`.
///
/// Every provided field must match (AND-combined); string fields match by
/// case-insensitive substring, the shirt number exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    pub name: Option<String>,
    pub team: Option<String>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub league: Option<String>,
    pub shirt_number: Option<u8>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl SearchFilter {
    fn accepts(&self, record: &PlayerRecord) -> bool {
        let field_ok = |filter: &Option<String>, value: &str| match filter {
            Some(needle) => contains_ci(value, needle),
            None => true,
        };

        field_ok(&self.name, &record.name)
            && field_ok(&self.team, &record.team)
            && field_ok(&self.nationality, &record.nationality)
            && field_ok(&self.position, &record.position)
            && field_ok(&self.league, &record.league)
            && match self.shirt_number {
                Some(n) => record.shirt_number == Some(n),
                None => true,
            }
    }
}

impl PlayerDataset {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in dataset order
    pub fn all(&self) -> &[PlayerRecord] {
        &self.records
    }

    /// Record at a stable dataset index
    pub fn get(&self, index: usize) -> Option<&PlayerRecord> {
        self.records.get(index)
    }

    /// Filtered search; each provided field is a case-insensitive substring
    /// match, AND-combined across fields
    pub fn search(&self, filter: &SearchFilter) -> Vec<&PlayerRecord> {
        self.records.iter().filter(|r| filter.accepts(r)).collect()
    }

    /// Sorted distinct values present in the dataset for a category
    pub fn category_options(&self, category: CategoryType) -> Vec<String> {
        let mut values: Vec<String> = self
            .records
            .iter()
            .flat_map(|r| category.values_of(r))
            .collect();
        values.sort();
        values.dedup();
        values
    }

    /// Dataset indices of records satisfying both halves of a category pair
    pub fn indices_matching_pair(
        &self,
        row_type: CategoryType,
        row_value: &str,
        col_type: CategoryType,
        col_value: &str,
    ) -> impl Iterator<Item = usize> + '_ {
        let row_value = row_value.to_string();
        let col_value = col_value.to_string();
        self.records.iter().enumerate().filter_map(move |(i, r)| {
            (row_type.matches(r, &row_value) && col_type.matches(r, &col_value)).then_some(i)
        })
    }

    /// Count of records satisfying a single category value
    pub fn count_matching(&self, category: CategoryType, value: &str) -> usize {
        self.records
            .iter()
            .filter(|r| category.matches(r, value))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriorityTier;

    fn dataset() -> PlayerDataset {
        let mk = |uid, name: &str, team: &str, nat: &str, pos: &str, league: &str, num| {
            PlayerRecord {
                uid,
                name: name.to_string(),
                team: team.to_string(),
                nationality: nat.to_string(),
                position: pos.to_string(),
                league: league.to_string(),
                shirt_number: num,
                tier: PriorityTier::Famous,
            }
        };
        PlayerDataset::new(vec![
            mk(1, "Lionel Messi", "Inter Miami", "ARG", "RW/CF", "MLS", Some(10)),
            mk(2, "Antoine Griezmann", "Atletico Madrid", "FRA", "AM/ST", "LaLiga", Some(7)),
            mk(3, "Jan Oblak", "Atletico Madrid", "SVN", "GK", "LaLiga", Some(13)),
            mk(4, "Kylian Mbappe", "Real Madrid", "FRA", "ST/LW", "LaLiga", Some(10)),
        ])
    }

    #[test]
    fn test_search_single_field_substring() {
        let ds = dataset();
        let hits = ds.search(&SearchFilter {
            team: Some("madrid".to_string()),
            ..Default::default()
        });
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_search_and_combines_fields() {
        let ds = dataset();
        let hits = ds.search(&SearchFilter {
            team: Some("madrid".to_string()),
            nationality: Some("fra".to_string()),
            ..Default::default()
        });
        let names: Vec<&str> = hits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Antoine Griezmann", "Kylian Mbappe"]);
    }

    #[test]
    fn test_search_shirt_number_exact() {
        let ds = dataset();
        let hits = ds.search(&SearchFilter {
            shirt_number: Some(10),
            ..Default::default()
        });
        assert_eq!(hits.len(), 2);
        let none = ds.search(&SearchFilter {
            shirt_number: Some(99),
            ..Default::default()
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_category_options_sorted_distinct() {
        let ds = dataset();
        assert_eq!(
            ds.category_options(CategoryType::League),
            vec!["LaLiga".to_string(), "MLS".to_string()]
        );
        // Position values are the atomic parts, deduplicated
        let positions = ds.category_options(CategoryType::Position);
        assert!(positions.contains(&"ST".to_string()));
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        // Idempotent across calls with an unchanged dataset
        assert_eq!(
            ds.category_options(CategoryType::Position),
            ds.category_options(CategoryType::Position)
        );
    }

    #[test]
    fn test_indices_matching_pair() {
        let ds = dataset();
        let hits: Vec<usize> = ds
            .indices_matching_pair(CategoryType::Country, "FRA", CategoryType::League, "LaLiga")
            .collect();
        assert_eq!(hits, vec![1, 3]);
    }

    #[test]
    fn test_count_matching() {
        let ds = dataset();
        assert_eq!(ds.count_matching(CategoryType::Team, "Atletico Madrid"), 2);
        assert_eq!(ds.count_matching(CategoryType::Position, "GK"), 1);
    }
}
