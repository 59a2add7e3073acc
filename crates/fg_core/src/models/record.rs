use serde::{Deserialize, Serialize};

/// Priority tier classifying how recognizable a player is.
///
/// Used to gate record selection per difficulty level: easy boards draw from
/// famous players only, hard boards mix in obscure ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum PriorityTier {
    /// No ranking assigned (0 or absent in the source data)
    Unranked = 0,
    /// Household names (tier 1)
    Famous = 1,
    /// Recognizable to regular followers (tier 2)
    Medium = 2,
    /// Known mostly to dedicated fans (tier 3)
    Obscure = 3,
}

impl PriorityTier {
    /// Get all ranked tiers in ascending obscurity order
    pub fn ranked() -> &'static [PriorityTier] {
        &[
            PriorityTier::Famous,
            PriorityTier::Medium,
            PriorityTier::Obscure,
        ]
    }

    /// Parse from the numeric source encoding (0/absent = unranked)
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => PriorityTier::Famous,
            2 => PriorityTier::Medium,
            3 => PriorityTier::Obscure,
            _ => PriorityTier::Unranked,
        }
    }

    /// Numeric source encoding
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl Default for PriorityTier {
    fn default() -> Self {
        PriorityTier::Unranked
    }
}

/// Immutable dataset row describing one player.
///
/// Owned by the dataset accessor; the engine only ever reads these.
/// Field set matches the squads CSV export
/// (`Name, Team, Country, Position, League, Shirt Number`) plus the uid
/// assigned at ingestion and the optional priority tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Unique identifier (1-based CSV row index, assigned at ingestion)
    pub uid: u32,

    /// Real player name (e.g., "Lionel Messi")
    pub name: String,

    /// Current team (e.g., "FC Barcelona")
    pub team: String,

    /// Nationality (3-letter country code, e.g., "ARG", "POR", "FRA")
    pub nationality: String,

    /// Position, possibly compound (e.g., "AM/LW/ST")
    pub position: String,

    /// League the player's team competes in (e.g., "Premier League")
    pub league: String,

    /// Shirt number, when the source had one
    #[serde(default)]
    pub shirt_number: Option<u8>,

    /// Priority tier (absent in the source = unranked)
    #[serde(default)]
    pub tier: PriorityTier,
}

impl PlayerRecord {
    /// Iterate the atomic positions of a possibly compound position string.
    ///
    /// Splits on `/` and `,` so both `"AM/LW/ST"` and `"AM, ST"` yield their
    /// parts.
    pub fn positions(&self) -> impl Iterator<Item = &str> {
        self.position
            .split(|c| c == '/' || c == ',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Whether the record lists `value` among its positions (exact,
    /// case-insensitive per atomic position).
    pub fn plays_position(&self, value: &str) -> bool {
        self.positions().any(|p| p.eq_ignore_ascii_case(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: &str) -> PlayerRecord {
        PlayerRecord {
            uid: 1,
            name: "Test Player".to_string(),
            team: "Test FC".to_string(),
            nationality: "ESP".to_string(),
            position: position.to_string(),
            league: "Test League".to_string(),
            shirt_number: Some(10),
            tier: PriorityTier::Famous,
        }
    }

    #[test]
    fn test_tier_from_u8_roundtrip() {
        assert_eq!(PriorityTier::from_u8(0), PriorityTier::Unranked);
        assert_eq!(PriorityTier::from_u8(1), PriorityTier::Famous);
        assert_eq!(PriorityTier::from_u8(2), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_u8(3), PriorityTier::Obscure);
        // Out-of-range values degrade to unranked
        assert_eq!(PriorityTier::from_u8(9), PriorityTier::Unranked);
        for tier in PriorityTier::ranked() {
            assert_eq!(PriorityTier::from_u8(tier.as_u8()), *tier);
        }
    }

    #[test]
    fn test_compound_positions_split() {
        let r = record("AM/LW/ST");
        let parts: Vec<&str> = r.positions().collect();
        assert_eq!(parts, vec!["AM", "LW", "ST"]);
    }

    #[test]
    fn test_comma_positions_split() {
        let r = record("AM, ST");
        let parts: Vec<&str> = r.positions().collect();
        assert_eq!(parts, vec!["AM", "ST"]);
    }

    #[test]
    fn test_plays_position_multi_valued() {
        let r = record("AM/LW/ST");
        assert!(r.plays_position("LW"));
        assert!(r.plays_position("st"));
        assert!(!r.plays_position("GK"));
    }
}
