//! Category axis constraints.
//!
//! Every row and column of the puzzle carries one `(CategoryType, value)`
//! constraint. The type enumeration is closed; each variant implements a
//! uniform `values_of` / `matches` pair so callers never dispatch on strings.
//! Position is the one multi-valued type: a record with a compound position
//! string satisfies every atomic position it lists.

use serde::{Deserialize, Serialize};

use super::record::PlayerRecord;

/// Closed enumeration of category axes available to the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Country,
    Position,
    League,
    Team,
    ShirtNumber,
}

impl CategoryType {
    /// All category types in canonical order
    pub fn all() -> &'static [CategoryType] {
        &[
            CategoryType::Country,
            CategoryType::Position,
            CategoryType::League,
            CategoryType::Team,
            CategoryType::ShirtNumber,
        ]
    }

    /// Types every generated grid must cover; shirt number is optional
    pub fn required() -> &'static [CategoryType] {
        &[
            CategoryType::Country,
            CategoryType::Position,
            CategoryType::League,
            CategoryType::Team,
        ]
    }

    /// Get category name as string
    pub fn name(&self) -> &'static str {
        match self {
            CategoryType::Country => "country",
            CategoryType::Position => "position",
            CategoryType::League => "league",
            CategoryType::Team => "team",
            CategoryType::ShirtNumber => "shirt_number",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "country" | "nationality" => Some(CategoryType::Country),
            "position" => Some(CategoryType::Position),
            "league" => Some(CategoryType::League),
            "team" | "club" => Some(CategoryType::Team),
            "shirt_number" | "shirtnumber" | "number" => Some(CategoryType::ShirtNumber),
            _ => None,
        }
    }

    /// The category values the record contributes for this type.
    ///
    /// Single-valued for every type except Position, which yields one value
    /// per atomic position. Records without a shirt number contribute nothing
    /// for ShirtNumber.
    pub fn values_of(&self, record: &PlayerRecord) -> Vec<String> {
        match self {
            CategoryType::Country => vec![record.nationality.clone()],
            CategoryType::Position => record.positions().map(str::to_string).collect(),
            CategoryType::League => vec![record.league.clone()],
            CategoryType::Team => vec![record.team.clone()],
            CategoryType::ShirtNumber => record
                .shirt_number
                .map(|n| n.to_string())
                .into_iter()
                .collect(),
        }
    }

    /// Whether the record satisfies `value` under this category.
    ///
    /// Position uses contains semantics over the atomic positions; all other
    /// types are exact (case-insensitive) equality.
    pub fn matches(&self, record: &PlayerRecord, value: &str) -> bool {
        match self {
            CategoryType::Country => record.nationality.eq_ignore_ascii_case(value),
            CategoryType::Position => record.plays_position(value),
            CategoryType::League => record.league.eq_ignore_ascii_case(value),
            CategoryType::Team => record.team.eq_ignore_ascii_case(value),
            CategoryType::ShirtNumber => match record.shirt_number {
                Some(n) => value.trim().parse::<u8>() == Ok(n),
                None => false,
            },
        }
    }
}
