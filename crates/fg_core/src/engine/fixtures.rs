//! Shared test datasets for the engine modules.

use crate::data::PlayerDataset;
use crate::models::{PlayerRecord, PriorityTier};

fn record(
    uid: u32,
    name: &str,
    team: &str,
    nationality: &str,
    position: &str,
    league: &str,
    shirt_number: Option<u8>,
    tier: PriorityTier,
) -> PlayerRecord {
    PlayerRecord {
        uid,
        name: name.to_string(),
        team: team.to_string(),
        nationality: nationality.to_string(),
        position: position.to_string(),
        league: league.to_string(),
        shirt_number,
        tier,
    }
}

/// A rich squad dataset: every (team, country, position) combination exists
/// in all three ranked tiers, so any validated layout can be populated at any
/// difficulty. A few real-world names with diacritics ride along for the
/// guess matcher.
pub(crate) fn squad_dataset() -> PlayerDataset {
    let teams = [
        ("Arsenal", "Premier League"),
        ("Chelsea", "Premier League"),
        ("Barcelona", "LaLiga"),
        ("Sevilla", "LaLiga"),
    ];
    let countries = ["ENG", "FRA", "ESP", "GER"];
    let positions = ["GK", "DF", "MF", "ST"];
    let tiers = [
        PriorityTier::Famous,
        PriorityTier::Medium,
        PriorityTier::Obscure,
    ];

    let mut records = Vec::new();
    let mut uid = 0u32;
    for (team, league) in teams {
        for country in countries {
            for position in positions {
                for tier in tiers {
                    uid += 1;
                    records.push(record(
                        uid,
                        &format!("Player {uid:03}"),
                        team,
                        country,
                        position,
                        league,
                        Some((uid % 25 + 1) as u8),
                        tier,
                    ));
                }
            }
        }
    }

    uid += 1;
    records.push(record(
        uid,
        "Kylian Mbappé",
        "Real Madrid",
        "FRA",
        "ST/LW",
        "LaLiga",
        Some(10),
        PriorityTier::Famous,
    ));
    uid += 1;
    records.push(record(
        uid,
        "Wojciech Szczęsny",
        "Barcelona",
        "POL",
        "GK",
        "LaLiga",
        Some(25),
        PriorityTier::Famous,
    ));
    uid += 1;
    records.push(record(
        uid,
        "Takefusa Kubo",
        "Real Sociedad",
        "JPN",
        "RW",
        "LaLiga",
        Some(14),
        PriorityTier::Famous,
    ));

    PlayerDataset::new(records)
}

/// Exactly nine tier-1 records forming a perfect 3×3 match for the layout
/// rows = [Country ENG, Position GK, Position ST],
/// cols = [League LaLiga, Team Arsenal, Team Chelsea]:
/// each cell has a dedicated record, and every competing value assignment
/// fails validation, so easy generation must fill the whole board.
pub(crate) fn nine_perfect_dataset() -> PlayerDataset {
    let famous = PriorityTier::Famous;
    PlayerDataset::new(vec![
        record(1, "Player One", "Barcelona", "ENG", "GK", "LaLiga", None, famous),
        record(2, "Player Two", "Arsenal", "ENG", "ST", "Premier League", None, famous),
        record(3, "Player Three", "Chelsea", "ENG", "GK", "Championship", None, famous),
        record(4, "Player Four", "Sevilla", "ESP", "GK", "LaLiga", None, famous),
        record(5, "Player Five", "Arsenal", "FRA", "GK", "Premier League", None, famous),
        record(6, "Player Six", "Chelsea", "BRA", "GK", "Championship", None, famous),
        record(7, "Player Seven", "Real Madrid", "GER", "ST", "LaLiga", None, famous),
        record(8, "Player Eight", "Arsenal", "ITA", "ST", "Premier League", None, famous),
        record(9, "Player Nine", "Chelsea", "POR", "ST", "Championship", None, famous),
    ])
}

/// Too little data for any randomized layout to validate.
pub(crate) fn sparse_dataset() -> PlayerDataset {
    PlayerDataset::new(vec![
        record(
            1,
            "Lone Keeper",
            "Arsenal",
            "ENG",
            "GK",
            "Premier League",
            Some(1),
            PriorityTier::Famous,
        ),
        record(
            2,
            "Lone Striker",
            "Barcelona",
            "ESP",
            "ST",
            "LaLiga",
            Some(9),
            PriorityTier::Famous,
        ),
    ])
}
