//! Squads CSV → `PlayerRecord` import.
//!
//! Expected CSV format (the squads export):
//! - Column 0: Name
//! - Column 1: Team
//! - Column 2: Country (3-letter code)
//! - Column 3: Position (possibly compound, e.g. "AM/LW/ST")
//! - Column 4: League
//! - Column 5: Shirt Number (may be blank)
//! - Column 6: Priority (optional column; 1..=3, blank/absent = unranked)
//!
//! Rows without a name are counted as failed and skipped; a malformed shirt
//! number degrades to "no number" rather than dropping the row. UIDs are the
//! 1-based index of successfully parsed rows.

use anyhow::{Context, Result};
use std::path::Path;

use fg_core::{PlayerRecord, PriorityTier};

/// CSV parsing statistics
#[derive(Debug, Clone)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    pub skipped_header: bool,
}

impl ParseStats {
    fn new(skipped_header: bool) -> Self {
        Self {
            total_rows: 0,
            parsed: 0,
            failed: 0,
            skipped_header,
        }
    }
}

fn field(record: &csv::StringRecord, index: usize) -> String {
    record
        .get(index)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Parse a squads CSV file into player records.
pub fn parse_csv_to_records(
    csv_path: &Path,
    skip_header: bool,
) -> Result<(Vec<PlayerRecord>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(skip_header)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut records = Vec::new();
    let mut stats = ParseStats::new(skip_header);

    for row in reader.records() {
        let row = row.context("Failed to read CSV row")?;
        stats.total_rows += 1;

        let name = field(&row, 0);
        if name.is_empty() {
            stats.failed += 1;
            continue;
        }

        let shirt_number = match field(&row, 5).as_str() {
            "" => None,
            raw => raw.parse::<u8>().ok(),
        };
        let tier = field(&row, 6)
            .parse::<u8>()
            .map(PriorityTier::from_u8)
            .unwrap_or(PriorityTier::Unranked);

        stats.parsed += 1;
        records.push(PlayerRecord {
            uid: stats.parsed,
            name,
            team: field(&row, 1),
            nationality: field(&row, 2),
            position: field(&row, 3),
            league: field(&row, 4),
            shirt_number,
            tier,
        });
    }

    Ok((records, stats))
}
