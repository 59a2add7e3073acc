//! Free-text name resolution.
//!
//! Guesses and candidate names are folded to a canonical form (NFD
//! decomposition, combining marks stripped, lowercased, alphanumerics only)
//! and compared for exact equality. No fuzzy matching: "Mbappe" finds
//! "Mbappé", "Mbape" finds nothing. Ties resolve to the first dataset-order
//! match.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::data::PlayerDataset;
use crate::models::PlayerRecord;

/// Canonical comparison form of a player name.
pub fn normalize_name(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Resolve a guess to the first dataset record whose normalized name equals
/// the normalized guess.
pub fn resolve<'a>(dataset: &'a PlayerDataset, guess: &str) -> Option<&'a PlayerRecord> {
    let needle = normalize_name(guess);
    if needle.is_empty() {
        return None;
    }
    dataset
        .all()
        .iter()
        .find(|record| normalize_name(&record.name) == needle)
}
