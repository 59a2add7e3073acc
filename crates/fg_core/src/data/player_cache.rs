//! Player dataset cache loader.
//!
//! Source artifact: `data/exports/dataset.v1.msgpack.lz4`
//! Format: LZ4 (size-prepended) + MessagePack(serde) of `DatasetIndex`.

use lz4_flex::decompress_size_prepended;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use super::dataset::PlayerDataset;
use crate::models::PlayerRecord;

/// Canonical env var for overriding the dataset cache path.
pub const DATASET_CACHE_ENV: &str = "FG_DATASET_PATH";

/// Default relative path used when `FG_DATASET_PATH` is not set.
pub const DEFAULT_DATASET_REL_PATH: &str = "data/exports/dataset.v1.msgpack.lz4";

/// Serialized shape of the dataset cache artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetIndex {
    pub records: Vec<PlayerRecord>,
    pub count: u32,
    pub schema_version: String,
}

static DATASET: OnceCell<PlayerDataset> = OnceCell::new();

fn resolve_cache_path() -> PathBuf {
    if let Ok(path) = env::var(DATASET_CACHE_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(DEFAULT_DATASET_REL_PATH)
}

fn load_index_from_lz4_bytes(lz4_bytes: &[u8]) -> Result<DatasetIndex, String> {
    // Some exports (or local workflows) write the MessagePack payload without
    // LZ4. Prefer the simplest successful decode.
    if let Ok(index) = rmp_serde::from_slice::<DatasetIndex>(lz4_bytes) {
        return Ok(index);
    }

    let msgpack_bytes =
        decompress_size_prepended(lz4_bytes).map_err(|e| format!("LZ4 decompress failed: {e}"))?;

    rmp_serde::from_slice::<DatasetIndex>(&msgpack_bytes)
        .map_err(|e| format!("MessagePack deserialize failed: {e}"))
}

/// Load a dataset from a cache artifact on disk.
pub fn load_dataset_from_path(path: &Path) -> Result<PlayerDataset, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read dataset cache at '{}': {e}", path.display()))?;
    let index = load_index_from_lz4_bytes(&bytes)?;
    log::info!(
        "Loaded dataset cache '{}' ({} records, schema {})",
        path.display(),
        index.records.len(),
        index.schema_version
    );
    Ok(PlayerDataset::new(index.records))
}

/// Load (or return cached) process-wide dataset.
///
/// Resolution order:
/// 1) `FG_DATASET_PATH` if set
/// 2) `data/exports/dataset.v1.msgpack.lz4` (relative)
pub fn get_dataset() -> Result<&'static PlayerDataset, String> {
    DATASET.get_or_try_init(|| load_dataset_from_path(&resolve_cache_path()))
}
