//! Dataset Builder Library
//!
//! Squads CSV → `Vec<PlayerRecord>` → MessagePack → LZ4 → SHA256 checksum.
//! Produces the `dataset.v1.msgpack.lz4` artifact the engine's cache loader
//! consumes.

pub mod csv_import;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use fg_core::data::DatasetIndex;

pub use csv_import::{parse_csv_to_records, ParseStats};

/// Current cache schema version
pub const SCHEMA_VERSION: &str = "v1";

/// Cache build metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 checksum (hex string) of the written artifact
    pub checksum: String,
    /// Build time (RFC3339)
    pub created_at: String,
    /// Record count
    pub record_count: u32,
    /// Serialized MessagePack size (bytes)
    pub original_size: u64,
    /// Compressed artifact size (bytes)
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
}

/// Build the binary dataset cache from a squads CSV.
///
/// Returns the metadata of the written artifact plus CSV parse statistics.
pub fn build_dataset_cache(
    input_csv: &Path,
    output_msgpack_lz4: &Path,
    schema_version: &str,
) -> Result<(CacheMetadata, ParseStats)> {
    let (records, stats) = parse_csv_to_records(input_csv, true)?;

    let index = DatasetIndex {
        count: records.len() as u32,
        records,
        schema_version: schema_version.to_string(),
    };

    let msgpack_bytes =
        rmp_serde::to_vec(&index).context("Failed to serialize dataset to MessagePack")?;
    let original_size = msgpack_bytes.len() as u64;

    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = format!("{:x}", hasher.finalize());

    if let Some(parent) = output_msgpack_lz4.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output_msgpack_lz4, &compressed).with_context(|| {
        format!(
            "Failed to write output file: {}",
            output_msgpack_lz4.display()
        )
    })?;

    let metadata = CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        record_count: index.count,
        original_size,
        compressed_size,
        compression_ratio: compressed_size as f64 / original_size as f64,
    };
    Ok((metadata, stats))
}

/// Verify a cache file against an expected SHA256 checksum.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let actual = format!("{:x}", hasher.finalize());

    Ok(actual == expected_checksum)
}

/// Decompress and decode a cache file back into its index.
pub fn load_dataset_cache(cache_file: &Path) -> Result<DatasetIndex> {
    let compressed = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;

    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;

    rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")
}
