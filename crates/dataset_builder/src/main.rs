//! Dataset Builder CLI
//!
//! Squads CSV → MessagePack+LZ4 dataset cache builder.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "dataset_builder")]
#[command(about = "Build the player dataset cache from a squads CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build dataset cache from a squads CSV file
    Build {
        /// Input CSV file path (e.g. data/squads_2025_26.csv)
        #[arg(long)]
        csv: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g. "v1")
        #[arg(long, default_value = dataset_builder::SCHEMA_VERSION)]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Verify a cache file against a checksum
    Verify {
        /// Cache file path
        #[arg(long)]
        cache: PathBuf,

        /// Expected SHA256 checksum (hex)
        #[arg(long)]
        checksum: String,
    },

    /// Print summary statistics of a cache file
    Stats {
        /// Cache file path
        #[arg(long)]
        cache: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            csv,
            out,
            schema_version,
            verify,
            metadata,
        } => {
            println!("🔨 Building dataset cache from CSV...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());
            println!("   Schema:    {}", schema_version);

            let (meta, stats) = dataset_builder::build_dataset_cache(&csv, &out, &schema_version)?;

            println!(
                "   Rows:      {} parsed, {} failed of {}",
                stats.parsed, stats.failed, stats.total_rows
            );
            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }

            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Verify { cache, checksum } => {
            verify_cache_integrity(&cache, &checksum)?;
        }

        Commands::Stats { cache } => {
            let index = dataset_builder::load_dataset_cache(&cache)?;
            println!("📊 Cache statistics");
            println!("   Schema:  {}", index.schema_version);
            println!("   Records: {}", index.records.len());
            let ranked = index
                .records
                .iter()
                .filter(|r| r.tier != fg_core::PriorityTier::Unranked)
                .count();
            println!("   Ranked:  {ranked}");
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &dataset_builder::CacheMetadata) {
    println!("\n✅ Cache built successfully!");
    println!("   Records:         {}", meta.record_count);
    println!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &std::path::Path, checksum: &str) -> Result<()> {
    println!("\n🔍 Verifying cache integrity...");
    let is_valid = dataset_builder::verify_cache(cache_path, checksum)?;

    if is_valid {
        println!("✅ Cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("❌ Cache verification failed - checksum mismatch!")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &PathBuf, meta: &dataset_builder::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)?;
    println!("\n📄 Metadata saved to: {}", path.display());
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("dataset_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
