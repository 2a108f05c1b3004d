//! Per-category aggregation.
//!
//! Drives the tree walker across every `.json` document under a category's
//! directory subtree and merges the per-file results. Discovery is
//! name-sorted and the merge preserves that order, so the parallel per-file
//! pass has no observable effect on the output.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use walkdir::WalkDir;

use crate::config::{CategoryConfig, Config};
use crate::error::{Result, StatsError};
use crate::support::VersionValue;
use crate::tree::CompatNode;
use crate::types::{ApiRecord, CategoryStats, PlatformMap, RecentApi};
use crate::walker::{WalkTotals, Walker};

/// Everything extracted from one category directory.
#[derive(Debug, Default)]
pub struct CategoryOutcome {
    pub stats: CategoryStats,
    pub api_details: Vec<ApiRecord>,
    pub missing: PlatformMap<Vec<ApiRecord>>,
    pub recent: Vec<RecentApi>,
}

struct FileOutcome {
    totals: WalkTotals,
    records: Vec<ApiRecord>,
    recent: Vec<RecentApi>,
}

/// Aggregates one category. A missing directory yields an all-zero outcome;
/// an unparseable document is fatal for the whole run.
pub fn process_category(config: &Config, category: &CategoryConfig) -> Result<CategoryOutcome> {
    let dir = config.root.join(&category.path);
    if !dir.is_dir() {
        eprintln!(
            "{} category path does not exist: {}",
            "warning:".yellow(),
            dir.display()
        );
        return Ok(CategoryOutcome::default());
    }

    let files = discover_files(&dir);

    let per_file: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| process_file(config, category, path))
        .collect::<Result<Vec<_>>>()?;

    let mut totals = WalkTotals::zeroed(&config.platforms);
    let mut api_details = Vec::new();
    let mut recent = Vec::new();
    for outcome in per_file {
        totals.absorb(&outcome.totals);
        api_details.extend(outcome.records);
        recent.extend(outcome.recent);
    }

    let stats = compute_stats(&totals, &config.platforms);
    let missing = compute_missing(&api_details, &config.platforms);

    Ok(CategoryOutcome {
        stats,
        api_details,
        missing,
        recent,
    })
}

/// Every `.json` file under `dir`, name-sorted for a stable record order.
fn discover_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect()
}

/// Parses one document and walks each of its top-level trees. The traversal
/// root is the document's root-relative path with the extension stripped;
/// top-level key names are not part of the path (the tree structure mirrors
/// the file path).
fn process_file(config: &Config, category: &CategoryConfig, path: &Path) -> Result<FileOutcome> {
    let content = fs::read_to_string(path).map_err(|source| StatsError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| StatsError::Parse {
            source,
            path: path.to_path_buf(),
        })?;

    let relative = path.strip_prefix(&config.root).unwrap_or(path);
    let relative = relative.with_extension("");
    let root_path = relative.to_string_lossy().replace('\\', "/");

    let walker = Walker::new(config, category);
    let mut outcome = FileOutcome {
        totals: WalkTotals::zeroed(&config.platforms),
        records: Vec::new(),
        recent: Vec::new(),
    };

    if let Some(map) = value.as_object() {
        for child in map.values() {
            let node = CompatNode::from_value(child).map_err(|source| StatsError::Parse {
                source,
                path: path.to_path_buf(),
            })?;
            let Some(node) = node else { continue };
            let sub = walker.walk(&node, &root_path, &mut outcome.records, &mut outcome.recent);
            outcome.totals.absorb(&sub);
        }
    }

    Ok(outcome)
}

fn compute_stats(totals: &WalkTotals, platforms: &[String]) -> CategoryStats {
    let mut coverage = PlatformMap::new();
    for platform in platforms {
        let supported = totals.supported.get(platform).copied().unwrap_or(0);
        coverage.insert(platform.clone(), percent(supported, totals.total));
    }
    CategoryStats {
        total: totals.total,
        supported: totals.supported.clone(),
        coverage,
    }
}

/// Per platform, every record whose resolved support is exactly `false` or
/// absent. Together with the supported records this partitions the
/// category's full record set.
fn compute_missing(records: &[ApiRecord], platforms: &[String]) -> PlatformMap<Vec<ApiRecord>> {
    let mut missing = PlatformMap::new();
    for platform in platforms {
        let unsupported: Vec<ApiRecord> = records
            .iter()
            .filter(|record| {
                !matches!(
                    record.support.get(platform),
                    Some(VersionValue::Version(_)) | Some(VersionValue::Flag(true))
                )
            })
            .cloned()
            .collect();
        missing.insert(platform.clone(), unsupported);
    }
    missing
}

/// `round(100 * supported / total)`, 0 when total is 0.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(supported: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((supported as f64 / total as f64) * 100.0).round() as u32
}
