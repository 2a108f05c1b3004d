//! Whole-run reduction into the statistics artifact.
//!
//! Runs the category aggregator over the configured category list, sums
//! global totals, flattens records into the feature list, caps the
//! recently-added list, and assembles the output document. Everything is
//! rebuilt from scratch on every run; the only field that differs between
//! runs over unchanged input is the generation timestamp.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};

use crate::aggregate::{self, percent};
use crate::config::{CategoryConfig, Config};
use crate::error::{Result, StatsError};
use crate::query;
use crate::timeline;
use crate::types::{
    ApiRecord, ApiStats, CategoryDetail, FeatureInfo, FeatureSupport, PlatformMap,
    PlatformSummary, RecentApi, Summary,
};

/// Caps the recently-added list in the artifact.
const RECENT_LIMIT: usize = 100;

/// Runs the full aggregation and returns the assembled artifact.
pub fn generate(config: &Config) -> Result<ApiStats> {
    let mut categories = BTreeMap::new();
    let mut by_category = BTreeMap::new();
    let mut features: Vec<FeatureInfo> = Vec::new();
    let mut recent: Vec<RecentApi> = Vec::new();

    let mut global_total = 0usize;
    let mut global_supported: PlatformMap<usize> =
        config.platforms.iter().map(|p| (p.clone(), 0)).collect();

    let mut next_feature_id = 0usize;

    for category in &config.categories {
        if config.verbose {
            println!("  Processing {}...", category.display_name);
        }
        let outcome = aggregate::process_category(config, category)?;

        global_total += outcome.stats.total;
        for platform in &config.platforms {
            *global_supported.entry(platform.clone()).or_insert(0) +=
                outcome.stats.supported.get(platform).copied().unwrap_or(0);
        }

        recent.extend(outcome.recent);

        for record in &outcome.api_details {
            features.push(feature_info(
                record,
                category,
                &config.platforms,
                &mut next_feature_id,
            ));
        }

        by_category.insert(category.path.clone(), outcome.stats.clone());
        categories.insert(
            category.path.clone(),
            CategoryDetail {
                display_name: category.display_name.clone(),
                apis: outcome.api_details.iter().map(|r| r.path.clone()).collect(),
                stats: outcome.stats,
                api_details: outcome.api_details,
                missing: outcome.missing,
            },
        );
    }

    let mut by_platform = PlatformMap::new();
    for platform in &config.platforms {
        let supported_count = global_supported.get(platform).copied().unwrap_or(0);
        by_platform.insert(
            platform.clone(),
            PlatformSummary {
                supported_count,
                coverage_percent: percent(supported_count, global_total),
            },
        );
    }

    recent.sort_by(|a, b| compare_names(&a.name, &b.name));
    recent.truncate(RECENT_LIMIT);

    let history = timeline::load_version_history(&config.root);
    let timeline = timeline::build_timeline(&features, &history, &config.platforms);

    Ok(ApiStats {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        summary: Summary {
            total_apis: global_total,
            by_category,
            by_platform,
        },
        categories,
        recent_apis: recent,
        features,
        timeline,
    })
}

/// Writes the artifact as pretty-printed JSON, overwriting wholesale.
pub fn write_stats(stats: &ApiStats, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)
        .map_err(|e| StatsError::Other(format!("failed to serialize stats: {e}")))?;
    fs::write(path, json).map_err(|source| StatsError::Io {
        source,
        path: path.to_path_buf(),
    })
}

/// Flattens one record into its dashboard form: sequential id, normalized
/// query, explicit per-platform `version_added` cells (null when the record
/// has no entry for a platform), and the originating document path.
fn feature_info(
    record: &ApiRecord,
    category: &CategoryConfig,
    platforms: &[String],
    next_id: &mut usize,
) -> FeatureInfo {
    let mut support = PlatformMap::new();
    for platform in platforms {
        support.insert(
            platform.clone(),
            FeatureSupport {
                version_added: record.support.get(platform).cloned(),
            },
        );
    }

    let source_file = format!(
        "{}.json",
        record.path.split('.').next().unwrap_or(&record.path)
    );

    let id = *next_id;
    *next_id += 1;

    FeatureInfo {
        id: format!("feature-{id}"),
        query: query::normalize_query(&record.path),
        name: record.name.clone(),
        description: None,
        category: category.path.clone(),
        source_file,
        support,
    }
}

/// Case-insensitive name ordering, tie-broken by exact ordering so the sort
/// is total and runs are byte-identical regardless of host locale.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
