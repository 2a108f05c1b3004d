// src/types.rs
//! Output data model for the statistics artifact.
//!
//! Every map is a `BTreeMap` so the serialized document is key-ordered and
//! two runs over unchanged input are byte-identical apart from the
//! generation timestamp.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::support::VersionValue;

/// Per-platform values, keyed by platform name.
pub type PlatformMap<T> = BTreeMap<String, T>;

/// One API surface extracted from a compatibility tree.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRecord {
    /// Hierarchical path: category-relative file path plus dotted accessors.
    pub path: String,
    /// Display name: explicit description, else the final path segment.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    /// Resolved support per tracked platform: a version string, `true`
    /// (supported, version unknown) or `false`.
    pub support: PlatformMap<VersionValue>,
}

/// Rollup counts for one category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub supported: PlatformMap<usize>,
    /// Rounded percent of `supported` over `total`; 0 when total is 0.
    pub coverage: PlatformMap<u32>,
}

/// Global per-platform rollup.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub supported_count: usize,
    pub coverage_percent: u32,
}

/// Full detail block for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetail {
    pub display_name: String,
    pub stats: CategoryStats,
    /// Raw record paths, in walk order.
    pub apis: Vec<String>,
    pub api_details: Vec<ApiRecord>,
    /// Per platform, every record not supported on it.
    pub missing: PlatformMap<Vec<ApiRecord>>,
}

/// A record whose earliest supporting version matches a recent prefix.
#[derive(Debug, Clone, Serialize)]
pub struct RecentApi {
    pub path: String,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    pub versions: PlatformMap<VersionValue>,
}

/// The `version_added` cell of a feature; `None` serializes as `null`
/// (unknown), distinct from the explicit `false` flag.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSupport {
    pub version_added: Option<VersionValue>,
}

/// Canonical flattened form of a record, as consumed by the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureInfo {
    /// Stable synthetic id, sequential across the whole run.
    pub id: String,
    /// Normalized display query.
    pub query: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    /// Originating document, for traceability.
    pub source_file: String,
    /// Normalized so every tracked platform has an explicit entry.
    pub support: PlatformMap<FeatureSupport>,
}

/// Per-platform snapshot at one historical release.
#[derive(Debug, Clone, Serialize)]
pub struct TimelinePlatform {
    pub supported: usize,
    pub coverage: u32,
}

/// One historical release and its aggregate coverage.
#[derive(Debug, Clone, Serialize)]
pub struct TimelinePoint {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub platforms: PlatformMap<TimelinePlatform>,
}

/// Global summary block.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_apis: usize,
    pub by_category: BTreeMap<String, CategoryStats>,
    pub by_platform: PlatformMap<PlatformSummary>,
}

/// The single output artifact, fully reconstructed on every run.
#[derive(Debug, Clone, Serialize)]
pub struct ApiStats {
    pub generated_at: String,
    pub summary: Summary,
    pub categories: BTreeMap<String, CategoryDetail>,
    pub recent_apis: Vec<RecentApi>,
    pub features: Vec<FeatureInfo>,
    pub timeline: Vec<TimelinePoint>,
}
