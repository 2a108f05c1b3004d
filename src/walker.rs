//! Recursive traversal of compatibility trees.
//!
//! The walker turns every node carrying support metadata into one
//! `ApiRecord` and accumulates per-platform supported counts for the whole
//! subtree. Totals propagate strictly upward: a parent contributes its own
//! 0-or-1 plus every child subtree's count.

use std::collections::BTreeMap;

use crate::config::{CategoryConfig, Config};
use crate::query;
use crate::support::{self, VersionValue};
use crate::tree::{CompatNode, CompatStatement};
use crate::types::{ApiRecord, PlatformMap, RecentApi};

/// Per-subtree rollup of API counts.
#[derive(Debug, Clone, Default)]
pub struct WalkTotals {
    pub total: usize,
    pub supported: PlatformMap<usize>,
}

impl WalkTotals {
    /// A zeroed rollup with an explicit entry for every tracked platform.
    #[must_use]
    pub fn zeroed(platforms: &[String]) -> Self {
        Self {
            total: 0,
            supported: platforms.iter().map(|p| (p.clone(), 0)).collect(),
        }
    }

    /// Adds a child subtree's counts into this rollup.
    pub fn absorb(&mut self, child: &WalkTotals) {
        self.total += child.total;
        for (platform, count) in &child.supported {
            *self.supported.entry(platform.clone()).or_insert(0) += count;
        }
    }
}

/// Walks one category's compatibility trees.
pub struct Walker<'a> {
    config: &'a Config,
    category: &'a CategoryConfig,
}

impl<'a> Walker<'a> {
    #[must_use]
    pub fn new(config: &'a Config, category: &'a CategoryConfig) -> Self {
        Self { config, category }
    }

    /// Collects every record reachable in `node`, appending to `records` and
    /// `recent`, and returns the subtree's rollup. A node may be both leaf
    /// and branch; both sides are processed.
    pub fn walk(
        &self,
        node: &CompatNode,
        path: &str,
        records: &mut Vec<ApiRecord>,
        recent: &mut Vec<RecentApi>,
    ) -> WalkTotals {
        let mut totals = WalkTotals::zeroed(&self.config.platforms);

        if let Some(compat) = &node.compat {
            totals.total = 1;
            self.emit_record(compat, path, &mut totals, records, recent);
        }

        for (key, child) in &node.children {
            let next = query::child_path(path, key);
            let sub = self.walk(child, &next, records, recent);
            totals.absorb(&sub);
        }

        totals
    }

    fn emit_record(
        &self,
        compat: &CompatStatement,
        path: &str,
        totals: &mut WalkTotals,
        records: &mut Vec<ApiRecord>,
        recent: &mut Vec<RecentApi>,
    ) {
        let mut resolved: PlatformMap<VersionValue> = BTreeMap::new();
        let mut flagged_recent = false;

        for platform in &self.config.platforms {
            let added = support::version_added(compat.entry(platform));
            if support::is_supported(added.as_ref()) {
                *totals.supported.entry(platform.clone()).or_insert(0) += 1;
                if support::is_recent(added.as_ref(), &self.config.recent_versions) {
                    flagged_recent = true;
                }
                let summary = match added {
                    Some(VersionValue::Version(version)) => VersionValue::Version(version),
                    _ => VersionValue::Flag(true),
                };
                resolved.insert(platform.clone(), summary);
            } else {
                resolved.insert(platform.clone(), VersionValue::Flag(false));
            }
        }

        let name = display_name(compat, path);
        let doc_url = compat
            .doc_path
            .clone()
            .unwrap_or_else(|| self.doc_url(path));

        records.push(ApiRecord {
            path: path.to_string(),
            name: name.clone(),
            doc_url: Some(doc_url.clone()),
            support: resolved.clone(),
        });

        if flagged_recent {
            recent.push(RecentApi {
                path: path.to_string(),
                name,
                category: self.category.path.clone(),
                doc_url: Some(doc_url),
                versions: resolved,
            });
        }
    }

    /// Computes the documentation URL for a record path. Flat categories map
    /// to `prefix/<file-stem>`; nested ones keep the sub-path below the
    /// category directory (accessors dropped either way).
    fn doc_url(&self, record_path: &str) -> String {
        let prefix = self.category.doc_prefix.trim_end_matches('/');
        if self.category.nested_docs {
            let sub = record_path
                .strip_prefix(self.category.path.as_str())
                .map_or(record_path, |s| s.trim_start_matches('/'));
            let sub = sub.split('.').next().unwrap_or(sub);
            format!("{prefix}/{sub}")
        } else {
            let file = record_path.rsplit('/').next().unwrap_or(record_path);
            let stem = file.split('.').next().unwrap_or(file);
            format!("{prefix}/{stem}")
        }
    }
}

/// Display name: explicit description (inline markup stripped), else the
/// final path segment after the last `/` and `.`.
fn display_name(compat: &CompatStatement, path: &str) -> String {
    if let Some(description) = &compat.description {
        let stripped = strip_tags(description);
        if !stripped.is_empty() {
            return stripped;
        }
    }
    let last = path.rsplit('/').next().unwrap_or(path);
    let last = last.rsplit('.').next().unwrap_or(last);
    if last.is_empty() {
        path.to_string()
    } else {
        last.to_string()
    }
}

/// Drops `<...>` spans from a description ("<code>view</code>" -> "view").
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}
