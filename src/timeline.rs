//! Version-history timeline.
//!
//! For each of the last 10 historical releases, counts how many features
//! were already supported at-or-before that release, per platform.

use std::fs;
use std::path::Path;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::aggregate::percent;
use crate::support;
use crate::types::{FeatureInfo, PlatformMap, TimelinePlatform, TimelinePoint};

/// How many trailing history entries the timeline covers.
const TIMELINE_WINDOW: usize = 10;

/// One historical release.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VersionHistoryFile {
    #[serde(default)]
    history: Vec<ReleaseEntry>,
}

/// Loads `version.json` from the data root. A missing or unparseable file
/// skips the timeline entirely; neither is fatal.
#[must_use]
pub fn load_version_history(root: &Path) -> Vec<ReleaseEntry> {
    let path = root.join("version.json");
    if !path.exists() {
        return Vec::new();
    }

    let Ok(content) = fs::read_to_string(&path) else {
        eprintln!(
            "{} could not read {}; timeline skipped",
            "warning:".yellow(),
            path.display()
        );
        return Vec::new();
    };

    match serde_json::from_str::<VersionHistoryFile>(&content) {
        Ok(file) => file.history,
        Err(e) => {
            eprintln!(
                "{} invalid {}: {e}; timeline skipped",
                "warning:".yellow(),
                path.display()
            );
            Vec::new()
        }
    }
}

/// Builds the timeline over the last `TIMELINE_WINDOW` history entries,
/// preserving their chronological order.
#[must_use]
pub fn build_timeline(
    features: &[FeatureInfo],
    history: &[ReleaseEntry],
    platforms: &[String],
) -> Vec<TimelinePoint> {
    let start = history.len().saturating_sub(TIMELINE_WINDOW);

    history[start..]
        .iter()
        .map(|entry| {
            let mut snapshot = PlatformMap::new();
            for platform in platforms {
                let supported = features
                    .iter()
                    .filter(|feature| {
                        feature.support.get(platform).is_some_and(|cell| {
                            support::is_at_or_before(cell.version_added.as_ref(), &entry.version)
                        })
                    })
                    .count();
                snapshot.insert(
                    platform.clone(),
                    TimelinePlatform {
                        supported,
                        coverage: percent(supported, features.len()),
                    },
                );
            }
            TimelinePoint {
                version: entry.version.clone(),
                release_date: entry.release_date.clone(),
                platforms: snapshot,
            }
        })
        .collect()
}
