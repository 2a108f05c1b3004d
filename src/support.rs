//! Support-value classification.
//!
//! Every downstream count in the pipeline depends on `is_supported`, so its
//! asymmetry is load-bearing: any version string and the `true` flag count as
//! supported, only the `false` flag and an absent value do not.

use serde::{Deserialize, Serialize};

/// A "version added" value: an explicit version string, or a boolean flag
/// (`true` = supported since an unknown version, `false` = not supported).
/// An unknown value is represented as `None` at the call sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionValue {
    Flag(bool),
    Version(String),
}

/// One support declaration for a platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportStatement {
    #[serde(default)]
    pub version_added: Option<VersionValue>,
}

/// A platform's support data: a single statement, or an ordered sequence of
/// alternatives where the first supported entry wins and later entries are
/// legacy declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportEntry {
    Single(SupportStatement),
    Alternatives(Vec<SupportStatement>),
}

/// Returns false only for the `false` flag and an unknown value.
#[must_use]
pub fn is_supported(value: Option<&VersionValue>) -> bool {
    match value {
        Some(VersionValue::Version(_)) => true,
        Some(VersionValue::Flag(flag)) => *flag,
        None => false,
    }
}

/// Resolves the effective "version added" of a support entry.
///
/// A sequence is scanned in order and the first entry whose own value is
/// supported wins; if none qualify the result is the `false` flag. A single
/// statement passes its raw value through untouched, so a literal `false` or
/// unknown value stays distinguishable from "no entry for this platform".
#[must_use]
pub fn version_added(entry: Option<&SupportEntry>) -> Option<VersionValue> {
    match entry {
        None => Some(VersionValue::Flag(false)),
        Some(SupportEntry::Alternatives(list)) => {
            for statement in list {
                if is_supported(statement.version_added.as_ref()) {
                    return statement.version_added.clone();
                }
            }
            Some(VersionValue::Flag(false))
        }
        Some(SupportEntry::Single(statement)) => statement.version_added.clone(),
    }
}

/// Returns true iff the value is a version string starting with one of the
/// configured recent-version prefixes. Flags are never recent.
#[must_use]
pub fn is_recent(value: Option<&VersionValue>, prefixes: &[String]) -> bool {
    match value {
        Some(VersionValue::Version(version)) => {
            prefixes.iter().any(|p| version.starts_with(p.as_str()))
        }
        _ => false,
    }
}

/// Returns true if the value denotes support at or before `target`.
///
/// The `true` flag is always at-or-before; the `false` flag and unknown never
/// are. Version strings compare via `pack_version`.
#[must_use]
pub fn is_at_or_before(value: Option<&VersionValue>, target: &str) -> bool {
    match value {
        Some(VersionValue::Flag(flag)) => *flag,
        Some(VersionValue::Version(version)) => pack_version(version) <= pack_version(target),
        None => false,
    }
}

/// Packs "major.minor" into one comparable integer (minor defaults to 0,
/// extra components are ignored). Breaks for minor >= 1000; observed version
/// strings are small two-component values.
fn pack_version(version: &str) -> i64 {
    let mut parts = version.split('.');
    let major: i64 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or_default();
    let minor: i64 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or_default();
    major * 1000 + minor
}
