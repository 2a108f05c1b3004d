use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directories under the data root that never hold compatibility data.
pub const EXCLUDED_DIRS: &[&str] = &[
    "platforms",
    "schemas",
    "scripts",
    "test",
    "types",
    "node_modules",
];

/// One category of compatibility data: a directory subtree plus its
/// documentation mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Directory path relative to the data root, e.g. "css/properties".
    pub path: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub doc_prefix: String,
    /// When set, doc URLs keep the record's sub-path below the category
    /// directory instead of just the file stem (API namespaces whose docs
    /// mirror the directory layout).
    #[serde(default)]
    pub nested_docs: bool,
}

/// On-disk shape of `compatgen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatGenToml {
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub recent_versions: Vec<String>,
    #[serde(default = "default_output")]
    pub output: String,
}

pub(crate) fn default_platforms() -> Vec<String> {
    ["android", "ios", "macos", "windows", "web"]
        .map(String::from)
        .to_vec()
}

pub(crate) fn default_output() -> String {
    "api-stats.json".to_string()
}

/// Fully-resolved runtime configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data root containing the category directories.
    pub root: PathBuf,
    /// Output path; resolved against `root` when relative.
    pub output: PathBuf,
    /// Ordered tracked-platform list.
    pub platforms: Vec<String>,
    /// Ordered category list.
    pub categories: Vec<CategoryConfig>,
    /// Version prefixes that tag a record as recently added.
    pub recent_versions: Vec<String>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(default_output()),
            platforms: default_platforms(),
            categories: Vec::new(),
            recent_versions: Vec::new(),
            verbose: false,
        }
    }
}
