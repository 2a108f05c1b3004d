// src/config/io.rs
use std::fs;
use std::path::Path;

use colored::Colorize;

use super::types::{CategoryConfig, CompatGenToml, Config, EXCLUDED_DIRS};

/// Applies `compatgen.toml` from the data root, if present. A missing file
/// means pure defaults; an unreadable or invalid one is reported and ignored.
pub fn load_toml_config(config: &mut Config) {
    let path = config.root.join("compatgen.toml");
    if !path.exists() {
        return;
    }
    match fs::read_to_string(&path) {
        Ok(content) => parse_toml(config, &content),
        Err(e) => {
            eprintln!(
                "{} could not read {}: {e}",
                "warning:".yellow(),
                path.display()
            );
        }
    }
}

/// Parses TOML content into the runtime config.
pub fn parse_toml(config: &mut Config, content: &str) {
    match toml::from_str::<CompatGenToml>(content) {
        Ok(parsed) => {
            config.platforms = parsed.platforms;
            config.categories = parsed.categories;
            config.recent_versions = parsed.recent_versions;
            config.output = parsed.output.into();
        }
        Err(e) => {
            eprintln!("{} invalid compatgen.toml: {e}", "warning:".yellow());
        }
    }
}

/// Fills in empty display names and doc prefixes after loading.
pub fn apply_category_defaults(config: &mut Config) {
    for category in &mut config.categories {
        if category.display_name.is_empty() {
            category.display_name = derive_display_name(&category.path);
        }
        if category.doc_prefix.is_empty() {
            category.doc_prefix = format!("/{}", category.path);
        }
    }
}

/// Discovers category directories by scanning the data root's top level.
/// Hidden directories and the fixed exclusion set are skipped; results are
/// name-sorted so the category order is stable.
pub fn discover_categories(root: &Path) -> Vec<CategoryConfig> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.') && !EXCLUDED_DIRS.contains(&name.as_str()))
        .collect();
    names.sort();

    names
        .into_iter()
        .map(|name| CategoryConfig {
            display_name: derive_display_name(&name),
            doc_prefix: format!("/{name}"),
            nested_docs: false,
            path: name,
        })
        .collect()
}

/// Derives a human display name from a directory path: final segment,
/// separators spaced out, words capitalized ("css/at-rule" -> "At Rule").
#[must_use]
pub fn derive_display_name(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    last.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
