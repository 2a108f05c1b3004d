// src/config/mod.rs
pub mod io;
pub mod types;

use std::path::{Path, PathBuf};

pub use self::types::{CategoryConfig, CompatGenToml, Config, EXCLUDED_DIRS};

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config for the given data root and loads local settings
    /// (`compatgen.toml`). When the file names no categories, top-level
    /// directories of the root are auto-discovered.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let mut config = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };
        io::load_toml_config(&mut config);
        if config.categories.is_empty() {
            config.categories = io::discover_categories(&config.root);
        }
        io::apply_category_defaults(&mut config);
        config
    }

    /// The output path, resolved against the data root when relative.
    #[must_use]
    pub fn resolved_output(&self) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            self.root.join(&self.output)
        }
    }
}
