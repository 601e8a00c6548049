// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! User configuration loaded from a TOML file.
//!
//! Every field is optional; anything left out falls back to the compiled-in
//! defaults from `settings`.

use crate::settings;
use crate::store::{FileStore, MemoryStore, PathStore};
use anyhow::{Context, Result};
use kurbo::Size;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width in device pixels
    pub canvas_width: f64,
    /// Canvas height in device pixels
    pub canvas_height: f64,
    /// JSON file holding the persisted path. `None` keeps it in memory.
    pub store_path: Option<PathBuf>,
    pub store_key: String,
    /// Path loaded when the store is empty
    pub default_path: String,
    pub history_limit: usize,
    /// `tracing` filter directives, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: settings::canvas::WIDTH,
            canvas_height: settings::canvas::HEIGHT,
            store_path: None,
            store_key: settings::storage::KEY.to_string(),
            default_path: settings::storage::DEFAULT_PATH.to_string(),
            history_limit: settings::history::LIMIT,
            log_filter: "pathedit=info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Open the configured store
    pub fn open_store(&self) -> Box<dyn PathStore> {
        match &self.store_path {
            Some(file) => Box::new(FileStore::open(file, self.store_key.clone())),
            None => Box::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = EditorConfig::from_toml("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.canvas_size(), Size::new(800.0, 600.0));
        assert_eq!(config.store_key, "defaultSvgPath");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = EditorConfig::from_toml(
            r#"
            canvas_width = 200.0
            canvas_height = 100.0
            store_path = "/tmp/pathedit.json"
            history_limit = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.canvas_size(), Size::new(200.0, 100.0));
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/pathedit.json")));
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.default_path, settings::storage::DEFAULT_PATH);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(EditorConfig::from_toml("canvas_width = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("pathedit-no-such-config.toml");
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn default_store_is_in_memory() {
        let store = EditorConfig::default().open_store();
        assert_eq!(store.load(), None);
    }
}
