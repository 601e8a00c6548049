// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Pathedit: an interactive SVG path editor core
//!
//! The crate parses SVG path data into an editable document, maps pointer
//! positions onto it through a zoomable viewport and records every
//! committed edit in a linear undo history. Rendering is left to the host.

pub mod config;
pub mod driver;
pub mod editing;
pub mod path;
pub mod settings;
pub mod store;

pub use config::EditorConfig;
pub use editing::{EditSession, Gesture, MouseEvent};
pub use path::{Document, MalformedPathError};
pub use store::{FileStore, MemoryStore, PathStore};

use anyhow::Context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Entry point for the headless `pathedit` binary
///
/// Usage: `pathedit [--config FILE] [PATH]`. Commands are read from stdin,
/// see `driver` for the command set. `PATH` replaces the restored path.
pub fn run() -> anyhow::Result<()> {
    let args = CommandLine::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(file) => EditorConfig::load(file)?,
        None => EditorConfig::default(),
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session = EditSession::restore(&config, config.open_store());
    if let Some(raw) = &args.path {
        tracing::info!("Loading path from command line");
        session
            .import_path(raw)
            .context("Invalid path on command line")?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    driver::run_script(&mut session, stdin.lock(), &mut stdout.lock())
}

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
struct CommandLine {
    config: Option<PathBuf>,
    path: Option<String>,
}

impl CommandLine {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();
        let mut rest = Vec::new();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                let file = args.next().context("--config needs a file")?;
                parsed.config = Some(PathBuf::from(file));
            } else {
                rest.push(arg);
            }
        }
        if !rest.is_empty() {
            parsed.path = Some(rest.join(" "));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments() {
        assert_eq!(CommandLine::parse(args(&[])).unwrap(), CommandLine::default());
    }

    #[test]
    fn config_and_path() {
        let parsed = CommandLine::parse(args(&["--config", "edit.toml", "M 0 0 L 1 1"])).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("edit.toml")));
        assert_eq!(parsed.path.as_deref(), Some("M 0 0 L 1 1"));
    }

    #[test]
    fn unquoted_path_words_are_joined() {
        let parsed = CommandLine::parse(args(&["M", "0", "0", "--config", "a.toml"])).unwrap();
        assert_eq!(parsed.path.as_deref(), Some("M 0 0"));
    }

    #[test]
    fn config_without_file_fails() {
        assert!(CommandLine::parse(args(&["--config"])).is_err());
    }
}
