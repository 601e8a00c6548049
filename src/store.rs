// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Persistence of the last committed path.
//!
//! The editor keeps exactly one value: the raw path string that was current
//! after the last history change. Saving is fire-and-forget; the file store
//! hands writes to a background thread so the input path never waits on the
//! disk.

use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

/// Key-value slot holding the current raw path
pub trait PathStore: Send + fmt::Debug {
    /// The stored path, if any
    fn load(&self) -> Option<String>;

    /// Replace the stored path. Must not block on I/O.
    fn save(&self, raw: &str);
}

/// In-memory store. Clones share the same slot, so a test can keep one
/// handle and give the other to a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saves: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `raw`
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            saves: Arc::new(Mutex::new(vec![raw.into()])),
        }
    }

    /// Every value saved so far, oldest first
    pub fn saves(&self) -> Vec<String> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PathStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn save(&self, raw: &str) {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(raw.to_owned());
    }
}

/// One persisted entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPath {
    path: String,
    /// RFC 3339 local time of the write
    saved_at: String,
}

/// JSON file mapping keys to stored paths.
///
/// Several editors may share one file under different keys; writes only
/// replace their own key.
#[derive(Debug)]
pub struct FileStore {
    file: PathBuf,
    key: String,
    writer: Option<Writer>,
}

#[derive(Debug)]
struct Writer {
    tx: Sender<String>,
    handle: JoinHandle<()>,
}

impl FileStore {
    /// Open a store on `file` under `key` and start its writer thread.
    ///
    /// The file does not need to exist yet. If the thread cannot be
    /// spawned, saves are written synchronously instead.
    pub fn open(file: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        let file = file.into();
        let key = key.into();

        let (tx, rx) = mpsc::channel::<String>();
        let thread_file = file.clone();
        let thread_key = key.clone();
        let writer = match thread::Builder::new()
            .name("pathedit-store".to_string())
            .spawn(move || write_loop(rx, &thread_file, &thread_key))
        {
            Ok(handle) => Some(Writer { tx, handle }),
            Err(e) => {
                tracing::warn!("Failed to start store writer, saving synchronously: {}", e);
                None
            }
        };

        Self { file, key, writer }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn write_now(&self, raw: &str) {
        if let Err(e) = write_entry(&self.file, &self.key, raw) {
            tracing::warn!("Failed to save path to {}: {:#}", self.file.display(), e);
        }
    }
}

impl PathStore for FileStore {
    fn load(&self) -> Option<String> {
        match read_entries(&self.file) {
            Ok(mut entries) => entries.remove(&self.key).map(|entry| entry.path),
            Err(e) => {
                tracing::warn!("Ignoring unreadable store {}: {:#}", self.file.display(), e);
                None
            }
        }
    }

    fn save(&self, raw: &str) {
        match &self.writer {
            Some(writer) => {
                if writer.tx.send(raw.to_owned()).is_err() {
                    // Writer thread is gone
                    self.write_now(raw);
                }
            }
            None => self.write_now(raw),
        }
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Some(Writer { tx, handle }) = self.writer.take() {
            drop(tx);
            if handle.join().is_err() {
                tracing::warn!("Store writer for {} panicked", self.file.display());
            }
        }
    }
}

/// Writer thread body. Saves queued while a write is in flight are
/// collapsed so only the newest one hits the disk.
fn write_loop(rx: Receiver<String>, file: &Path, key: &str) {
    while let Ok(raw) = rx.recv() {
        let raw = rx.try_iter().last().unwrap_or(raw);
        match write_entry(file, key, &raw) {
            Ok(()) => tracing::debug!("Saved path to {}", file.display()),
            Err(e) => tracing::warn!("Failed to save path to {}: {:#}", file.display(), e),
        }
    }
}

fn read_entries(file: &Path) -> anyhow::Result<BTreeMap<String, StoredPath>> {
    if !file.exists() {
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&text).with_context(|| format!("parsing {}", file.display()))
}

fn write_entry(file: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut entries = read_entries(file).unwrap_or_else(|e| {
        tracing::warn!("Replacing unreadable store: {:#}", e);
        BTreeMap::new()
    });
    entries.insert(
        key.to_owned(),
        StoredPath {
            path: raw.to_owned(),
            saved_at: Local::now().to_rfc3339(),
        },
    );

    if let Some(parent) = file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(file, json).with_context(|| format!("writing {}", file.display()))?;
    Ok(())
}
