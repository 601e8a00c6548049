// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Linear undo/redo history of committed path strings.
//!
//! Every entry is an immutable raw path. `index` points at the entry that
//! is currently loaded into the document. Committing while not at the end
//! discards the redo branch.

use crate::settings;

/// Undo/redo stack of committed paths
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
    limit: usize,
}

impl History {
    /// Start a history whose only entry is `initial`
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_limit(initial, settings::history::LIMIT)
    }

    /// Like `new`, keeping at most `limit` entries (at least one)
    pub fn with_limit(initial: impl Into<String>, limit: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new current path, dropping anything that could be redone
    pub fn commit(&mut self, raw: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(raw.into());
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back; `None` when already at the oldest entry
    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    /// Step forward; `None` when already at the newest entry
    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry currently loaded
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
