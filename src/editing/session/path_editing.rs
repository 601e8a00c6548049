// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Path editing methods for EditSession: loading, inserting commands and
//! fitting the viewport to the path

use super::EditSession;
use crate::editing::mouse::Gesture;
use crate::path::{Command, CommandKind, Document, MalformedPathError, PointRef};
use kurbo::{Point, Rect};

impl EditSession {
    /// Replace the document with a fresh parse of `raw`.
    ///
    /// Malformed input yields an empty document. The selection is cleared
    /// and any gesture is abandoned, since point references do not survive
    /// a reparse. Does not touch history.
    pub fn reload_path(&mut self, raw: &str, auto_fit: bool) {
        self.raw_path = raw.to_string();
        self.document = Document::from_raw(raw);
        self.selection.clear();
        self.gesture = Gesture::Idle;
        tracing::info!("Loaded path with {} commands", self.document.len());

        if auto_fit {
            self.auto_fit();
        }
    }

    /// Load a user supplied path as a new, undoable edit.
    ///
    /// Unlike `reload_path`, malformed input is reported instead of
    /// replaced by an empty document, and the current path is kept.
    pub fn import_path(&mut self, raw: &str) -> Result<(), MalformedPathError> {
        let document: Document = raw.parse()?;
        self.document = document;
        self.selection.clear();
        self.gesture = Gesture::Idle;
        self.auto_fit();
        self.commit();
        Ok(())
    }

    /// Fit the viewport around the path's own bounding box.
    ///
    /// Returns false for an empty path.
    pub fn auto_fit(&mut self) -> bool {
        match self.document.bounding_box() {
            Some(bbox) => self.auto_fit_to(bbox),
            None => false,
        }
    }

    /// Fit the viewport around an externally measured bounding box
    pub fn auto_fit_to(&mut self, bbox: Rect) -> bool {
        let fitted = self.transform.auto_fit(bbox);
        if fitted {
            let vp = self.transform.viewport();
            tracing::debug!(
                "Fitted viewport to ({}, {}) {}x{}",
                vp.x,
                vp.y,
                vp.width,
                vp.height
            );
        }
        fitted
    }

    /// Insert a zero-length command of `kind` after command `after` and
    /// start dragging its target, so the next pointer move shapes it.
    ///
    /// The command is placed at the end of its predecessor, or at the
    /// origin in an empty document. Returns the new command's index, or
    /// `None` while another gesture is in progress.
    pub fn insert_command(
        &mut self,
        kind: CommandKind,
        relative: bool,
        after: Option<usize>,
    ) -> Option<usize> {
        if !self.gesture.is_idle() {
            tracing::debug!("Ignoring insert during {:?}", self.gesture);
            return None;
        }

        let anchor = self.insertion_anchor(kind, after);
        let command = Command::default_at(kind, relative, anchor);
        let index = self.document.insert(command, after)?;
        self.raw_path = self.document.to_string();

        self.selection.focus(index);
        self.gesture = Gesture::DraggingPoint {
            point: PointRef::Target { command: index },
            is_new: true,
        };
        tracing::debug!(
            "Inserted {:?} at {} anchored at ({}, {})",
            kind,
            index,
            anchor.x,
            anchor.y
        );
        Some(index)
    }

    /// Target of the command the new one will follow
    fn insertion_anchor(&self, kind: CommandKind, after: Option<usize>) -> Point {
        let targets = self.document.target_locations();
        let predecessor = match after {
            Some(after) => Some(after.min(targets.len().saturating_sub(1))),
            // A moveto without `after` goes to the head and has no predecessor
            None if kind == CommandKind::MoveTo => None,
            None => Some(0),
        };
        predecessor
            .and_then(|i| targets.get(i))
            .map(|t| t.point)
            .unwrap_or(Point::ZERO)
    }
}
