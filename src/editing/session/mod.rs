// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session - owns the document, viewport and history of one editor

mod hit_testing;
mod path_editing;
mod pointer;

use super::mouse::Gesture;
use super::selection::Selection;
use super::undo::History;
use super::viewport::CoordinateTransform;
use crate::config::EditorConfig;
use crate::path::Document;
use crate::store::PathStore;
use kurbo::{Point, Size};

/// Editing session for a single path
///
/// Every pointer and wheel event is applied to completion before the next
/// one arrives. Intermediate drag positions are applied to the document
/// immediately but only the state at the end of a gesture reaches the
/// history and the store.
#[derive(Debug)]
pub struct EditSession {
    /// Raw path string matching `document`
    raw_path: String,

    /// Parsed path with its derived points
    document: Document,

    /// Device to model mapping
    transform: CoordinateTransform,

    /// Device position of the canvas's top-left corner
    canvas_origin: Point,

    history: History,

    gesture: Gesture,

    /// Focused and hovered commands
    pub selection: Selection,

    /// Where committed paths are persisted
    store: Box<dyn PathStore>,
}

impl EditSession {
    /// Create a session editing `raw` on a canvas of `canvas` pixels.
    ///
    /// `raw` becomes the first history entry. Malformed input yields an
    /// empty document. The viewport is fitted around the path.
    pub fn new(
        raw: impl Into<String>,
        canvas: Size,
        store: Box<dyn PathStore>,
        history_limit: usize,
    ) -> Self {
        let raw = raw.into();
        let mut session = Self {
            document: Document::new(),
            transform: CoordinateTransform::new(canvas),
            canvas_origin: Point::ZERO,
            history: History::with_limit(raw.clone(), history_limit),
            gesture: Gesture::Idle,
            selection: Selection::new(),
            raw_path: String::new(),
            store,
        };
        session.reload_path(&raw, true);
        session
    }

    /// Create a session from configuration, resuming the last persisted
    /// path or the configured default when nothing was stored.
    pub fn restore(config: &EditorConfig, store: Box<dyn PathStore>) -> Self {
        let raw = match store.load() {
            Some(raw) => {
                tracing::info!("Restored path from store ({} bytes)", raw.len());
                raw
            }
            None => {
                tracing::info!("No stored path, using default");
                config.default_path.clone()
            }
        };
        Self::new(raw, config.canvas_size(), store, config.history_limit)
    }

    /// Current raw path
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn canvas_origin(&self) -> Point {
        self.canvas_origin
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Step back in history. No-op at the oldest entry.
    pub fn undo(&mut self) -> bool {
        let Some(raw) = self.history.undo().map(str::to_owned) else {
            tracing::debug!("Nothing to undo");
            return false;
        };
        tracing::info!("Undo to history entry {}", self.history.index());
        self.apply_history_entry(&raw);
        true
    }

    /// Step forward in history. No-op at the newest entry.
    pub fn redo(&mut self) -> bool {
        let Some(raw) = self.history.redo().map(str::to_owned) else {
            tracing::debug!("Nothing to redo");
            return false;
        };
        tracing::info!("Redo to history entry {}", self.history.index());
        self.apply_history_entry(&raw);
        true
    }

    fn apply_history_entry(&mut self, raw: &str) {
        self.reload_path(raw, false);
        self.store.save(raw);
    }

    /// Record the current document as a new history entry and persist it
    fn commit(&mut self) {
        self.raw_path = self.document.to_string();
        self.history.commit(self.raw_path.clone());
        self.store.save(&self.raw_path);
        tracing::info!(
            "Committed path ({} commands, history {}/{})",
            self.document.len(),
            self.history.index() + 1,
            self.history.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::mouse::MouseEvent;
    use crate::path::{CommandKind, PointRef};
    use crate::store::MemoryStore;

    /// Session on a 100x100 canvas showing model space 0..100 one to one
    fn session(raw: &str) -> (EditSession, MemoryStore) {
        let store = MemoryStore::new();
        let mut session = EditSession::new(raw, Size::new(100.0, 100.0), Box::new(store.clone()), 50);
        session.update_viewport(0.0, 0.0, Some(100.0), Some(100.0));
        (session, store)
    }

    fn drag(session: &mut EditSession, point: PointRef, from: Point, to: Point) {
        assert!(session.begin_gesture(MouseEvent::on_point(from, point)));
        session.on_pointer_move(MouseEvent::at(to));
        session.end_gesture();
    }

    #[test]
    fn restore_prefers_stored_path() {
        let config = EditorConfig::default();
        let store = MemoryStore::with_value("M 1 1 L 2 2");
        let session = EditSession::restore(&config, Box::new(store));
        assert_eq!(session.raw_path(), "M 1 1 L 2 2");
        assert_eq!(session.history().current(), "M 1 1 L 2 2");
    }

    #[test]
    fn restore_falls_back_to_default() {
        let config = EditorConfig {
            default_path: "M 0 0 L 5 5".to_string(),
            ..EditorConfig::default()
        };
        let session = EditSession::restore(&config, Box::new(MemoryStore::new()));
        assert_eq!(session.document().len(), 2);
    }

    #[test]
    fn malformed_stored_path_gives_empty_document() {
        let store = MemoryStore::with_value("garbage");
        let session = EditSession::restore(&EditorConfig::default(), Box::new(store));
        assert!(session.document().is_empty());
    }

    #[test]
    fn history_is_linear_through_the_session() {
        let (mut session, _store) = session("M 0 0 L 10 10");
        let target = PointRef::Target { command: 1 };

        drag(&mut session, target, Point::new(10.0, 10.0), Point::new(20.0, 20.0));
        drag(&mut session, target, Point::new(20.0, 20.0), Point::new(30.0, 30.0));
        assert!(session.undo());
        drag(&mut session, target, Point::new(20.0, 20.0), Point::new(40.0, 40.0));

        assert_eq!(
            session.history().entries(),
            ["M 0 0 L 10 10", "M 0 0 L 20 20", "M 0 0 L 40 40"]
        );
        assert!(!session.can_redo());
        assert!(!session.redo());
    }

    #[test]
    fn undo_redo_boundaries_do_nothing() {
        let (mut session, store) = session("M 0 0 L 10 10");
        assert!(!session.undo());
        assert!(!session.redo());
        assert_eq!(session.raw_path(), "M 0 0 L 10 10");
        assert!(store.saves().is_empty());
    }

    #[test]
    fn undo_redo_reload_and_persist() {
        let (mut session, store) = session("M 0 0 L 10 10");
        drag(
            &mut session,
            PointRef::Target { command: 1 },
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
        );
        session.selection.focus(1);
        session.selection.hover(Some(0));

        assert!(session.undo());
        assert_eq!(session.raw_path(), "M 0 0 L 10 10");
        assert_eq!(
            session.document().location(PointRef::Target { command: 1 }),
            Some(Point::new(10.0, 10.0))
        );
        assert!(session.selection.is_empty());

        assert!(session.redo());
        assert_eq!(session.raw_path(), "M 0 0 L 50 10");
        assert_eq!(
            store.saves(),
            ["M 0 0 L 50 10", "M 0 0 L 10 10", "M 0 0 L 50 10"]
        );
    }

    #[test]
    fn drag_only_touches_dragged_command() {
        let (mut session, _store) = session("M 0 0 L 10 10 c 1 1 2 2 3 3 h 5 Z");
        let before: Vec<String> = session
            .document()
            .commands()
            .iter()
            .map(ToString::to_string)
            .collect();

        drag(
            &mut session,
            PointRef::Target { command: 1 },
            Point::new(10.0, 10.0),
            Point::new(12.0, 17.0),
        );

        let after: Vec<String> = session
            .document()
            .commands()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(after[1], "L 12 17");
        for i in [0, 2, 3, 4] {
            assert_eq!(before[i], after[i]);
        }
    }

    #[test]
    fn panning_never_commits() {
        let (mut session, store) = session("M 0 0 L 10 10");
        assert!(session.begin_gesture(MouseEvent::at(Point::new(50.0, 50.0))));
        session.on_pointer_move(MouseEvent::at(Point::new(40.0, 45.0)));
        assert!(!session.end_gesture());

        let vp = session.transform().viewport();
        assert_eq!((vp.x, vp.y, vp.width, vp.height), (10.0, 5.0, 100.0, 100.0));
        assert_eq!(session.history().len(), 1);
        assert!(store.saves().is_empty());
    }

    #[test]
    fn inserted_point_follows_the_next_move() {
        let (mut session, store) = session("");
        let index = session
            .insert_command(CommandKind::LineTo, false, None)
            .unwrap();
        assert_eq!(index, 1);
        assert_eq!(session.raw_path(), "M 0 0 L 0 0");
        assert_eq!(session.selection.focused(), Some(1));
        assert_eq!(
            session.gesture(),
            Gesture::DraggingPoint {
                point: PointRef::Target { command: 1 },
                is_new: true
            }
        );

        session.on_pointer_move(MouseEvent::at(Point::new(30.0, 40.0)));
        assert!(session.end_gesture());
        assert_eq!(session.raw_path(), "M 0 0 L 30 40");
        assert_eq!(store.saves(), ["M 0 0 L 30 40"]);
    }

    #[test]
    fn inserted_curve_gets_default_handles() {
        let (mut session, _store) = session("M 0 0");
        let index = session
            .insert_command(CommandKind::CurveTo, false, Some(0))
            .unwrap();
        session.on_pointer_move(MouseEvent::at(Point::new(30.0, 60.0)));
        session.end_gesture();

        let doc = session.document();
        let first = doc
            .location(PointRef::Control { command: index, slot: 0 })
            .unwrap();
        let second = doc
            .location(PointRef::Control { command: index, slot: 1 })
            .unwrap();
        assert!(first.distance(Point::new(10.0, 20.0)) < 1e-9);
        assert!(second.distance(Point::new(20.0, 40.0)) < 1e-9);
    }

    #[test]
    fn insert_requires_idle() {
        let (mut session, _store) = session("M 0 0 L 10 10");
        session.begin_gesture(MouseEvent::at(Point::new(50.0, 50.0)));
        assert_eq!(session.insert_command(CommandKind::LineTo, false, None), None);
        assert_eq!(session.document().len(), 2);
    }

    #[test]
    fn gesture_starts_only_from_idle() {
        let (mut session, _store) = session("M 0 0 L 10 10");
        assert!(session.begin_gesture(MouseEvent::at(Point::new(50.0, 50.0))));
        assert!(!session.begin_gesture(MouseEvent::on_point(
            Point::new(10.0, 10.0),
            PointRef::Target { command: 1 }
        )));
        assert!(matches!(session.gesture(), Gesture::PanningCanvas { .. }));
    }
}
