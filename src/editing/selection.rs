// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Focused and hovered commands.
//!
//! Both are plain indices into the document's command sequence. They are
//! cleared whenever the document is swapped out from under them (undo,
//! redo, reload), since indices do not survive a reparse.

/// Which commands are highlighted in the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    focused: Option<usize>,
    hovered: Option<usize>,
}

impl Selection {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn focus(&mut self, command: usize) {
        self.focused = Some(command);
    }

    pub fn hover(&mut self, command: Option<usize>) {
        self.hovered = command;
    }

    pub fn is_empty(&self) -> bool {
        self.focused.is_none() && self.hovered.is_none()
    }

    /// Drop both focus and hover
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_selection_is_empty() {
        let sel = Selection::new();
        assert!(sel.is_empty());
        assert_eq!(sel.focused(), None);
    }

    #[test]
    fn focus_and_hover_are_independent() {
        let mut sel = Selection::new();
        sel.focus(2);
        sel.hover(Some(5));
        assert_eq!(sel.focused(), Some(2));
        assert_eq!(sel.hovered(), Some(5));

        sel.hover(None);
        assert_eq!(sel.focused(), Some(2));
        assert!(!sel.is_empty());
    }

    #[test]
    fn clear_drops_everything() {
        let mut sel = Selection::new();
        sel.focus(1);
        sel.hover(Some(1));
        sel.clear();
        assert!(sel.is_empty());
    }
}
