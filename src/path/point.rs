// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Addressable points derived from a document.
//!
//! Points never own geometry. They refer back to their command by index
//! into the document's command sequence, so a full reparse simply produces
//! a new set of points instead of leaving stale references behind.

use kurbo::Point;

/// Address of a draggable point within a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointRef {
    /// The endpoint of command `command`
    Target { command: usize },
    /// Explicit handle `slot` of command `command` (argument pair `slot`)
    Control { command: usize, slot: usize },
}

impl PointRef {
    /// Index of the owning command
    pub fn command(&self) -> usize {
        match *self {
            PointRef::Target { command } | PointRef::Control { command, .. } => command,
        }
    }

    pub fn is_target(&self) -> bool {
        matches!(self, PointRef::Target { .. })
    }
}

/// The endpoint a command moves the pen to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPoint {
    pub command: usize,
    pub point: Point,
}

impl TargetPoint {
    pub fn id(&self) -> PointRef {
        PointRef::Target {
            command: self.command,
        }
    }
}

/// An explicit bezier handle stored in a command's arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub command: usize,
    pub slot: usize,
    pub point: Point,
    /// On-curve points this handle is drawn connected to
    pub anchors: Vec<Point>,
}

impl ControlPoint {
    pub fn id(&self) -> PointRef {
        PointRef::Control {
            command: self.command,
            slot: self.slot,
        }
    }
}

/// Display-only handle implied by a smooth (`S`/`T`) command.
///
/// Not draggable: it moves when the previous curve's handle moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectedPoint {
    pub command: usize,
    pub point: Point,
    /// The on-curve point the handle mirrors around
    pub anchor: Point,
}
