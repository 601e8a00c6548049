// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer gesture state machine.
//!
//! A gesture is one pointer-down, move..., pointer-up sequence. It either
//! drags a point or pans the canvas, never both, and a new gesture can only
//! start from `Idle`.

use crate::path::PointRef;
use kurbo::Point;

/// A pointer event as delivered by the host, in device pixels.
///
/// `hit` is the point under the pointer, resolved by the caller (or by
/// `EditSession::hit_test_point`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub position: Point,
    pub hit: Option<PointRef>,
}

impl MouseEvent {
    /// Event at `position` that did not hit any point
    pub fn at(position: Point) -> Self {
        Self {
            position,
            hit: None,
        }
    }

    /// Event at `position` over `point`
    pub fn on_point(position: Point, point: PointRef) -> Self {
        Self {
            position,
            hit: Some(point),
        }
    }
}

/// Current gesture
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Dragging empty canvas; `last` is the previous device position
    PanningCanvas { last: Point },
    /// Dragging a point. `is_new` marks a point created by an insert,
    /// whose handles are re-derived on every move.
    DraggingPoint { point: PointRef, is_new: bool },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// The point being dragged, if any
    pub fn dragged_point(&self) -> Option<PointRef> {
        match *self {
            Gesture::DraggingPoint { point, .. } => Some(point),
            _ => None,
        }
    }
}
