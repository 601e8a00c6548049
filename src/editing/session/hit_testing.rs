// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Hit testing and hover tracking for EditSession

use super::EditSession;
use crate::editing::hit_test::{self, HitTestResult};
use crate::editing::mouse::MouseEvent;
use crate::path::{CommandKind, PointRef};
use kurbo::Point;

impl EditSession {
    /// Hit test for a point at device coordinates
    ///
    /// Returns the closest target or control point within
    /// `MIN_CLICK_DISTANCE` device pixels. Targets are checked first, so
    /// they win over a handle at the same spot. Close path targets are
    /// skipped since they cannot be dragged.
    pub fn hit_test_point(&self, position: Point) -> Option<HitTestResult> {
        let document = &self.document;
        let targets = document
            .target_locations()
            .iter()
            .filter(|t| {
                document
                    .command(t.command)
                    .is_some_and(|c| c.kind != CommandKind::ClosePath)
            })
            .map(|t| (t.id(), self.model_to_device(t.point)));
        let controls = document
            .control_locations()
            .iter()
            .map(|c| (c.id(), self.model_to_device(c.point)));

        let result = hit_test::find_closest(
            position,
            targets.chain(controls),
            hit_test::MIN_CLICK_DISTANCE,
        );

        if let Some(hit) = &result {
            tracing::debug!(
                "[hit_test_point] ({}, {}) hit {:?} at distance {}",
                position.x,
                position.y,
                hit.point,
                hit.distance
            );
        }
        result
    }

    /// Pointer-down helper: resolve the hit point and start a gesture
    pub fn press(&mut self, position: Point) -> bool {
        let hit = self.hit_test_point(position).map(|h| h.point);
        self.begin_gesture(MouseEvent { position, hit })
    }

    /// Update the hovered command from a pointer position
    pub fn hover(&mut self, position: Point) -> Option<PointRef> {
        let hit = self.hit_test_point(position).map(|h| h.point);
        self.selection.hover(hit.map(|p| p.command()));
        hit
    }
}
