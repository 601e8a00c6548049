// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer gestures, wheel zoom and viewport control for EditSession

use super::EditSession;
use crate::editing::mouse::{Gesture, MouseEvent};
use crate::editing::viewport::wheel_to_scale;
use crate::path::PointRef;
use kurbo::{Point, Size, Vec2};

impl EditSession {
    /// Start a gesture. A hit point starts a drag, anything else pans.
    ///
    /// Returns false, leaving the current gesture alone, unless idle.
    pub fn begin_gesture(&mut self, event: MouseEvent) -> bool {
        if !self.gesture.is_idle() {
            tracing::debug!("Gesture already in progress: {:?}", self.gesture);
            return false;
        }

        self.gesture = match event.hit {
            Some(point) => {
                self.selection.focus(point.command());
                Gesture::DraggingPoint {
                    point,
                    is_new: false,
                }
            }
            None => Gesture::PanningCanvas {
                last: event.position,
            },
        };
        tracing::debug!("Begin gesture {:?}", self.gesture);
        true
    }

    /// Continue the current gesture
    pub fn on_pointer_move(&mut self, event: MouseEvent) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::DraggingPoint { point, is_new } => {
                let model = self.pointer_to_model(event.position);
                if !self.document.set_location(point, model) {
                    tracing::debug!("Point {:?} cannot move", point);
                    return;
                }
                if is_new && let PointRef::Target { command } = point {
                    self.document.reset_control_points(command);
                }
                self.raw_path = self.document.to_string();
            }
            Gesture::PanningCanvas { last } => {
                let delta = self.pointer_to_model(last) - self.pointer_to_model(event.position);
                self.transform.pan_by(delta);
                self.gesture = Gesture::PanningCanvas {
                    last: event.position,
                };
            }
        }
    }

    /// Finish the current gesture, returning true if it produced a
    /// history entry. Only point drags on a non-empty path do.
    pub fn end_gesture(&mut self) -> bool {
        let gesture = std::mem::take(&mut self.gesture);
        tracing::debug!("End gesture {:?}", gesture);
        match gesture {
            Gesture::DraggingPoint { .. } if !self.document.is_empty() => {
                self.commit();
                true
            }
            _ => false,
        }
    }

    /// Zoom by a wheel delta around the pointer
    pub fn on_wheel(&mut self, delta_y: f64, position: Point) -> bool {
        let pivot = self.pointer_to_model(position);
        self.zoom_at(wheel_to_scale(delta_y), Some(pivot))
    }

    /// Scale the viewport around `pivot` (model space, default center)
    pub fn zoom_at(&mut self, scale: f64, pivot: Option<Point>) -> bool {
        self.transform.zoom_at(scale, pivot)
    }

    /// Set the viewport; see `CoordinateTransform::update_viewport`
    pub fn update_viewport(
        &mut self,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> bool {
        self.transform.update_viewport(x, y, width, height)
    }

    /// Shift the viewport by `delta` model units
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        self.transform.pan_by(delta)
    }

    /// Report the canvas's device origin and pixel size after a layout
    pub fn set_canvas(&mut self, origin: Point, size: Size) -> bool {
        self.canvas_origin = origin;
        self.transform.set_canvas_size(size)
    }

    /// Map a device position to model space
    pub fn pointer_to_model(&self, position: Point) -> Point {
        self.transform.pointer_to_model(position, self.canvas_origin)
    }

    /// Map a model position to device space
    pub fn model_to_device(&self, model: Point) -> Point {
        self.transform.model_to_device(model, self.canvas_origin)
    }
}
