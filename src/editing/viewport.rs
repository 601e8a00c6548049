// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport transformation between device pixels and model space.
//!
//! The viewport is the rectangle of model space shown on the canvas. Its
//! aspect ratio is locked to the canvas, so one scale factor
//! (`stroke_width`, model units per device pixel) maps both axes. SVG
//! model space is y-down, same as the screen, so there is no flip.

use crate::settings;
use kurbo::{Point, Rect, Size, Vec2};

/// Rectangle of model space mapped onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewPort {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Maps device points to model points for one canvas
#[derive(Debug, Clone)]
pub struct CoordinateTransform {
    canvas: Size,
    viewport: ViewPort,
    stroke_width: f64,
}

impl CoordinateTransform {
    /// Create a transform for a canvas of `canvas` device pixels, showing
    /// one model unit per pixel from the origin.
    ///
    /// Degenerate canvas sizes fall back to the default canvas.
    pub fn new(canvas: Size) -> Self {
        let canvas = if is_positive(canvas.width) && is_positive(canvas.height) {
            canvas
        } else {
            Size::new(settings::canvas::WIDTH, settings::canvas::HEIGHT)
        };
        Self {
            canvas,
            viewport: ViewPort {
                x: 0.0,
                y: 0.0,
                width: canvas.width,
                height: canvas.height,
            },
            stroke_width: 1.0,
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn viewport(&self) -> ViewPort {
        self.viewport
    }

    /// Model units per device pixel
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Resize the canvas, keeping the viewport origin and width
    pub fn set_canvas_size(&mut self, canvas: Size) -> bool {
        if !is_positive(canvas.width) || !is_positive(canvas.height) {
            return false;
        }
        self.canvas = canvas;
        let ViewPort { x, y, width, .. } = self.viewport;
        self.update_viewport(x, y, Some(width), None)
    }

    /// Commit a new viewport.
    ///
    /// If exactly one of `width`/`height` is `None` it is derived from the
    /// other using the canvas aspect ratio. Non-positive or non-finite
    /// results are rejected and leave the viewport unchanged. Origin and
    /// extent are rounded so repeated zooming does not accumulate drift.
    pub fn update_viewport(
        &mut self,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> bool {
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (None, Some(h)) => (self.canvas.width * h / self.canvas.height, h),
            (Some(w), None) => (w, self.canvas.height * w / self.canvas.width),
            (None, None) => return false,
        };

        if !is_positive(width) || !is_positive(height) || !x.is_finite() || !y.is_finite() {
            tracing::debug!(
                "Rejected viewport x={} y={} w={} h={}",
                x,
                y,
                width,
                height
            );
            return false;
        }

        self.viewport = ViewPort {
            x: round_to_precision(x, settings::viewport::ORIGIN_PRECISION),
            y: round_to_precision(y, settings::viewport::ORIGIN_PRECISION),
            width: round_to_precision(width, settings::viewport::EXTENT_PRECISION),
            height: round_to_precision(height, settings::viewport::EXTENT_PRECISION),
        };
        self.stroke_width = self.viewport.width / self.canvas.width;
        true
    }

    /// Fit the viewport around `bbox` plus a margin, matching the canvas
    /// aspect ratio without stretching.
    pub fn auto_fit(&mut self, bbox: Rect) -> bool {
        let bbox = bbox.abs();
        let margin = settings::viewport::FIT_MARGIN;
        let ratio = self.canvas.height / self.canvas.width;

        let mut width = bbox.width() + 2.0 * margin;
        let mut height = bbox.height() + 2.0 * margin;
        if ratio < height / width {
            width = height / ratio;
        } else {
            height = ratio * width;
        }

        self.update_viewport(bbox.x0 - margin, bbox.y0 - margin, Some(width), Some(height))
    }

    /// Scale the viewport by `scale` keeping `pivot` (model space, default
    /// the viewport center) at the same device position.
    ///
    /// Scales above 1 zoom out, below 1 zoom in.
    pub fn zoom_at(&mut self, scale: f64, pivot: Option<Point>) -> bool {
        if !is_positive(scale) {
            return false;
        }
        let vp = self.viewport;
        let pivot = pivot.unwrap_or_else(|| vp.center());

        let x = vp.x + (pivot.x - vp.x) - scale * (pivot.x - vp.x);
        let y = vp.y + (pivot.y - vp.y) - scale * (pivot.y - vp.y);
        self.update_viewport(x, y, Some(scale * vp.width), Some(scale * vp.height))
    }

    /// Shift the viewport origin by `delta` model units; never resizes
    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        let vp = self.viewport;
        self.update_viewport(
            vp.x + delta.x,
            vp.y + delta.y,
            Some(vp.width),
            Some(vp.height),
        )
    }

    /// Map a device point to model space, given the canvas's device origin
    pub fn pointer_to_model(&self, device: Point, canvas_origin: Point) -> Point {
        self.viewport.origin() + (device - canvas_origin) * self.stroke_width
    }

    /// Inverse of `pointer_to_model`
    pub fn model_to_device(&self, model: Point, canvas_origin: Point) -> Point {
        canvas_origin + (model - self.viewport.origin()) / self.stroke_width
    }
}

/// Scale factor for a wheel delta. Composes multiplicatively, so repeated
/// ticks zoom exponentially and never reach a zero-sized viewport.
pub fn wheel_to_scale(delta_y: f64) -> f64 {
    settings::viewport::WHEEL_ZOOM_BASE.powf(delta_y)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Round to `digits` significant digits
fn round_to_precision(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{:.*e}", digits.saturating_sub(1), value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(width: f64, height: f64) -> CoordinateTransform {
        CoordinateTransform::new(Size::new(width, height))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn aspect_lock_derives_missing_height() {
        let mut t = transform(200.0, 100.0);
        assert!(t.update_viewport(0.0, 0.0, Some(100.0), None));
        assert_eq!(t.viewport().height, 50.0);
        assert_eq!(t.stroke_width(), 0.5);

        assert!(t.update_viewport(0.0, 0.0, None, Some(10.0)));
        assert_eq!(t.viewport().width, 20.0);
    }

    #[test]
    fn non_positive_extent_is_rejected() {
        let mut t = transform(200.0, 100.0);
        t.update_viewport(1.0, 2.0, Some(100.0), Some(50.0));
        let before = t.viewport();

        assert!(!t.update_viewport(0.0, 0.0, Some(0.0), Some(10.0)));
        assert!(!t.update_viewport(0.0, 0.0, Some(10.0), Some(-1.0)));
        assert!(!t.update_viewport(0.0, 0.0, None, None));
        assert!(!t.update_viewport(0.0, 0.0, Some(f64::NAN), None));
        assert_eq!(t.viewport(), before);
    }

    #[test]
    fn viewport_is_rounded() {
        let mut t = transform(100.0, 100.0);
        t.update_viewport(1.23456789, -0.000123456789, Some(123.456), Some(0.0123456));
        let vp = t.viewport();
        assert_eq!(vp.x, 1.23457);
        assert_eq!(vp.y, -0.000123457);
        assert_eq!(vp.width, 123.5);
        assert_eq!(vp.height, 0.01235);
    }

    #[test]
    fn auto_fit_keeps_aspect_and_contains_box() {
        let mut t = transform(200.0, 100.0);
        assert!(t.auto_fit(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let vp = t.viewport();
        assert_eq!((vp.x, vp.y, vp.width, vp.height), (-1.0, -1.0, 24.0, 12.0));

        // Wide box on a square canvas grows the height instead
        let mut t = transform(100.0, 100.0);
        t.auto_fit(Rect::new(0.0, 0.0, 20.0, 2.0));
        let vp = t.viewport();
        assert_eq!((vp.width, vp.height), (22.0, 22.0));
        assert!(vp.to_rect().contains(Point::new(20.0, 2.0)));
    }

    #[test]
    fn zoom_keeps_pivot_on_screen() {
        let mut t = transform(200.0, 100.0);
        t.update_viewport(0.0, 0.0, Some(100.0), Some(50.0));
        let origin = Point::new(0.0, 0.0);
        let pivot = Point::new(30.0, 20.0);

        let before = t.model_to_device(pivot, origin);
        assert!(t.zoom_at(0.5, Some(pivot)));
        let after = t.model_to_device(pivot, origin);

        assert!(close(before.x, after.x) && close(before.y, after.y));
        let back = t.pointer_to_model(after, origin);
        assert!(close(back.x, pivot.x) && close(back.y, pivot.y));
        assert_eq!(t.viewport().width, 50.0);
    }

    #[test]
    fn zoom_defaults_to_center() {
        let mut t = transform(100.0, 100.0);
        t.update_viewport(0.0, 0.0, Some(10.0), Some(10.0));
        t.zoom_at(2.0, None);
        assert_eq!(t.viewport().center(), Point::new(5.0, 5.0));
        assert_eq!(t.viewport().width, 20.0);
        assert!(!t.zoom_at(0.0, None));
        assert!(!t.zoom_at(-2.0, None));
    }

    #[test]
    fn wheel_scale_composes() {
        assert_eq!(wheel_to_scale(0.0), 1.0);
        assert!(wheel_to_scale(-100.0) < 1.0);
        assert!(wheel_to_scale(100.0) > 1.0);
        let composed = wheel_to_scale(30.0) * wheel_to_scale(70.0);
        assert!((composed - wheel_to_scale(100.0)).abs() < 1e-12);
    }

    #[test]
    fn pointer_maps_through_canvas_origin() {
        let mut t = transform(200.0, 100.0);
        t.update_viewport(10.0, 20.0, Some(100.0), None);
        let origin = Point::new(5.0, 5.0);
        let model = t.pointer_to_model(Point::new(105.0, 55.0), origin);
        assert_eq!(model, Point::new(60.0, 45.0));
        assert_eq!(t.model_to_device(model, origin), Point::new(105.0, 55.0));
    }

    #[test]
    fn pan_never_resizes() {
        let mut t = transform(200.0, 100.0);
        t.update_viewport(0.0, 0.0, Some(100.0), None);
        t.pan_by(Vec2::new(3.0, -4.0));
        let vp = t.viewport();
        assert_eq!((vp.x, vp.y, vp.width, vp.height), (3.0, -4.0, 100.0, 50.0));
    }

    #[test]
    fn canvas_resize_keeps_width() {
        let mut t = transform(200.0, 100.0);
        t.update_viewport(0.0, 0.0, Some(100.0), None);
        assert!(t.set_canvas_size(Size::new(100.0, 100.0)));
        assert_eq!(t.viewport().height, 100.0);
        assert_eq!(t.stroke_width(), 1.0);
        assert!(!t.set_canvas_size(Size::new(0.0, 10.0)));
    }
}
