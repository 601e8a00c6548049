// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor settings and configuration constants.
//!
//! These are the compiled-in defaults. Anything a user may want to change
//! per installation is mirrored in `config::EditorConfig`, which falls back
//! to the values here.

// ============================================================================
// VIEWPORT SETTINGS
// ============================================================================
/// Base of the exponential wheel zoom (`scale = base ^ delta_y`)
const WHEEL_ZOOM_BASE: f64 = 1.002;

/// Margin added around the path bounding box when fitting (model units)
const FIT_MARGIN: f64 = 1.0;

/// Significant digits kept for the viewport origin
const ORIGIN_PRECISION: usize = 6;

/// Significant digits kept for the viewport extent
const EXTENT_PRECISION: usize = 4;

// ============================================================================
// CANVAS SETTINGS
// ============================================================================
/// Default canvas width in device pixels
const CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height in device pixels
const CANVAS_HEIGHT: f64 = 600.0;

// ============================================================================
// HIT TEST SETTINGS
// ============================================================================
/// Maximum distance (device pixels) for a click to grab a point
const MIN_CLICK_DISTANCE: f64 = 10.0;

// ============================================================================
// HISTORY SETTINGS
// ============================================================================
/// Maximum number of committed paths kept for undo
const HISTORY_LIMIT: usize = 200;

// ============================================================================
// STORAGE SETTINGS
// ============================================================================
/// Key under which the last committed path is persisted
const STORAGE_KEY: &str = "defaultSvgPath";

/// Path shown when nothing has been persisted yet
const DEFAULT_PATH: &str = "M 4 8 L 10 1 L 13 0 L 12 3 L 5 9 C 6 10 6 11 7 10 \
     C 7 11 8 12 7 12 A 1.42 1.42 0 0 1 6 13 A 5 5 0 0 0 4 10 \
     Q 3.5 9.9 3.5 10.5 T 2 11.8 T 1.2 11 T 2.5 9.5 T 3 9 \
     A 5 5 90 0 0 0 7 A 1.42 1.42 0 0 1 1 6 C 1 5 2 6 3 6 C 2 7 3 7 4 8 \
     M 10 1 L 10 3 L 12 3 L 10.2 2.8 L 10 1";

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Viewport transform settings (zoom, fit, rounding)
pub mod viewport {
    /// Base of the exponential wheel zoom
    pub const WHEEL_ZOOM_BASE: f64 = super::WHEEL_ZOOM_BASE;

    /// Margin around the bounding box when fitting
    pub const FIT_MARGIN: f64 = super::FIT_MARGIN;

    /// Significant digits kept for the viewport origin
    pub const ORIGIN_PRECISION: usize = super::ORIGIN_PRECISION;

    /// Significant digits kept for the viewport extent
    pub const EXTENT_PRECISION: usize = super::EXTENT_PRECISION;
}

/// Default canvas dimensions (device pixels)
pub mod canvas {
    pub const WIDTH: f64 = super::CANVAS_WIDTH;
    pub const HEIGHT: f64 = super::CANVAS_HEIGHT;
}

/// Point hit testing
pub mod hit_test {
    /// Maximum click distance in device pixels
    pub const MIN_CLICK_DISTANCE: f64 = super::MIN_CLICK_DISTANCE;
}

/// Undo history
pub mod history {
    /// Maximum number of entries kept
    pub const LIMIT: usize = super::HISTORY_LIMIT;
}

/// Persisted state
pub mod storage {
    /// Key of the last committed path
    pub const KEY: &str = super::STORAGE_KEY;

    /// Fallback path when the store is empty
    pub const DEFAULT_PATH: &str = super::DEFAULT_PATH;
}
