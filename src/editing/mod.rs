// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod mouse;
pub mod selection;
pub mod session;
pub mod undo;
pub mod viewport;

pub use hit_test::HitTestResult;
pub use mouse::{Gesture, MouseEvent};
pub use selection::Selection;
pub use session::EditSession;
pub use undo::History;
pub use viewport::{CoordinateTransform, ViewPort, wheel_to_scale};
