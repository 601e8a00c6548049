// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! SVG path data: grammar, commands and the editable document.
//!
//! `parser` turns a raw `d` string into `Command`s, `segment` resolves them
//! to absolute geometry, and `Document` ties both together with the derived
//! target and control points the editor drags around. Documents convert to
//! `kurbo::BezPath` for rendering and measuring.

pub mod command;
pub mod document;
pub mod parser;
pub mod point;
pub mod segment;

pub use command::{ArgType, Command, CommandKind};
pub use document::Document;
pub use parser::{MalformedPathError, ParseErrorKind, parse};
pub use point::{ControlPoint, PointRef, ReflectedPoint, TargetPoint};
pub use segment::Segment;
