// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Absolute segment geometry resolved from a command sequence.
//!
//! Commands only store what was written; a `Segment` is the same command
//! with every coordinate resolved to model space, including the implicit
//! handles of smooth (`S`/`T`) commands. Segments are rebuilt in one
//! left-to-right pass whenever the document changes.

use super::command::{Command, CommandKind};
use kurbo::{Point, Vec2};

/// A command resolved to absolute model-space geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo {
        from: Point,
        to: Point,
    },
    LineTo {
        from: Point,
        to: Point,
    },
    /// Cubic bezier (`C` or `S`). For `S`, `ctrl1` is the reflected handle.
    CubicTo {
        from: Point,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    /// Quadratic bezier (`Q` or `T`). For `T`, `ctrl` is the reflected handle.
    QuadTo {
        from: Point,
        ctrl: Point,
        to: Point,
    },
    ArcTo {
        from: Point,
        to: Point,
        radii: Vec2,
        /// Rotation of the ellipse x axis, in degrees
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
    /// Close back to the subpath start (`to`)
    ClosePath {
        from: Point,
        to: Point,
    },
}

impl Segment {
    /// Where the pen ends up after this segment
    pub fn target(&self) -> Point {
        match *self {
            Segment::MoveTo { to, .. }
            | Segment::LineTo { to, .. }
            | Segment::CubicTo { to, .. }
            | Segment::QuadTo { to, .. }
            | Segment::ArcTo { to, .. }
            | Segment::ClosePath { to, .. } => to,
        }
    }

    /// Where the pen was before this segment
    pub fn start(&self) -> Point {
        match *self {
            Segment::MoveTo { from, .. }
            | Segment::LineTo { from, .. }
            | Segment::CubicTo { from, .. }
            | Segment::QuadTo { from, .. }
            | Segment::ArcTo { from, .. }
            | Segment::ClosePath { from, .. } => from,
        }
    }
}

/// Pen state carried across one resolution pass
#[derive(Debug, Default)]
struct Pen {
    position: Point,
    subpath_start: Point,
    /// Last explicit or implicit cubic handle, if the previous command was a cubic
    last_cubic: Option<Point>,
    /// Last quadratic handle, if the previous command was a quadratic
    last_quad: Option<Point>,
}

impl Pen {
    fn reflect(&self, handle: Option<Point>) -> Point {
        match handle {
            Some(handle) => self.position + (self.position - handle),
            None => self.position,
        }
    }
}

/// Resolve every command to absolute geometry, in document order.
///
/// The pen starts at the origin, so a leading relative moveto is taken
/// relative to `(0, 0)`.
pub fn resolve(commands: &[Command]) -> Vec<Segment> {
    let mut pen = Pen::default();
    let mut segments = Vec::with_capacity(commands.len());

    for cmd in commands {
        let from = pen.position;
        let base = if cmd.relative {
            from.to_vec2()
        } else {
            Vec2::ZERO
        };
        let at = |pair: usize| cmd.pair(pair) + base;
        let args = &cmd.args;

        let segment = match cmd.kind {
            CommandKind::MoveTo => Segment::MoveTo { from, to: at(0) },
            CommandKind::LineTo => Segment::LineTo { from, to: at(0) },
            CommandKind::HorizontalTo => Segment::LineTo {
                from,
                to: Point::new(args[0] + base.x, from.y),
            },
            CommandKind::VerticalTo => Segment::LineTo {
                from,
                to: Point::new(from.x, args[0] + base.y),
            },
            CommandKind::ClosePath => Segment::ClosePath {
                from,
                to: pen.subpath_start,
            },
            CommandKind::CurveTo => Segment::CubicTo {
                from,
                ctrl1: at(0),
                ctrl2: at(1),
                to: at(2),
            },
            CommandKind::SmoothCurveTo => Segment::CubicTo {
                from,
                ctrl1: pen.reflect(pen.last_cubic),
                ctrl2: at(0),
                to: at(1),
            },
            CommandKind::QuadTo => Segment::QuadTo {
                from,
                ctrl: at(0),
                to: at(1),
            },
            CommandKind::SmoothQuadTo => Segment::QuadTo {
                from,
                ctrl: pen.reflect(pen.last_quad),
                to: at(0),
            },
            CommandKind::ArcTo => Segment::ArcTo {
                from,
                to: Point::new(args[5], args[6]) + base,
                radii: Vec2::new(args[0], args[1]),
                x_rotation: args[2],
                large_arc: args[3] != 0.0,
                sweep: args[4] != 0.0,
            },
        };

        pen.last_cubic = None;
        pen.last_quad = None;
        match segment {
            Segment::CubicTo { ctrl2, .. } => pen.last_cubic = Some(ctrl2),
            Segment::QuadTo { ctrl, .. } => pen.last_quad = Some(ctrl),
            Segment::MoveTo { to, .. } => pen.subpath_start = to,
            _ => {}
        }
        pen.position = segment.target();
        segments.push(segment);
    }

    segments
}
