// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! The editable path document.
//!
//! A `Document` owns the ordered command sequence and derived caches:
//! resolved segments, target points, explicit control points and the
//! display-only reflections of smooth commands. The caches are rebuilt in
//! full after every change; nothing is patched incrementally.
//!
//! Invariant: a non-empty document always starts with a moveto.

use super::command::{Command, CommandKind};
use super::parser::{self, MalformedPathError};
use super::point::{ControlPoint, PointRef, ReflectedPoint, TargetPoint};
use super::segment::{self, Segment};
use kurbo::{BezPath, Point, Rect, Shape, SvgArc};
use std::fmt;
use std::str::FromStr;

/// Flattening tolerance when converting arcs to beziers (model units)
const ARC_TOLERANCE: f64 = 0.01;

/// An ordered, mutable sequence of drawing commands
#[derive(Debug, Clone, Default)]
pub struct Document {
    commands: Vec<Command>,
    segments: Vec<Segment>,
    targets: Vec<TargetPoint>,
    controls: Vec<ControlPoint>,
    reflections: Vec<ReflectedPoint>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a raw path string, falling back to an empty
    /// document when the string is malformed.
    ///
    /// Use `str::parse` instead when the caller needs to tell an
    /// intentionally empty path apart from invalid input.
    pub fn from_raw(raw: &str) -> Self {
        match raw.parse() {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Falling back to an empty path: {}", e);
                Self::new()
            }
        }
    }

    fn from_commands(commands: Vec<Command>) -> Self {
        let mut document = Self {
            commands,
            ..Self::default()
        };
        document.refresh();
        document
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn command(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolved absolute geometry, one segment per command
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// One target point per command, in document order
    pub fn target_locations(&self) -> &[TargetPoint] {
        &self.targets
    }

    /// Explicit handles: two per `C`, one per `S` and `Q`, none otherwise
    pub fn control_locations(&self) -> &[ControlPoint] {
        &self.controls
    }

    /// Implicit handles of `S` and `T` commands, for display only
    pub fn smooth_reflections(&self) -> &[ReflectedPoint] {
        &self.reflections
    }

    /// Current model-space position of an addressed point
    pub fn location(&self, point: PointRef) -> Option<Point> {
        match point {
            PointRef::Target { command } => self.targets.get(command).map(|t| t.point),
            PointRef::Control { command, slot } => self
                .controls
                .iter()
                .find(|c| c.command == command && c.slot == slot)
                .map(|c| c.point),
        }
    }

    /// Insert `item` right after command `after`, returning its index.
    ///
    /// Without `after`, a moveto goes to the head of the document and any
    /// other command goes right after the leading moveto. Inserting a
    /// non-moveto into an empty document first adds an implicit `M 0 0`.
    /// An out-of-range `after` appends at the end.
    ///
    /// Returns `None`, leaving the document unchanged, if `item` does not
    /// carry exactly its kind's number of finite arguments.
    pub fn insert(&mut self, item: Command, after: Option<usize>) -> Option<usize> {
        if !item.is_well_formed() {
            tracing::warn!("Rejected malformed command {:?}", item);
            return None;
        }
        if self.commands.is_empty() && !item.is_moveto() {
            self.commands
                .push(Command::new(CommandKind::MoveTo, false, vec![0.0, 0.0]));
        }

        let index = match after {
            Some(after) => (after + 1).min(self.commands.len()),
            None if item.is_moveto() || self.commands.is_empty() => 0,
            None => 1,
        };
        self.commands.insert(index, item);
        self.refresh();
        Some(index)
    }

    /// Move an addressed point to `new_pos`, rewriting only the arguments
    /// of its owning command.
    ///
    /// Relative commands store the new position as an offset from their
    /// start point. Returns false if the point does not exist or cannot be
    /// moved (close path targets are implied by the subpath start).
    pub fn set_location(&mut self, point: PointRef, new_pos: Point) -> bool {
        if !new_pos.is_finite() {
            return false;
        }
        let index = point.command();
        let Some(pen) = self.segments.get(index).map(Segment::start) else {
            return false;
        };

        let cmd = &mut self.commands[index];
        match point {
            PointRef::Target { .. } => match cmd.kind {
                CommandKind::ClosePath => return false,
                CommandKind::HorizontalTo => {
                    cmd.args[0] = if cmd.relative {
                        new_pos.x - pen.x
                    } else {
                        new_pos.x
                    };
                }
                CommandKind::VerticalTo => {
                    cmd.args[0] = if cmd.relative {
                        new_pos.y - pen.y
                    } else {
                        new_pos.y
                    };
                }
                CommandKind::ArcTo => {
                    let value = if cmd.relative {
                        new_pos - pen
                    } else {
                        new_pos.to_vec2()
                    };
                    cmd.args[5] = value.x;
                    cmd.args[6] = value.y;
                }
                _ => {
                    let last_pair = cmd.args.len() / 2 - 1;
                    cmd.set_pair(last_pair, new_pos, pen);
                }
            },
            PointRef::Control { slot, .. } => {
                if slot >= cmd.kind.control_count() {
                    return false;
                }
                cmd.set_pair(slot, new_pos, pen);
            }
        }

        self.refresh();
        true
    }

    /// Give a freshly drawn curve sensible default handles, derived from
    /// the end of the preceding command and the curve's own target.
    ///
    /// No-op for the first command and for commands without handles.
    pub fn reset_control_points(&mut self, index: usize) {
        if index == 0 || index >= self.commands.len() {
            return;
        }
        let previous = self.segments[index - 1].target();
        let target = self.segments[index].target();
        self.commands[index].reset_control_points(previous, target);
        self.refresh();
    }

    /// Convert to a kurbo path (arcs are approximated by cubics)
    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo { to, .. } => bez.move_to(to),
                Segment::LineTo { to, .. } => bez.line_to(to),
                Segment::CubicTo {
                    ctrl1, ctrl2, to, ..
                } => bez.curve_to(ctrl1, ctrl2, to),
                Segment::QuadTo { ctrl, to, .. } => bez.quad_to(ctrl, to),
                Segment::ArcTo {
                    from,
                    to,
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                } => {
                    let svg_arc = SvgArc {
                        from,
                        to,
                        radii,
                        x_rotation: x_rotation.to_radians(),
                        large_arc,
                        sweep,
                    };
                    match kurbo::Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => {
                            for el in arc.append_iter(ARC_TOLERANCE) {
                                bez.push(el);
                            }
                        }
                        // Degenerate radii draw a straight line
                        None => bez.line_to(to),
                    }
                }
                Segment::ClosePath { .. } => bez.close_path(),
            }
        }
        bez
    }

    /// Tight bounding box of the rendered path, or `None` when empty
    pub fn bounding_box(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_bezpath().bounding_box())
    }

    /// Rebuild every derived cache from the command sequence
    fn refresh(&mut self) {
        self.segments = segment::resolve(&self.commands);
        self.targets.clear();
        self.controls.clear();
        self.reflections.clear();

        for (index, (cmd, seg)) in self.commands.iter().zip(&self.segments).enumerate() {
            self.targets.push(TargetPoint {
                command: index,
                point: seg.target(),
            });

            match (cmd.kind, *seg) {
                (
                    CommandKind::CurveTo,
                    Segment::CubicTo {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    },
                ) => {
                    self.controls.push(ControlPoint {
                        command: index,
                        slot: 0,
                        point: ctrl1,
                        anchors: vec![from],
                    });
                    self.controls.push(ControlPoint {
                        command: index,
                        slot: 1,
                        point: ctrl2,
                        anchors: vec![to],
                    });
                }
                (
                    CommandKind::SmoothCurveTo,
                    Segment::CubicTo {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    },
                ) => {
                    self.reflections.push(ReflectedPoint {
                        command: index,
                        point: ctrl1,
                        anchor: from,
                    });
                    self.controls.push(ControlPoint {
                        command: index,
                        slot: 0,
                        point: ctrl2,
                        anchors: vec![to],
                    });
                }
                (CommandKind::QuadTo, Segment::QuadTo { from, ctrl, to }) => {
                    self.controls.push(ControlPoint {
                        command: index,
                        slot: 0,
                        point: ctrl,
                        anchors: vec![from, to],
                    });
                }
                (CommandKind::SmoothQuadTo, Segment::QuadTo { from, ctrl, .. }) => {
                    self.reflections.push(ReflectedPoint {
                        command: index,
                        point: ctrl,
                        anchor: from,
                    });
                }
                _ => {}
            }
        }
    }
}

impl FromStr for Document {
    type Err = MalformedPathError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parser::parse(raw).map(Self::from_commands)
    }
}

/// Canonical serialization: letters and arguments separated by spaces
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}
