// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Path commands: one drawing instruction and its fixed argument list.
//!
//! A `Command` stores exactly what was written in the path string: the
//! letter (as a `CommandKind` plus a `relative` flag for lowercase) and the
//! raw numeric arguments. Absolute positions are never stored here; they
//! are resolved by walking the whole document (see `segment.rs`).

use kurbo::{Point, Vec2};
use std::fmt;

/// The kind of argument a grammar slot expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// Any numeric literal (sign, mantissa, optional exponent)
    Number,
    /// A single `0` or `1` digit (arc flags)
    Flag,
}

use ArgType::{Flag, Number};

/// Drawing command kind, independent of letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `M`: start a new subpath
    MoveTo,
    /// `L`: straight line
    LineTo,
    /// `H`: horizontal line
    HorizontalTo,
    /// `V`: vertical line
    VerticalTo,
    /// `Z`: close the current subpath
    ClosePath,
    /// `C`: cubic bezier with two explicit handles
    CurveTo,
    /// `S`: cubic bezier whose first handle mirrors the previous curve
    SmoothCurveTo,
    /// `Q`: quadratic bezier
    QuadTo,
    /// `T`: quadratic bezier whose handle mirrors the previous curve
    SmoothQuadTo,
    /// `A`: elliptical arc
    ArcTo,
}

impl CommandKind {
    /// Every kind, in grammar-table order
    pub const ALL: [CommandKind; 10] = [
        CommandKind::MoveTo,
        CommandKind::LineTo,
        CommandKind::HorizontalTo,
        CommandKind::VerticalTo,
        CommandKind::ClosePath,
        CommandKind::CurveTo,
        CommandKind::SmoothCurveTo,
        CommandKind::QuadTo,
        CommandKind::SmoothQuadTo,
        CommandKind::ArcTo,
    ];

    /// Resolve a command letter. Returns the kind and whether it was
    /// lowercase (relative).
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalTo,
            'V' => CommandKind::VerticalTo,
            'Z' => CommandKind::ClosePath,
            'C' => CommandKind::CurveTo,
            'S' => CommandKind::SmoothCurveTo,
            'Q' => CommandKind::QuadTo,
            'T' => CommandKind::SmoothQuadTo,
            'A' => CommandKind::ArcTo,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// Uppercase letter for this kind
    pub fn letter(self) -> char {
        match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HorizontalTo => 'H',
            CommandKind::VerticalTo => 'V',
            CommandKind::ClosePath => 'Z',
            CommandKind::CurveTo => 'C',
            CommandKind::SmoothCurveTo => 'S',
            CommandKind::QuadTo => 'Q',
            CommandKind::SmoothQuadTo => 'T',
            CommandKind::ArcTo => 'A',
        }
    }

    /// The grammar table: the fixed argument list for one repetition
    pub fn arg_types(self) -> &'static [ArgType] {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadTo => {
                &[Number, Number]
            }
            CommandKind::HorizontalTo | CommandKind::VerticalTo => &[Number],
            CommandKind::ClosePath => &[],
            CommandKind::CurveTo => &[Number, Number, Number, Number, Number, Number],
            CommandKind::SmoothCurveTo | CommandKind::QuadTo => &[Number, Number, Number, Number],
            CommandKind::ArcTo => &[Number, Number, Number, Flag, Flag, Number, Number],
        }
    }

    /// Number of arguments per repetition
    pub fn arg_count(self) -> usize {
        self.arg_types().len()
    }

    /// Number of explicit (draggable) control handles
    pub fn control_count(self) -> usize {
        match self {
            CommandKind::CurveTo => 2,
            CommandKind::SmoothCurveTo | CommandKind::QuadTo => 1,
            _ => 0,
        }
    }
}

/// A single drawing command as written in the path string
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    /// True iff the letter was lowercase
    pub relative: bool,
    /// Raw arguments, `kind.arg_count()` of them
    pub args: Vec<f64>,
}

impl Command {
    /// Create a command. `args` must match the kind's argument count.
    pub fn new(kind: CommandKind, relative: bool, args: Vec<f64>) -> Self {
        debug_assert_eq!(args.len(), kind.arg_count(), "wrong argument count");
        Self {
            kind,
            relative,
            args,
        }
    }

    /// Build a zero-length command of `kind` placed at `anchor`.
    ///
    /// Relative commands get zero offsets, absolute ones repeat the anchor
    /// coordinates. Arcs default to unit radii with no rotation or flags.
    pub fn default_at(kind: CommandKind, relative: bool, anchor: Point) -> Self {
        let (x, y) = if relative {
            (0.0, 0.0)
        } else {
            (anchor.x, anchor.y)
        };
        let args = match kind {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadTo => vec![x, y],
            CommandKind::HorizontalTo => vec![x],
            CommandKind::VerticalTo => vec![y],
            CommandKind::ClosePath => vec![],
            CommandKind::SmoothCurveTo | CommandKind::QuadTo => vec![x, y, x, y],
            CommandKind::CurveTo => vec![x, y, x, y, x, y],
            CommandKind::ArcTo => vec![1.0, 1.0, 0.0, 0.0, 0.0, x, y],
        };
        Self::new(kind, relative, args)
    }

    /// The letter as written (lowercase when relative)
    pub fn letter(&self) -> char {
        let letter = self.kind.letter();
        if self.relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }

    /// Exactly `kind.arg_count()` arguments, all finite
    pub fn is_well_formed(&self) -> bool {
        self.args.len() == self.kind.arg_count() && self.args.iter().all(|a| a.is_finite())
    }

    pub fn is_moveto(&self) -> bool {
        self.kind == CommandKind::MoveTo
    }

    /// Point stored at argument pair `pair` (args `2*pair`, `2*pair+1`)
    pub(crate) fn pair(&self, pair: usize) -> Point {
        Point::new(self.args[2 * pair], self.args[2 * pair + 1])
    }

    /// Store `pos` (absolute) at argument pair `pair`, converting to an
    /// offset from `pen` when the command is relative
    pub(crate) fn set_pair(&mut self, pair: usize, pos: Point, pen: Point) {
        let value = if self.relative { pos - pen } else { pos.to_vec2() };
        self.args[2 * pair] = value.x;
        self.args[2 * pair + 1] = value.y;
    }

    /// Re-derive default handle positions for a freshly drawn curve.
    ///
    /// `previous` is where the pen starts (the preceding command's target)
    /// and `target` is this command's own resolved endpoint. Handles are
    /// spread along the chord so new curves never start with zero-length
    /// handles. Non-curve commands are left untouched.
    pub fn reset_control_points(&mut self, previous: Point, target: Point) {
        let offset = if self.relative {
            previous.to_vec2()
        } else {
            Vec2::ZERO
        };
        let along = |t: f64| previous.lerp(target, t) - offset;

        match self.kind {
            CommandKind::CurveTo => {
                let first = along(1.0 / 3.0);
                let second = along(2.0 / 3.0);
                self.args[..4].copy_from_slice(&[first.x, first.y, second.x, second.y]);
            }
            CommandKind::SmoothCurveTo => {
                let handle = along(2.0 / 3.0);
                self.args[..2].copy_from_slice(&[handle.x, handle.y]);
            }
            CommandKind::QuadTo => {
                let handle = along(0.5);
                self.args[..2].copy_from_slice(&[handle.x, handle.y]);
            }
            _ => {}
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for kind in CommandKind::ALL {
            let upper = kind.letter();
            assert_eq!(CommandKind::from_letter(upper), Some((kind, false)));
            let lower = upper.to_ascii_lowercase();
            assert_eq!(CommandKind::from_letter(lower), Some((kind, true)));
        }
        assert_eq!(CommandKind::from_letter('x'), None);
    }

    #[test]
    fn arg_counts_match_grammar() {
        assert_eq!(CommandKind::MoveTo.arg_count(), 2);
        assert_eq!(CommandKind::HorizontalTo.arg_count(), 1);
        assert_eq!(CommandKind::ClosePath.arg_count(), 0);
        assert_eq!(CommandKind::CurveTo.arg_count(), 6);
        assert_eq!(CommandKind::QuadTo.arg_count(), 4);
        assert_eq!(CommandKind::ArcTo.arg_count(), 7);
        assert_eq!(CommandKind::ArcTo.arg_types()[3], ArgType::Flag);
    }

    #[test]
    fn display_uses_case_and_spaces() {
        let cmd = Command::new(CommandKind::LineTo, true, vec![1.5, -2.0]);
        assert_eq!(cmd.to_string(), "l 1.5 -2");

        let close = Command::new(CommandKind::ClosePath, false, vec![]);
        assert_eq!(close.to_string(), "Z");
    }

    #[test]
    fn default_at_absolute_and_relative() {
        let anchor = Point::new(3.0, 4.0);

        let abs = Command::default_at(CommandKind::CurveTo, false, anchor);
        assert_eq!(abs.args, vec![3.0, 4.0, 3.0, 4.0, 3.0, 4.0]);

        let rel = Command::default_at(CommandKind::QuadTo, true, anchor);
        assert_eq!(rel.args, vec![0.0; 4]);

        let v = Command::default_at(CommandKind::VerticalTo, false, anchor);
        assert_eq!(v.args, vec![4.0]);

        let arc = Command::default_at(CommandKind::ArcTo, false, anchor);
        assert_eq!(arc.args, vec![1.0, 1.0, 0.0, 0.0, 0.0, 3.0, 4.0]);
    }

    #[test]
    fn reset_cubic_handles_spread_along_chord() {
        let mut cmd = Command::new(CommandKind::CurveTo, false, vec![9.0, 9.0, 9.0, 9.0, 9.0, 0.0]);
        cmd.reset_control_points(Point::new(0.0, 0.0), Point::new(9.0, 0.0));
        assert_eq!(&cmd.args[..4], &[3.0, 0.0, 6.0, 0.0]);
        // Target untouched
        assert_eq!(&cmd.args[4..], &[9.0, 0.0]);
    }

    #[test]
    fn reset_relative_quad_uses_offsets() {
        let mut cmd = Command::new(CommandKind::QuadTo, true, vec![0.0, 0.0, 4.0, 2.0]);
        cmd.reset_control_points(Point::new(10.0, 10.0), Point::new(14.0, 12.0));
        assert_eq!(&cmd.args[..2], &[2.0, 1.0]);
    }

    #[test]
    fn reset_ignores_lines() {
        let mut cmd = Command::new(CommandKind::LineTo, false, vec![1.0, 1.0]);
        cmd.reset_control_points(Point::ZERO, Point::new(5.0, 5.0));
        assert_eq!(cmd.args, vec![1.0, 1.0]);
    }
}
