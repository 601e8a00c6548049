// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented command driver for an `EditSession`.
//!
//! Stands in for the pointer and wheel events a canvas would deliver. One
//! command per line, arguments separated by whitespace, positions in device
//! pixels. Blank lines and lines starting with `#` are skipped. A failing
//! command prints `error: ...` and the script carries on.
//!
//! ```text
//! load M 0 0 L 10 10     import a path as a new edit
//! fit [x0 y0 x1 y1]      fit the viewport to the path or to a box
//! insert L [after]       insert a command (lowercase = relative)
//! down x y               pointer down (hit tested)
//! move x y               pointer move
//! up                     pointer up
//! wheel dy x y           wheel zoom around a device point
//! zoom scale [x y]       zoom around a model point
//! pan dx dy              shift the viewport in model units
//! undo | redo
//! print | points | viewport
//! ```

use crate::editing::{EditSession, MouseEvent};
use crate::path::CommandKind;
use anyhow::{Context, Result, anyhow, bail};
use kurbo::{Point, Rect, Vec2};
use std::io::{BufRead, Write};

/// Run every command read from `input`, writing results to `out`
pub fn run_script<R: BufRead, W: Write>(
    session: &mut EditSession,
    input: R,
    out: &mut W,
) -> Result<()> {
    for (number, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(e) = run_line(session, line, out) {
            tracing::debug!("Command on line {} failed: {:#}", number + 1, e);
            writeln!(out, "error: {e:#}")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Execute one command line
pub fn run_line<W: Write>(session: &mut EditSession, line: &str, out: &mut W) -> Result<()> {
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let mut args = Args::new(rest);

    match command {
        "load" => {
            session.import_path(rest.trim())?;
            writeln!(out, "{}", session.raw_path())?;
        }
        "fit" => {
            let fitted = if args.is_empty() {
                session.auto_fit()
            } else {
                let (x0, y0) = (args.number("x0")?, args.number("y0")?);
                let (x1, y1) = (args.number("x1")?, args.number("y1")?);
                session.auto_fit_to(Rect::new(x0, y0, x1, y1))
            };
            if !fitted {
                bail!("nothing to fit");
            }
            print_viewport(session, out)?;
        }
        "insert" => {
            let letter = args.word("command letter")?;
            let (kind, relative) = parse_letter(letter)?;
            let after = args.optional_index()?;
            let index = session
                .insert_command(kind, relative, after)
                .ok_or_else(|| anyhow!("a gesture is in progress"))?;
            writeln!(out, "inserted {} at {}", letter, index)?;
        }
        "down" => {
            let position = args.point()?;
            if !session.press(position) {
                bail!("a gesture is in progress");
            }
            writeln!(out, "{:?}", session.gesture())?;
        }
        "move" => {
            let position = args.point()?;
            session.on_pointer_move(MouseEvent::at(position));
        }
        "up" => {
            if session.end_gesture() {
                writeln!(out, "committed {}", session.raw_path())?;
            }
        }
        "wheel" => {
            let delta_y = args.number("dy")?;
            let position = args.point()?;
            if !session.on_wheel(delta_y, position) {
                bail!("zoom rejected");
            }
        }
        "zoom" => {
            let scale = args.number("scale")?;
            let pivot = if args.is_empty() {
                None
            } else {
                Some(args.point()?)
            };
            if !session.zoom_at(scale, pivot) {
                bail!("zoom rejected");
            }
        }
        "pan" => {
            let (dx, dy) = (args.number("dx")?, args.number("dy")?);
            session.pan_by(Vec2::new(dx, dy));
        }
        "undo" => {
            if !session.undo() {
                bail!("nothing to undo");
            }
            writeln!(out, "{}", session.raw_path())?;
        }
        "redo" => {
            if !session.redo() {
                bail!("nothing to redo");
            }
            writeln!(out, "{}", session.raw_path())?;
        }
        "print" => writeln!(out, "{}", session.raw_path())?,
        "points" => print_points(session, out)?,
        "viewport" => print_viewport(session, out)?,
        other => bail!("unknown command `{}`", other),
    }
    Ok(())
}

fn parse_letter(word: &str) -> Result<(CommandKind, bool)> {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => CommandKind::from_letter(letter)
            .ok_or_else(|| anyhow!("`{}` is not a path command", word)),
        _ => bail!("expected a single command letter, got `{}`", word),
    }
}

fn print_points<W: Write>(session: &EditSession, out: &mut W) -> Result<()> {
    let document = session.document();
    for target in document.target_locations() {
        let letter = document
            .command(target.command)
            .map(|c| c.letter())
            .unwrap_or('?');
        writeln!(
            out,
            "target {} {} {} {}",
            target.command, letter, target.point.x, target.point.y
        )?;
    }
    for control in document.control_locations() {
        writeln!(
            out,
            "control {}.{} {} {}",
            control.command, control.slot, control.point.x, control.point.y
        )?;
    }
    for reflection in document.smooth_reflections() {
        writeln!(
            out,
            "reflection {} {} {}",
            reflection.command, reflection.point.x, reflection.point.y
        )?;
    }
    Ok(())
}

fn print_viewport<W: Write>(session: &EditSession, out: &mut W) -> Result<()> {
    let transform = session.transform();
    let vp = transform.viewport();
    writeln!(
        out,
        "viewport {} {} {} {} stroke {}",
        vp.x,
        vp.y,
        vp.width,
        vp.height,
        transform.stroke_width()
    )?;
    Ok(())
}

/// Whitespace separated arguments of one command
struct Args<'a> {
    words: std::iter::Peekable<std::str::SplitWhitespace<'a>>,
}

impl<'a> Args<'a> {
    fn new(rest: &'a str) -> Self {
        Self {
            words: rest.split_whitespace().peekable(),
        }
    }

    fn is_empty(&mut self) -> bool {
        self.words.peek().is_none()
    }

    fn word(&mut self, name: &str) -> Result<&'a str> {
        self.words
            .next()
            .ok_or_else(|| anyhow!("missing argument `{}`", name))
    }

    fn number(&mut self, name: &str) -> Result<f64> {
        let word = self.word(name)?;
        word.parse()
            .with_context(|| format!("`{}` is not a number for `{}`", word, name))
    }

    fn point(&mut self) -> Result<Point> {
        Ok(Point::new(self.number("x")?, self.number("y")?))
    }

    fn optional_index(&mut self) -> Result<Option<usize>> {
        match self.words.next() {
            Some(word) => word
                .parse()
                .map(Some)
                .with_context(|| format!("`{}` is not a command index", word)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use kurbo::Size;

    fn run(session: &mut EditSession, script: &str) -> String {
        let mut out = Vec::new();
        run_script(session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session() -> EditSession {
        let mut session =
            EditSession::new("M 0 0 L 10 10", Size::new(100.0, 100.0), Box::new(MemoryStore::new()), 50);
        session.update_viewport(0.0, 0.0, Some(100.0), Some(100.0));
        session
    }

    #[test]
    fn drag_script_commits() {
        let mut session = session();
        let out = run(
            &mut session,
            "# drag the line end\n\ndown 10 10\nmove 20 30\nup\nprint\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "DraggingPoint { point: Target { command: 1 }, is_new: false }",
                "committed M 0 0 L 20 30",
                "M 0 0 L 20 30",
            ]
        );
    }

    #[test]
    fn insert_then_undo() {
        let mut session = session();
        let out = run(&mut session, "insert l 1\nmove 15 10\nup\nundo\nredo\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "inserted l at 2",
                "committed M 0 0 L 10 10 l 5 0",
                "M 0 0 L 10 10",
                "M 0 0 L 10 10 l 5 0",
            ]
        );
    }

    #[test]
    fn errors_do_not_stop_the_script() {
        let mut session = session();
        let out = run(
            &mut session,
            "bogus\nload M 0 0 L\nundo\nzoom 0\ninsert X\nmove a b\nprint\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "error: unknown command `bogus`");
        assert_eq!(
            lines[1],
            "error: malformed path (first error at 7): missing argument"
        );
        assert_eq!(lines[2], "error: nothing to undo");
        assert_eq!(lines[3], "error: zoom rejected");
        assert!(lines[4].starts_with("error: "));
        assert!(lines[5].starts_with("error: "));
        assert_eq!(lines[6], "M 0 0 L 10 10");
    }

    #[test]
    fn viewport_commands() {
        let mut session = session();
        let out = run(&mut session, "pan 5 -5\nzoom 2 5 -5\nviewport\n");
        assert_eq!(out, "viewport 5 -5 200 200 stroke 2\n");
    }

    #[test]
    fn points_lists_targets_and_handles() {
        let mut session = session();
        let out = run(&mut session, "load M 0 0 C 1 1 2 2 3 3 S 5 5 6 6\npoints\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "M 0 0 C 1 1 2 2 3 3 S 5 5 6 6");
        assert!(lines.contains(&"target 2 S 6 6"));
        assert!(lines.contains(&"control 1.1 2 2"));
        assert!(lines.contains(&"control 2.0 5 5"));
        assert!(lines.contains(&"reflection 2 4 4"));
    }
}
