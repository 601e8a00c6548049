// Copyright 2025 the Pathedit Authors
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer and recursive-descent parser for the SVG path `d` grammar.
//!
//! The parser walks a byte cursor left to right. Each command letter is
//! followed by one or more repetitions of that letter's fixed argument
//! list (`CommandKind::arg_types`). A repetition whose *first* slot fails
//! to match ends the letter (implicit repeat); a later slot failing is a
//! hard error. A repeated moveto degrades to a lineto.
//!
//! Offsets in errors are byte offsets into the input.

use super::command::{ArgType, Command, CommandKind};
use std::fmt;
use thiserror::Error;

/// Why a path failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Found something other than a command letter where one was expected
    UnexpectedCharacter,
    /// An argument list ended early
    MissingArgument,
    /// The path does not start with a moveto
    MissingMoveTo,
    /// A number too large to represent as a finite `f64`
    NumberOutOfRange,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::UnexpectedCharacter => "expected a command letter",
            ParseErrorKind::MissingArgument => "missing argument",
            ParseErrorKind::MissingMoveTo => "path must start with a moveto",
            ParseErrorKind::NumberOutOfRange => "number out of range",
        };
        f.write_str(msg)
    }
}

/// The input does not match the path grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed path (first error at {offset}): {kind}")]
pub struct MalformedPathError {
    /// Byte offset of the first offending position
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl MalformedPathError {
    fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// Parse a raw path string into its ordered command sequence.
///
/// Empty (or whitespace-only) input yields an empty sequence.
pub fn parse(raw: &str) -> Result<Vec<Command>, MalformedPathError> {
    Parser::new(raw).parse_path()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn parse_path(mut self) -> Result<Vec<Command>, MalformedPathError> {
        let mut commands = Vec::new();
        self.skip_whitespace();

        while !self.at_end() {
            let letter_pos = self.pos;
            let Some((kind, relative)) = self.command_letter() else {
                return Err(MalformedPathError::new(
                    letter_pos,
                    ParseErrorKind::UnexpectedCharacter,
                ));
            };
            if commands.is_empty() && kind != CommandKind::MoveTo {
                return Err(MalformedPathError::new(
                    letter_pos,
                    ParseErrorKind::MissingMoveTo,
                ));
            }
            self.skip_whitespace();
            self.repetitions(kind, relative, &mut commands)?;
            self.skip_whitespace();
        }

        Ok(commands)
    }

    /// Parse every argument group following one command letter
    fn repetitions(
        &mut self,
        kind: CommandKind,
        relative: bool,
        out: &mut Vec<Command>,
    ) -> Result<(), MalformedPathError> {
        let slots = kind.arg_types();
        if slots.is_empty() {
            out.push(Command::new(kind, relative, Vec::new()));
            return Ok(());
        }

        let mut current = kind;
        let mut first = true;
        loop {
            let start = self.pos;
            let mut args = Vec::with_capacity(slots.len());
            for (slot, arg_type) in slots.iter().enumerate() {
                match self.argument(*arg_type)? {
                    Some(value) => {
                        args.push(value);
                        self.separator();
                    }
                    // No further group: the letter is done
                    None if slot == 0 && !first => {
                        self.pos = start;
                        return Ok(());
                    }
                    None => {
                        return Err(MalformedPathError::new(
                            self.pos,
                            ParseErrorKind::MissingArgument,
                        ));
                    }
                }
            }
            out.push(Command::new(current, relative, args));
            first = false;
            if current == CommandKind::MoveTo {
                current = CommandKind::LineTo;
            }
        }
    }

    fn argument(&mut self, arg_type: ArgType) -> Result<Option<f64>, MalformedPathError> {
        match arg_type {
            ArgType::Number => self.number(),
            ArgType::Flag => Ok(self.flag()),
        }
    }

    fn command_letter(&mut self) -> Option<(CommandKind, bool)> {
        let letter = self.peek()? as char;
        let resolved = CommandKind::from_letter(letter)?;
        self.pos += 1;
        Some(resolved)
    }

    /// `[+-]? (digits '.'? digits? | '.' digits) ([eE] [+-]? digits)?`
    ///
    /// `Ok(None)` when no number starts here. Literals that overflow to
    /// infinity are an error, since they could not be written back out.
    fn number(&mut self) -> Result<Option<f64>, MalformedPathError> {
        let start = self.pos;
        let mut end = start;

        if matches!(self.byte_at(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let int_digits = self.digits_from(end);
        end += int_digits;

        let mut frac_digits = 0;
        if self.byte_at(end) == Some(b'.') {
            frac_digits = self.digits_from(end + 1);
            // A bare "." is not a number
            if int_digits > 0 || frac_digits > 0 {
                end += 1 + frac_digits;
            }
        }
        if int_digits == 0 && frac_digits == 0 {
            return Ok(None);
        }

        if matches!(self.byte_at(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(self.byte_at(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = self.digits_from(exp_end);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }

        match self.src[start..end].parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.pos = end;
                Ok(Some(value))
            }
            _ => Err(MalformedPathError::new(
                start,
                ParseErrorKind::NumberOutOfRange,
            )),
        }
    }

    fn flag(&mut self) -> Option<f64> {
        let value = match self.peek()? {
            b'0' => 0.0,
            b'1' => 1.0,
            _ => return None,
        };
        self.pos += 1;
        Some(value)
    }

    /// Comma-whitespace between arguments: `wsp* ,? wsp*`
    fn separator(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')) {
            self.pos += 1;
        }
    }

    fn digits_from(&self, from: usize) -> usize {
        self.src.as_bytes()[from.min(self.src.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    }

    fn byte_at(&self, idx: usize) -> Option<u8> {
        self.src.as_bytes().get(idx).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.byte_at(self.pos)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }
}
