//! Editable SVG path model.
//!
//! A [`PathModel`] is an ordered list of absolute-coordinate [`Command`]s.
//! Parsing lives in `parse`, serialization in `write`.

mod parse;
mod write;

use std::fmt;

/// Drawing command kinds of the SVG path mini-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quadratic,
    SmoothQuadratic,
    Arc,
    Close,
}

impl CommandKind {
    /// Number of numeric operands the command carries.
    pub fn arity(self) -> usize {
        match self {
            CommandKind::Move | CommandKind::Line | CommandKind::SmoothQuadratic => 2,
            CommandKind::Horizontal | CommandKind::Vertical => 1,
            CommandKind::Cubic => 6,
            CommandKind::SmoothCubic | CommandKind::Quadratic => 4,
            CommandKind::Arc => 7,
            CommandKind::Close => 0,
        }
    }

    /// Absolute-form command letter.
    pub fn letter(self) -> char {
        match self {
            CommandKind::Move => 'M',
            CommandKind::Line => 'L',
            CommandKind::Horizontal => 'H',
            CommandKind::Vertical => 'V',
            CommandKind::Cubic => 'C',
            CommandKind::SmoothCubic => 'S',
            CommandKind::Quadratic => 'Q',
            CommandKind::SmoothQuadratic => 'T',
            CommandKind::Arc => 'A',
            CommandKind::Close => 'Z',
        }
    }

    /// Operand indices of the terminal point as `(x, y)`.
    ///
    /// Control points are not terminal. `H` has no y operand and `V` no x
    /// operand; `Z` has neither.
    pub fn endpoint_operands(self) -> (Option<usize>, Option<usize>) {
        match self {
            CommandKind::Move | CommandKind::Line | CommandKind::SmoothQuadratic => {
                (Some(0), Some(1))
            }
            CommandKind::Horizontal => (Some(0), None),
            CommandKind::Vertical => (None, Some(0)),
            CommandKind::Cubic => (Some(4), Some(5)),
            CommandKind::SmoothCubic | CommandKind::Quadratic => (Some(2), Some(3)),
            CommandKind::Arc => (Some(5), Some(6)),
            CommandKind::Close => (None, None),
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// One drawing command with absolute operands.
///
/// The operand count always equals `kind.arity()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    kind: CommandKind,
    operands: Vec<f64>,
}

impl Command {
    /// Build a command, checking the operand count against the kind.
    pub fn new(kind: CommandKind, operands: Vec<f64>) -> Option<Self> {
        (operands.len() == kind.arity()).then_some(Self { kind, operands })
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    /// Terminal point, with axes the command does not carry taken from
    /// `current`.
    pub fn end_point(&self, current: kurbo::Point) -> kurbo::Point {
        let (xi, yi) = self.kind.endpoint_operands();
        let read = |idx: Option<usize>, fallback: f64| {
            idx.and_then(|i| self.operands.get(i).copied())
                .unwrap_or(fallback)
        };
        kurbo::Point::new(read(xi, current.x), read(yi, current.y))
    }
}

/// A parsed path: ordered commands plus a flag recording whether any
/// operand was rewritten since parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathModel {
    commands: Vec<Command>,
    dirty: bool,
}

impl PathModel {
    pub fn from_commands(commands: Vec<Command>) -> Self {
        Self {
            commands,
            dirty: false,
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether any operand has been written since parsing.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read one operand. `None` if the indices are out of range.
    pub fn operand(&self, command: usize, operand: usize) -> Option<f64> {
        self.commands.get(command)?.operands.get(operand).copied()
    }

    /// Overwrite one operand, marking the path dirty when the value
    /// actually changes. Returns `false` if the indices are out of range.
    pub fn set_operand(&mut self, command: usize, operand: usize, value: f64) -> bool {
        let Some(slot) = self
            .commands
            .get_mut(command)
            .and_then(|c| c.operands.get_mut(operand))
        else {
            return false;
        };
        if slot.to_bits() != value.to_bits() {
            *slot = value;
            self.dirty = true;
        }
        true
    }
}
