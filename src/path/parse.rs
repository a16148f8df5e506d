//! Path data tokenizer.
//!
//! Lexing and arity checks are delegated to `svgtypes`; this module turns
//! its segments into absolute [`Command`]s, tracking the current point and
//! the subpath start so relative segments and `Z` resolve correctly.

use kurbo::Point;
use svgtypes::{PathParser, PathSegment};

use super::{Command, CommandKind, PathModel};
use crate::error::AlignError;

impl PathModel {
    /// Parse path data into an absolute-coordinate model.
    ///
    /// `index` names the path in error messages.
    pub fn parse_indexed(data: &str, index: usize) -> Result<Self, AlignError> {
        let mut commands = Vec::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;

        for segment in PathParser::from(data) {
            let segment = segment.map_err(|err| AlignError::malformed(index, err.to_string()))?;
            let command = absolute(segment, current);
            match command.kind {
                CommandKind::Close => current = start,
                CommandKind::Move => {
                    current = command.end_point(current);
                    start = current;
                }
                _ => current = command.end_point(current),
            }
            commands.push(command);
        }

        Ok(PathModel::from_commands(commands))
    }

    /// Parse path data into an absolute-coordinate model.
    pub fn parse(data: &str) -> Result<Self, AlignError> {
        Self::parse_indexed(data, 0)
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Convert one segment to an absolute command relative to `cur`.
fn absolute(segment: PathSegment, cur: Point) -> Command {
    // (dx, dy) offsets applied to relative coordinates.
    let off = |abs: bool| if abs { (0.0, 0.0) } else { (cur.x, cur.y) };
    let (kind, operands) = match segment {
        PathSegment::MoveTo { abs, x, y } => {
            let (dx, dy) = off(abs);
            (CommandKind::Move, vec![x + dx, y + dy])
        }
        PathSegment::LineTo { abs, x, y } => {
            let (dx, dy) = off(abs);
            (CommandKind::Line, vec![x + dx, y + dy])
        }
        PathSegment::HorizontalLineTo { abs, x } => {
            let (dx, _) = off(abs);
            (CommandKind::Horizontal, vec![x + dx])
        }
        PathSegment::VerticalLineTo { abs, y } => {
            let (_, dy) = off(abs);
            (CommandKind::Vertical, vec![y + dy])
        }
        PathSegment::CurveTo {
            abs,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => {
            let (dx, dy) = off(abs);
            (
                CommandKind::Cubic,
                vec![x1 + dx, y1 + dy, x2 + dx, y2 + dy, x + dx, y + dy],
            )
        }
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            let (dx, dy) = off(abs);
            (CommandKind::SmoothCubic, vec![x2 + dx, y2 + dy, x + dx, y + dy])
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            let (dx, dy) = off(abs);
            (CommandKind::Quadratic, vec![x1 + dx, y1 + dy, x + dx, y + dy])
        }
        PathSegment::SmoothQuadratic { abs, x, y } => {
            let (dx, dy) = off(abs);
            (CommandKind::SmoothQuadratic, vec![x + dx, y + dy])
        }
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => {
            let (dx, dy) = off(abs);
            (
                CommandKind::Arc,
                vec![
                    rx,
                    ry,
                    x_axis_rotation,
                    flag(large_arc),
                    flag(sweep),
                    x + dx,
                    y + dy,
                ],
            )
        }
        PathSegment::ClosePath { .. } => (CommandKind::Close, Vec::new()),
    };
    Command { kind, operands }
}
