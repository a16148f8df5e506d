//! Path data serializer.

use std::fmt::Write;

use super::{Command, CommandKind, PathModel};

impl PathModel {
    /// Render the model as absolute path data with `precision` decimal
    /// digits per number.
    ///
    /// Trailing zeros are trimmed, so `10.10` is written as `10.1` and
    /// `3.00` as `3`.
    pub fn to_path_data(&self, precision: usize) -> String {
        let mut out = String::new();
        for (i, command) in self.commands().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write_command(&mut out, command, precision);
        }
        out
    }
}

fn write_command(out: &mut String, command: &Command, precision: usize) {
    out.push(command.kind().letter());
    let ops = command.operands();
    let n = |i: usize| format_number(ops[i], precision);
    match command.kind() {
        CommandKind::Close => {}
        CommandKind::Horizontal | CommandKind::Vertical => out.push_str(&n(0)),
        CommandKind::Arc => {
            // rx,ry rotation large,sweep x,y
            let _ = write!(
                out,
                "{},{} {} {},{} {},{}",
                n(0),
                n(1),
                n(2),
                flag(ops[3]),
                flag(ops[4]),
                n(5),
                n(6)
            );
        }
        _ => {
            for (pair, chunk) in ops.chunks(2).enumerate() {
                if pair > 0 {
                    out.push(' ');
                }
                let _ = write!(
                    out,
                    "{},{}",
                    format_number(chunk[0], precision),
                    format_number(chunk[1], precision)
                );
            }
        }
    }
}

fn flag(v: f64) -> char {
    if v != 0.0 {
        '1'
    } else {
        '0'
    }
}

/// Fixed-precision number with trailing zeros removed and no negative zero.
pub(crate) fn format_number(value: f64, precision: usize) -> String {
    let mut s = format!("{value:.precision$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_numbers() {
        assert_eq!(format_number(10.100000000000001, 2), "10.1");
        assert_eq!(format_number(3.0, 2), "3");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(-2.555, 1), "-2.6");
        assert_eq!(format_number(1234.5678, 0), "1235");
        assert_eq!(format_number(100.0, 0), "100");
    }

    #[test]
    fn writes_lines() {
        let path = PathModel::parse("M0,0 L10.1,0").unwrap();
        assert_eq!(path.to_path_data(2), "M0,0 L10.1,0");
    }

    #[test]
    fn writes_every_kind() {
        let path = PathModel::parse(
            "M0 0 H5 V5 C1 2 3 4 5 6 S7 8 9 10 Q1 1 2 2 T3 3 A5 5 0 0 1 10 0 Z",
        )
        .unwrap();
        assert_eq!(
            path.to_path_data(2),
            "M0,0 H5 V5 C1,2 3,4 5,6 S7,8 9,10 Q1,1 2,2 T3,3 A5,5 0 0,1 10,0 Z"
        );
    }

    #[test]
    fn writes_relative_input_as_absolute() {
        let path = PathModel::parse("m1.5 1.5 l1 1 z").unwrap();
        assert_eq!(path.to_path_data(2), "M1.5,1.5 L2.5,2.5 Z");
    }
}
