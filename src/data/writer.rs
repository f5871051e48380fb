use std::io::{self, Write};

use super::loader::{ID_MARKER, X_MARKER, Y_MARKER};
use super::model::{Dataset, ParseResult};

/// Write one record in the tilt text format, without a trailing blank line.
///
/// Floats use `Display`, which prints the shortest text that parses back to
/// the same value.
pub fn write_dataset<W: Write>(w: &mut W, dataset: &Dataset) -> io::Result<()> {
    writeln!(w, "{ID_MARKER} {}", dataset.id)?;
    writeln!(w, "{X_MARKER} {}", dataset.x_angle())?;
    writeln!(w, "{Y_MARKER} {}", dataset.y_angle())?;
    for (x, y) in &dataset.positions {
        writeln!(w, "{x},{y}")?;
    }
    Ok(())
}

/// Write every dataset in order, separated by blank lines.
pub fn write_all<W: Write>(w: &mut W, result: &ParseResult) -> io::Result<()> {
    for (i, dataset) in result.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        write_dataset(w, dataset)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_str;
    use crate::data::model::AngleBundle;

    #[test]
    fn writes_expected_layout() {
        let ds = Dataset::new("A", AngleBundle::new(-5.5, 30.0), vec![(1.0, 2.25), (-3.0, 0.5)]);
        let mut out = Vec::new();
        write_dataset(&mut out, &ds).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID: A\nx: -5.5\ny: 30\n1,2.25\n-3,0.5\n"
        );
    }

    #[test]
    fn written_file_parses_back() {
        let original: ParseResult = [
            Dataset::new("ref", AngleBundle::new(0.0, 0.0), vec![(0.1, 0.2), (1e-7, -42.125)]),
            Dataset::new("empty", AngleBundle::new(12.34, -56.78), Vec::new()),
            Dataset::new("third", AngleBundle::new(1.0 / 3.0, 2.0 / 3.0), vec![(7.0, 8.0)]),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        write_all(&mut out, &original).unwrap();
        let reparsed = parse_str(std::str::from_utf8(&out).unwrap()).unwrap();

        assert_eq!(reparsed, original);
    }
}
