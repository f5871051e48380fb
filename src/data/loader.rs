use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use super::error::FormatError;
use super::model::{AngleBundle, Dataset, ParseResult};

pub const ID_MARKER: &str = "ID:";
pub const X_MARKER: &str = "x:";
pub const Y_MARKER: &str = "y:";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every dataset from a tilt file on disk.
pub fn load_file(path: &Path) -> Result<ParseResult> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))
}

/// Parse tilt records held in memory.
pub fn parse_str(text: &str) -> Result<ParseResult, FormatError> {
    parse(text.as_bytes())
}

/// Parse the tilt text format:
///
/// ```text
/// ID: <identifier>
/// x: <x tilt, degrees>
/// y: <y tilt, degrees>
/// <x0>,<y0>
/// <x1>,<y1>
/// <blank line or EOF>
/// ```
///
/// Blank lines between records are skipped. A blank line (or EOF) ends the
/// position list of the current record. The whole parse fails on the first
/// malformed line; a later record with an id already seen replaces the
/// earlier one. Angles and coordinates must be finite: `inf` and `NaN` are
/// rejected as invalid numbers.
pub fn parse<R: BufRead>(reader: R) -> Result<ParseResult, FormatError> {
    let mut lines = NumberedLines::new(reader);
    let mut result = ParseResult::new();

    while let Some(header) = lines.next_non_blank()? {
        let dataset = parse_record(&mut lines, &header)?;
        debug!(
            "parsed dataset '{}' (x={}, y={}, {} positions)",
            dataset.id,
            dataset.x_angle(),
            dataset.y_angle(),
            dataset.positions.len()
        );
        let id = dataset.id.clone();
        if result.insert(dataset).is_some() {
            warn!("line {}: dataset '{id}' redefined, keeping the later record", header.number);
        }
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Record parsing
// ---------------------------------------------------------------------------

struct Line {
    number: usize,
    text: String,
}

/// `BufRead::lines` with a running 1-based line counter.
struct NumberedLines<R> {
    inner: std::io::Lines<R>,
    number: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            number: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<Line>, FormatError> {
        match self.inner.next() {
            Some(text) => {
                self.number += 1;
                let text = text.map_err(|err| match err.kind() {
                    std::io::ErrorKind::InvalidData => FormatError::InvalidEncoding {
                        line: self.number,
                    },
                    _ => FormatError::Io(err),
                })?;
                Ok(Some(Line {
                    number: self.number,
                    text,
                }))
            }
            None => Ok(None),
        }
    }

    fn next_non_blank(&mut self) -> Result<Option<Line>, FormatError> {
        while let Some(line) = self.next_line()? {
            if !line.text.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

fn parse_record<R: BufRead>(
    lines: &mut NumberedLines<R>,
    header: &Line,
) -> Result<Dataset, FormatError> {
    let id = after_marker(header, ID_MARKER)?;
    if id.is_empty() {
        return Err(FormatError::MissingMarker {
            line: header.number,
            marker: ID_MARKER,
            found: header.text.trim().to_string(),
        });
    }

    let x_angle = angle_line(lines, id, X_MARKER)?;
    let y_angle = angle_line(lines, id, Y_MARKER)?;

    let mut positions = Vec::new();
    while let Some(line) = lines.next_line()? {
        if line.text.trim().is_empty() {
            break;
        }
        positions.push(parse_position(&line)?);
    }

    Ok(Dataset::new(id, AngleBundle::new(x_angle, y_angle), positions))
}

/// Text after the last occurrence of `marker`, trimmed.
fn after_marker<'a>(line: &'a Line, marker: &'static str) -> Result<&'a str, FormatError> {
    line.text
        .rsplit_once(marker)
        .map(|(_, value)| value.trim())
        .ok_or_else(|| FormatError::MissingMarker {
            line: line.number,
            marker,
            found: line.text.trim().to_string(),
        })
}

fn angle_line<R: BufRead>(
    lines: &mut NumberedLines<R>,
    id: &str,
    marker: &'static str,
) -> Result<f64, FormatError> {
    let line = lines.next_line()?.ok_or_else(|| FormatError::UnexpectedEof {
        line: lines.number + 1,
        id: id.to_string(),
        marker,
    })?;
    let value = after_marker(&line, marker)?;
    parse_number(value, line.number, marker)
}

fn parse_position(line: &Line) -> Result<(f64, f64), FormatError> {
    let fields: Vec<&str> = line.text.split(',').map(str::trim).collect();
    let [x, y] = fields.as_slice() else {
        return Err(FormatError::InvalidPosition {
            line: line.number,
            found: line.text.trim().to_string(),
        });
    };
    Ok((
        parse_number(x, line.number, "position x")?,
        parse_number(y, line.number, "position y")?,
    ))
}

fn parse_number(value: &str, line: usize, field: &'static str) -> Result<f64, FormatError> {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(FormatError::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        }),
    }
}
