use thiserror::Error;

/// Reasons a tilt file fails to parse. Line numbers are 1-based.
#[derive(Error, Debug)]
pub enum FormatError {
    /// A line did not carry the marker expected at that point of a record.
    #[error("line {line}: expected '{marker}' marker, found {found:?}")]
    MissingMarker {
        line: usize,
        marker: &'static str,
        found: String,
    },

    /// The input ended before the record was complete.
    #[error("line {line}: record '{id}' ended before its '{marker}' line")]
    UnexpectedEof {
        line: usize,
        id: String,
        marker: &'static str,
    },

    #[error("line {line}: {field} value {value:?} is not a number")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// Position lines hold exactly two comma-separated numbers.
    #[error("line {line}: position {found:?} must be two comma-separated numbers")]
    InvalidPosition { line: usize, found: String },

    #[error("line {line}: not valid UTF-8")]
    InvalidEncoding { line: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Line the error was detected on, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            FormatError::MissingMarker { line, .. }
            | FormatError::UnexpectedEof { line, .. }
            | FormatError::InvalidNumber { line, .. }
            | FormatError::InvalidPosition { line, .. }
            | FormatError::InvalidEncoding { line } => Some(*line),
            FormatError::Io(_) => None,
        }
    }
}
