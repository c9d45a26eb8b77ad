// ❗ Error Types
// Every failure aborts the run: there is no partial output and no retry.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovieLogError {
    /// A store line did not carry exactly five fields
    #[error("malformed record on line {line}: expected 5 fields, found {found}")]
    MalformedRecord { line: usize, found: usize },

    #[error("invalid watch date {value:?} (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("invalid {field} {value:?}: not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("movie title must not be empty")]
    EmptyTitle,

    /// Wraps a field-level error with the store line it came from
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<MovieLogError>,
    },

    #[error("input ended before {0} was entered")]
    UnexpectedEndOfInput(&'static str),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MovieLogError {
    pub fn at_line(self, line: usize) -> Self {
        MovieLogError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MovieLogError>;
