use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = LifeError> = std::result::Result<T, E>;

/// Everything that can go wrong while setting up or running a simulation.
///
/// Apart from [`LifeError::Render`], all variants are raised before the first
/// frame is rendered.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("cannot place {requested} alive cells: only {available} dead cells are available")]
    Configuration { requested: usize, available: usize },

    #[error("invalid delay {0} seconds: must be non-negative and fit in a duration")]
    InvalidDelay(f64),

    #[error("invalid pattern: {0}")]
    Format(#[from] FormatError),

    #[error("invalid grid size {width}x{height}: sides must be positive and the cell count must fit in usize")]
    Precondition { width: usize, height: usize },

    #[error("failed to read pattern file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render frame")]
    Render(#[source] io::Error),
}

/// Reasons a plain-text pattern is rejected. Line and column numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("pattern has no rows")]
    Empty,

    #[error("first row is empty")]
    EmptyRow,

    #[error("inconsistent row width on line {line}: expected {expected}, found {found}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown symbol {symbol:?} at line {line}, column {column}")]
    UnknownSymbol {
        line: usize,
        column: usize,
        symbol: char,
    },
}
