//! Error types and context management for puzzle loading and solving

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all fallible operations around the solver
///
/// The solver itself never fails: an unsolvable puzzle is reported as a
/// `false` result. Errors arise only when building grids, reading puzzle
/// files or validating parameters.
#[derive(Debug)]
pub enum SolverError {
    /// Grid dimensions are zero or exceed the supported maximum
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// Tile list length doesn't match the grid dimensions
    TileCountMismatch {
        /// Number of tiles required by `width * height`
        expected: usize,
        /// Number of tiles supplied
        actual: usize,
    },

    /// Puzzle text could not be parsed
    InvalidPuzzle {
        /// File the puzzle was read from
        path: PathBuf,
        /// One-based line number of the offending row
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions {width}x{height}")
            }
            Self::TileCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} tiles but got {actual}")
            }
            Self::InvalidPuzzle { path, line, reason } => {
                write!(
                    f,
                    "Invalid puzzle '{}' at line {line}: {reason}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Placeholder path used until context is attached
pub const UNKNOWN_PATH: &str = "<unknown>";

/// Enriches errors with the file they concern
pub trait WithContext<T> {
    /// Attach a path to path-carrying errors that don't have one yet
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;

    /// Attach a path and the operation being performed
    ///
    /// # Errors
    ///
    /// Propagates the original error with path and operation applied
    fn with_operation(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<SolverError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                SolverError::InvalidPuzzle { path: target, .. }
                | SolverError::FileSystem { path: target, .. } => {
                    if target.as_os_str() == UNKNOWN_PATH {
                        *target = path.to_path_buf();
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_operation(self, path: &Path, operation: &'static str) -> Result<T> {
        self.with_path(path).map_err(|mut error| {
            if let SolverError::FileSystem { operation: target, .. } = &mut error {
                *target = operation;
            }
            error
        })
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a puzzle parse error for a line whose file is not yet known
pub fn invalid_puzzle(line: usize, reason: &impl ToString) -> SolverError {
    SolverError::InvalidPuzzle {
        path: PathBuf::from(UNKNOWN_PATH),
        line,
        reason: reason.to_string(),
    }
}
