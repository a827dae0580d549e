//! Error types for Kconfig parsing.
//!
//! Every failure is fatal for the run: there is no resynchronization after a
//! structural error. Structural variants carry the [`Location`] of the line
//! that triggered them.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = KconfigError> = std::result::Result<T, E>;

/// Position of a line inside a Kconfig file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path of the Kconfig file.
    pub file: PathBuf,
    /// 1-based physical line number.
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// Errors produced while walking a Kconfig tree.
#[derive(Debug, Error)]
pub enum KconfigError {
    /// A Kconfig file could not be opened.
    #[error("open {} failed: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from an open Kconfig file failed.
    #[error("read {} failed: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// More nested `if` blocks than the dependency stack can hold.
    #[error("{location}: too many dependencies (limit {limit}), aborting")]
    TooManyDependencies { location: Location, limit: usize },

    /// `endif` without a matching `if`.
    #[error("{location}: dependency underflow, aborting")]
    DependencyUnderflow { location: Location },

    /// More nested `menu`/`choice` blocks than the numbering can hold.
    #[error("{location}: nesting level is too deep (limit {limit}), aborting")]
    NestingTooDeep { location: Location, limit: usize },

    /// `endmenu`/`endchoice` at the root level.
    #[error("{location}: nesting level underflow, aborting")]
    NestingUnderflow { location: Location },

    /// A `source` directive names a file that is already being parsed.
    #[error("{location}: recursive source of {}, aborting", path.display())]
    RecursiveSource { location: Location, path: PathBuf },
}

impl KconfigError {
    /// Location of the offending line, for structural errors.
    pub fn location(&self) -> Option<&Location> {
        match self {
            KconfigError::Open { .. } | KconfigError::Read { .. } => None,
            KconfigError::TooManyDependencies { location, .. }
            | KconfigError::DependencyUnderflow { location }
            | KconfigError::NestingTooDeep { location, .. }
            | KconfigError::NestingUnderflow { location }
            | KconfigError::RecursiveSource { location, .. } => Some(location),
        }
    }
}
