//! Application errors and process exit codes.
//!
//! Every failure maps to a fixed exit status so that build scripts can tell
//! a bad command line from a malformed Kconfig tree.

use std::{io, path::PathBuf};

use clap::error::ErrorKind;
use kconfig_doc::KconfigError;
use thiserror::Error;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    UnrecognizedOption = 1,
    MissingOptionArgument = 2,
    UnexpectedOption = 3,
    TooManyArguments = 4,
    OutputOpen = 5,
    Staging = 6,
    KconfigOpen = 7,
    TooManyDependencies = 8,
    DependencyUnderflow = 9,
    NestingTooDeep = 10,
    NestingUnderflow = 11,
    ConfigLoad = 12,
    RecursiveSource = 13,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit status for a command-line parse failure.
    ///
    /// Help and version requests are not failures.
    pub fn from_usage(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Self::Success,
            ErrorKind::UnknownArgument => Self::UnrecognizedOption,
            ErrorKind::InvalidValue
            | ErrorKind::NoEquals
            | ErrorKind::TooFewValues
            | ErrorKind::WrongNumberOfValues => Self::MissingOptionArgument,
            _ => Self::UnexpectedOption,
        }
    }
}

impl From<&KconfigError> for ExitCode {
    fn from(err: &KconfigError) -> Self {
        match err {
            KconfigError::Open { .. } | KconfigError::Read { .. } => Self::KconfigOpen,
            KconfigError::TooManyDependencies { .. } => Self::TooManyDependencies,
            KconfigError::DependencyUnderflow { .. } => Self::DependencyUnderflow,
            KconfigError::NestingTooDeep { .. } => Self::NestingTooDeep,
            KconfigError::NestingUnderflow { .. } => Self::NestingUnderflow,
            KconfigError::RecursiveSource { .. } => Self::RecursiveSource,
        }
    }
}

/// Errors reported by the `kconfig2html` front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// More than one Kconfig root was given.
    #[error("unexpected garbage at the end of the line: {}", extra.join(" "))]
    TooManyArguments { extra: Vec<String> },

    /// The output file could not be created.
    #[error("open {} failed: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the header or table of contents failed.
    #[error("write to {target} failed: {source}")]
    OutputWrite {
        target: String,
        #[source]
        source: io::Error,
    },

    /// Copying the staged body to the output failed.
    #[error("copy body to {target} failed: {source}")]
    Staging {
        target: String,
        #[source]
        source: io::Error,
    },

    /// The settings file could not be loaded.
    #[error("load settings {} failed: {cause:#}", path.display())]
    ConfigLoad { path: PathBuf, cause: anyhow::Error },

    #[error(transparent)]
    Kconfig(#[from] KconfigError),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::TooManyArguments { .. } => ExitCode::TooManyArguments,
            Self::OutputOpen { .. } | Self::OutputWrite { .. } => ExitCode::OutputOpen,
            Self::Staging { .. } => ExitCode::Staging,
            Self::ConfigLoad { .. } => ExitCode::ConfigLoad,
            Self::Kconfig(err) => err.into(),
        }
    }

    /// Whether the usage text should follow the message.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::TooManyArguments { .. })
    }
}
