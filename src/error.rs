use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Rejected pomodoro settings. Raised at the configuration boundary only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{field} must be at least 1 minute")]
    ZeroDuration { field: &'static str },
    #[error("{field} must be at most {max} minutes (got {value})")]
    DurationTooLong {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("long break interval must be at least 1")]
    ZeroInterval,
    #[error("long break interval must be at most {max} (got {value})")]
    IntervalTooLarge { value: u32, max: u32 },
}

/// Failure inside a session reporter. Logged by the session, never propagated.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to persist statistics to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
    #[error("reporter unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid duration {input:?}: {reason}")]
    Duration { input: String, reason: &'static str },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
