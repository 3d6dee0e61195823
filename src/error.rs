//! Crate-wide error type.
//!
//! Per-place fetch failures never become an [`Error`]: they are logged and
//! the place is dropped. Only setup, rendering and stamping report errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by configuration, map rendering and status stamping.
#[derive(Debug, Error)]
pub enum Error {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("map API returned HTTP {0}")]
    MapStatus(reqwest::StatusCode),

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
