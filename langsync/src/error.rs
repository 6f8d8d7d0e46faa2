//! All error types for the langsync crate.
//!
//! Master-level failures (`NoMasterFound`, `MasterLoad`) end a run. Target-level
//! failures are caught by the engine and reported as skipped files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "no master file found in `{}` (expected a file name containing {})",
        .directory.display(),
        .markers.join(" or ")
    )]
    NoMasterFound {
        directory: PathBuf,
        markers: Vec<String>,
    },

    #[error("failed to load master file `{}`: {source}", .path.display())]
    MasterLoad {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to load target file `{}`: {source}", .path.display())]
    TargetLoad {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// `key` is the JSON location of the value with segments always joined by
    /// `.`, whatever key path delimiter the sync uses.
    #[error("invalid value at `{key}`: expected a string or an object, found {found}")]
    Shape { key: String, found: &'static str },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Wraps a load failure of the master file.
    pub fn master_load(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::MasterLoad {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Wraps a load failure of a single target file.
    pub fn target_load(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::TargetLoad {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Returns true when this error (or the load error it wraps) is a shape violation.
    pub fn is_shape(&self) -> bool {
        match self {
            Error::Shape { .. } => true,
            Error::MasterLoad { source, .. } | Error::TargetLoad { source, .. } => {
                source.is_shape()
            }
            _ => false,
        }
    }

    /// Returns true when the error aborts a whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NoMasterFound { .. } | Error::MasterLoad { .. })
    }
}
