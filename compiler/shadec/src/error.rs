//! Driver failures: bad command lines and I/O.
//!
//! Syntax errors in the inputs are not here; they are diagnostics.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },

    #[error("'{path}' contains invalid UTF-8 data")]
    InvalidUtf8 { path: String },

    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for {option}")]
    InvalidValue { option: String, value: String },

    #[error("{first} cannot be combined with {second}")]
    Conflict {
        first: &'static str,
        second: &'static str,
    },

    #[error("no input files")]
    NoInput,

    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
}

impl CliError {
    /// Classify a failure to read `path`.
    pub fn read(path: &str, error: io::Error) -> Self {
        let path = path.to_string();
        match error.kind() {
            io::ErrorKind::NotFound => CliError::NotFound { path },
            io::ErrorKind::PermissionDenied => CliError::PermissionDenied { path },
            io::ErrorKind::InvalidData => CliError::InvalidUtf8 { path },
            _ => CliError::Read {
                path,
                source: error,
            },
        }
    }
}
