use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate, defaulting to [`LexError`].
pub type Result<T, E = LexError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("unable to open input file '{path}': {source}")]
    InputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to open output file '{path}' for writing: {source}")]
    OutputOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to read configuration file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LexError {
    /// Process exit status for this error class. Configuration problems get
    /// their own status so batch drivers can tell them from bad input.
    pub fn exit_code(&self) -> i32 {
        match self {
            LexError::ConfigRead { .. } | LexError::ConfigParse(_) => 2,
            _ => 1,
        }
    }
}
