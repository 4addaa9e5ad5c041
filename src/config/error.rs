//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading service files or validating run settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Service file not found: {0}")]
    NotFound(PathBuf),

    #[error("Error while reading service file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Error while parsing service file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}
