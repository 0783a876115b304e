//! Errors raised by filesystem operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during filesystem operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// File or directory not found
    #[error("file not found: {0}")]
    NotFound(String),
    /// Path is not a directory
    #[error("not a directory: {0}")]
    NotADirectory(String),
    /// Path is not a file
    #[error("not a file: {0}")]
    NotAFile(String),
    /// A node already exists at the path
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// Invalid path format, e.g. descending through a file
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// A regex or glob pattern failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// The kind of an [`FsError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`FsError::NotFound`].
    NotFound,
    /// See [`FsError::NotADirectory`].
    NotADirectory,
    /// See [`FsError::NotAFile`].
    NotAFile,
    /// See [`FsError::AlreadyExists`].
    AlreadyExists,
    /// See [`FsError::InvalidPath`].
    InvalidPath,
    /// See [`FsError::InvalidPattern`].
    InvalidPattern,
}

impl FsError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound(_) => ErrorKind::NotFound,
            FsError::NotADirectory(_) => ErrorKind::NotADirectory,
            FsError::NotAFile(_) => ErrorKind::NotAFile,
            FsError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            FsError::InvalidPath(_) => ErrorKind::InvalidPath,
            FsError::InvalidPattern(_) => ErrorKind::InvalidPattern,
        }
    }
}

impl ErrorKind {
    /// Stable snake_case name, as used in response envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::NotADirectory => "not_a_directory",
            ErrorKind::NotAFile => "not_a_file",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidPath => "invalid_path",
            ErrorKind::InvalidPattern => "invalid_pattern",
        }
    }
}

impl From<regex::Error> for FsError {
    fn from(err: regex::Error) -> Self {
        FsError::InvalidPattern(err.to_string())
    }
}

impl From<glob::PatternError> for FsError {
    fn from(err: glob::PatternError) -> Self {
        FsError::InvalidPattern(err.to_string())
    }
}

impl From<globset::Error> for FsError {
    fn from(err: globset::Error) -> Self {
        FsError::InvalidPattern(err.to_string())
    }
}

/// Result alias for filesystem operations.
pub type FsResult<T> = Result<T, FsError>;
