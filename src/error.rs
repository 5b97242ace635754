//! Error types for pscan.
//!
//! Uses `thiserror` for ergonomic error definitions. `ConfigError` and
//! `ResolutionError` are fatal and stop the program before any probe is
//! sent; `ProbeError` is local to one port and only ever classifies it.

use crate::types::PortError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::types::TargetError as ResolutionError;

/// Bad flags, ranges or settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Target host is required")]
    MissingTarget,

    #[error("invalid port range: {0}")]
    PortRange(#[from] PortError),

    #[error("thread count must be at least 1")]
    InvalidThreads,

    #[error("could not determine a configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),
}

/// Why a single connection attempt did not produce an open port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("timeout")]
    Timeout,

    #[error("connection refused")]
    Refused,

    #[error("{0}")]
    Other(String),
}

impl ProbeError {
    /// Classify a failed connect by its kind, falling back to the error text.
    pub fn classify(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::TimedOut => return Self::Timeout,
            io::ErrorKind::ConnectionRefused => return Self::Refused,
            _ => {}
        }

        let text = err.to_string();
        let lower = text.to_lowercase();
        if lower.contains("timeout") || lower.contains("timed out") {
            Self::Timeout
        } else if lower.contains("refused") {
            Self::Refused
        } else {
            Self::Other(text)
        }
    }
}

/// Top-level error for the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<PortError> for CliError {
    fn from(err: PortError) -> Self {
        Self::Config(err.into())
    }
}

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
