//! WVIZ-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, VizError>;

/// Top-level error type for the witness visualizer.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("[WVIZ-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[WVIZ-1002] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[WVIZ-2001] results file not found: {path}")]
    MissingResults { path: PathBuf },

    #[error("[WVIZ-3001] terminal failure: {source}")]
    Terminal {
        #[source]
        source: std::io::Error,
    },

    #[error("[WVIZ-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[WVIZ-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl VizError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "WVIZ-1001",
            Self::ConfigParse { .. } => "WVIZ-1002",
            Self::MissingResults { .. } => "WVIZ-2001",
            Self::Terminal { .. } => "WVIZ-3001",
            Self::Io { .. } => "WVIZ-3002",
            Self::Runtime { .. } => "WVIZ-3900",
        }
    }

    /// Whether retrying (e.g. the next refresh tick) might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MissingResults { .. } | Self::Io { .. } | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Convenience constructor for terminal-layer IO errors.
    #[must_use]
    pub const fn terminal(source: std::io::Error) -> Self {
        Self::Terminal { source }
    }
}
