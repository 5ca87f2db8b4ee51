//! Harness Error Types

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Compilation failed for {}: {reason}", .source_file.display())]
    Compile { source_file: PathBuf, reason: String },

    #[error("Failed to launch {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reference solution exited with {status}")]
    Runtime { status: ExitStatus },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors that stop the whole batch rather than a single case.
    ///
    /// Only meaningful for errors raised outside of a reference run: the
    /// orchestrator downgrades every error from a reference run to a
    /// per-case failure.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            HarnessError::Io { .. } | HarnessError::Compile { .. } | HarnessError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
