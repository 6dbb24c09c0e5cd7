//! Errors raised while running the Cycloid CLI.
//!
//! I/O errors are wrapped in `Arc` to satisfy the `result_large_err` Clippy
//! lint and keep the error cheaply cloneable.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::invocation::ToolAction;

/// Errors arising from a tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable could not be started.
    #[error("unable to run '{program}' for {action}: {source}")]
    SpawnFailed {
        /// Executable that was requested.
        program: PathBuf,
        /// Sub-action being invoked.
        action: ToolAction,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The tool ran and exited unsuccessfully.
    ///
    /// `diagnostic` holds the tool's stderr verbatim, or a generic status
    /// message when stderr was empty.
    #[error("cy {action} failed: {diagnostic}")]
    NonZeroExit {
        /// Sub-action that failed.
        action: ToolAction,
        /// Exit status, absent when the process was killed by a signal.
        status: Option<i32>,
        /// Text reported by the tool.
        diagnostic: String,
    },
}

impl ToolError {
    /// Builds a [`ToolError::NonZeroExit`] from captured stderr bytes.
    #[must_use]
    pub fn from_exit(action: ToolAction, status: Option<i32>, stderr: &[u8]) -> Self {
        let captured = String::from_utf8_lossy(stderr);
        let diagnostic = if captured.trim().is_empty() {
            match status {
                Some(code) => format!("exited with status {code}"),
                None => String::from("terminated by signal"),
            }
        } else {
            captured.into_owned()
        };
        Self::NonZeroExit {
            action,
            status,
            diagnostic,
        }
    }

    /// Returns the sub-action the error relates to.
    #[must_use]
    pub const fn action(&self) -> ToolAction {
        match self {
            Self::SpawnFailed { action, .. } | Self::NonZeroExit { action, .. } => *action,
        }
    }
}

#[cfg(test)]
mod tests;
