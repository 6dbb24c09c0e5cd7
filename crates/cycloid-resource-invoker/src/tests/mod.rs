//! Shared executors for crate-level tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::ToolError;
use crate::invocation::{ToolInvocation, ToolOutput};
use crate::runner::ToolExecutor;


/// Replies with fixed stdout and records every call.
pub(crate) struct RecordingExecutor {
    stdout: Vec<u8>,
    calls: RefCell<Vec<(PathBuf, ToolInvocation)>>,
}

impl RecordingExecutor {
    pub(crate) fn replying(stdout: &[u8]) -> Self {
        Self {
            stdout: stdout.to_vec(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(PathBuf, ToolInvocation)> {
        self.calls.borrow().clone()
    }
}

impl ToolExecutor for RecordingExecutor {
    fn execute(
        &self,
        program: &Path,
        invocation: &ToolInvocation,
    ) -> Result<ToolOutput, ToolError> {
        self.calls
            .borrow_mut()
            .push((program.to_path_buf(), invocation.clone()));
        Ok(ToolOutput::from_stdout(self.stdout.clone()))
    }
}

/// Always fails as if the tool exited with status 1.
pub(crate) struct FailingExecutor {
    stderr: String,
}

impl FailingExecutor {
    pub(crate) fn new(stderr: &str) -> Self {
        Self {
            stderr: stderr.to_owned(),
        }
    }
}

impl ToolExecutor for FailingExecutor {
    fn execute(
        &self,
        _program: &Path,
        invocation: &ToolInvocation,
    ) -> Result<ToolOutput, ToolError> {
        Err(ToolError::from_exit(
            invocation.action(),
            Some(1),
            self.stderr.as_bytes(),
        ))
    }
}
