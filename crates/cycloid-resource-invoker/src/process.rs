//! Process-based execution of the Cycloid CLI.
//!
//! [`ProcessExecutor`] spawns the executable with stdin closed, waits for it
//! to exit and captures both output streams. There is no timeout: the call
//! blocks until the tool exits or the resource process itself is killed.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ToolError;
use crate::invocation::{ToolInvocation, ToolOutput};
use crate::runner::{INVOKER_TARGET, ToolExecutor};

/// Executes invocations by spawning a child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ToolExecutor for ProcessExecutor {
    fn execute(
        &self,
        program: &Path,
        invocation: &ToolInvocation,
    ) -> Result<ToolOutput, ToolError> {
        let mut command = Command::new(program);
        command
            .args(invocation.arguments())
            .envs(
                invocation
                    .environment()
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = invocation.working_dir() {
            command.current_dir(dir);
        }

        debug!(
            target: INVOKER_TARGET,
            program = %program.display(),
            arguments = invocation.arguments().len(),
            "spawning child process"
        );

        let output = command.output().map_err(|err| ToolError::SpawnFailed {
            program: program.to_path_buf(),
            action: invocation.action(),
            source: Arc::new(err),
        })?;

        if output.status.success() {
            return Ok(ToolOutput::new(output.stdout, output.stderr));
        }

        warn!(
            target: INVOKER_TARGET,
            action = %invocation.action(),
            status = ?output.status.code(),
            "Cycloid CLI exited unsuccessfully"
        );
        Err(ToolError::from_exit(
            invocation.action(),
            output.status.code(),
            &output.stderr,
        ))
    }
}
