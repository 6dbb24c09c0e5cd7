//! Runner binding an executor to the configured Cycloid CLI executable.
//!
//! The executor abstraction lets tests script tool responses and count
//! invocations without spawning real processes.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::ToolError;
use crate::invocation::{ToolInvocation, ToolOutput};

/// Tracing target for tool invocations.
pub(crate) const INVOKER_TARGET: &str = "cycloid_resource_invoker";

/// Trait abstracting process execution for testability.
///
/// The production implementation is
/// [`ProcessExecutor`](crate::process::ProcessExecutor).
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use cycloid_resource_invoker::{ToolError, ToolExecutor, ToolInvocation, ToolOutput};
///
/// struct CannedExecutor;
///
/// impl ToolExecutor for CannedExecutor {
///     fn execute(
///         &self,
///         _program: &Path,
///         _invocation: &ToolInvocation,
///     ) -> Result<ToolOutput, ToolError> {
///         Ok(ToolOutput::from_stdout(r#"{"planned_cost":"1","prior_cost":"0"}"#))
///     }
/// }
/// ```
pub trait ToolExecutor {
    /// Runs `program` with the invocation's arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] if the process cannot be spawned or exits
    /// unsuccessfully.
    fn execute(
        &self,
        program: &Path,
        invocation: &ToolInvocation,
    ) -> Result<ToolOutput, ToolError>;
}

impl<E: ToolExecutor + ?Sized> ToolExecutor for &E {
    fn execute(
        &self,
        program: &Path,
        invocation: &ToolInvocation,
    ) -> Result<ToolOutput, ToolError> {
        (**self).execute(program, invocation)
    }
}

/// Runs invocations against one executable.
#[derive(Debug)]
pub struct ToolRunner<E> {
    program: PathBuf,
    executor: E,
}

impl<E> ToolRunner<E> {
    /// Creates a runner for `program` using `executor`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            program: program.into(),
            executor,
        }
    }

    /// Returns the executable path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl<E: ToolExecutor> ToolRunner<E> {
    /// Executes one invocation and returns its captured output.
    ///
    /// # Errors
    ///
    /// Propagates any error produced by the executor.
    pub fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        info!(
            target: INVOKER_TARGET,
            program = %self.program.display(),
            action = %invocation.action(),
            "invoking Cycloid CLI"
        );
        let output = self.executor.execute(&self.program, invocation)?;
        debug!(
            target: INVOKER_TARGET,
            action = %invocation.action(),
            stdout_bytes = output.stdout().len(),
            stderr_bytes = output.stderr().len(),
            "Cycloid CLI completed"
        );
        Ok(output)
    }
}
