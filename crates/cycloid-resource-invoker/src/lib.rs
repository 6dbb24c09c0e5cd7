//! Subprocess execution layer for the Cycloid pipeline resource.
//!
//! The resource never talks to the Cycloid API itself. Every action (policy
//! validation, cost estimation, event creation) is delegated to the `cy`
//! command-line tool. This crate owns that boundary: a [`ToolInvocation`]
//! describes one call, a [`ToolExecutor`] runs it, and the [`ToolRunner`]
//! binds an executor to the configured executable.
//!
//! The tool is expected to print its JSON result on stdout and exit zero.
//! Any other outcome becomes a [`ToolError`] whose message carries the tool's
//! stderr verbatim.
//!
//! # Example
//!
//! ```rust,no_run
//! use cycloid_resource_invoker::{ProcessExecutor, ToolAction, ToolInvocation, ToolRunner};
//!
//! let runner = ToolRunner::new("cy", ProcessExecutor);
//! let invocation = ToolInvocation::new(ToolAction::TerraCostEstimate)
//!     .flag("--org", "acme")
//!     .flag("--plan-path", "plan.json")
//!     .json_output();
//! let output = runner.run(&invocation).expect("cy succeeds");
//! println!("{}", String::from_utf8_lossy(output.stdout()));
//! ```

pub mod error;
pub mod invocation;
pub mod process;
pub mod runner;

#[cfg(test)]
mod tests;

pub use self::error::ToolError;
pub use self::invocation::{ToolAction, ToolInvocation, ToolOutput};
pub use self::process::ProcessExecutor;
pub use self::runner::{ToolExecutor, ToolRunner};
