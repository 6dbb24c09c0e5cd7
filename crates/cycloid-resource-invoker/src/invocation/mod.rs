//! Description of a single call to the Cycloid CLI.
//!
//! A [`ToolInvocation`] is an ordered argument vector that starts with the
//! sub-action words (for example `infrapolicy validate`), followed by the
//! flags the caller appends. Credentials travel in the environment map so
//! they never appear in argv or in log output.

use std::fmt;
use std::path::{Path, PathBuf};

/// Sub-actions of the Cycloid CLI used by the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolAction {
    /// `cy infrapolicy validate`: evaluate a Terraform plan against policies.
    InfraPolicyValidate,
    /// `cy terracost estimate`: estimate the cost of a Terraform plan.
    TerraCostEstimate,
    /// `cy event create`: publish an event to the Cycloid console.
    EventCreate,
}

impl ToolAction {
    /// Returns the CLI words selecting this sub-action.
    #[must_use]
    pub const fn words(self) -> [&'static str; 2] {
        match self {
            Self::InfraPolicyValidate => ["infrapolicy", "validate"],
            Self::TerraCostEstimate => ["terracost", "estimate"],
            Self::EventCreate => ["event", "create"],
        }
    }
}

impl fmt::Display for ToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [group, verb] = self.words();
        write!(f, "{group} {verb}")
    }
}

/// One call to the external tool.
///
/// # Example
///
/// ```
/// use cycloid_resource_invoker::{ToolAction, ToolInvocation};
///
/// let invocation = ToolInvocation::new(ToolAction::EventCreate)
///     .flag("--org", "acme")
///     .json_output();
/// assert_eq!(
///     invocation.arguments(),
///     ["event", "create", "--org", "acme", "-o", "json"]
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    action: ToolAction,
    arguments: Vec<String>,
    environment: Vec<(String, String)>,
    working_dir: Option<PathBuf>,
}

impl ToolInvocation {
    /// Starts an invocation whose argument vector holds the action words.
    #[must_use]
    pub fn new(action: ToolAction) -> Self {
        Self {
            action,
            arguments: action.words().iter().map(|word| (*word).to_owned()).collect(),
            environment: Vec::new(),
            working_dir: None,
        }
    }

    /// Appends a flag followed by its value.
    #[must_use]
    pub fn flag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.arguments.push(name.to_owned());
        self.arguments.push(value.into());
        self
    }

    /// Appends the machine-readable output selector `-o json`.
    #[must_use]
    pub fn json_output(self) -> Self {
        self.flag("-o", "json")
    }

    /// Adds an environment variable for the child process.
    ///
    /// Values are treated as secrets and never rendered by [`fmt::Debug`].
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.push((key.into(), value.into()));
        self
    }

    /// Runs the tool from the given working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Returns the sub-action.
    #[must_use]
    pub const fn action(&self) -> ToolAction {
        self.action
    }

    /// Returns the full argument vector, action words first.
    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Returns the environment variables passed to the child.
    #[must_use]
    pub fn environment(&self) -> &[(String, String)] {
        &self.environment
    }

    /// Returns the working directory, if one was set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

impl fmt::Debug for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_keys: Vec<&str> = self
            .environment
            .iter()
            .map(|(key, _)| key.as_str())
            .collect();
        f.debug_struct("ToolInvocation")
            .field("action", &self.action)
            .field("arguments", &self.arguments)
            .field("environment", &env_keys)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

/// Streams captured from a successful tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl ToolOutput {
    /// Wraps captured standard output and standard error.
    #[must_use]
    pub const fn new(stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self { stdout, stderr }
    }

    /// Convenience constructor for output with an empty stderr.
    #[must_use]
    pub fn from_stdout(stdout: impl Into<Vec<u8>>) -> Self {
        Self::new(stdout.into(), Vec::new())
    }

    /// Raw bytes written to stdout; the tool's JSON result.
    #[must_use]
    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    /// Raw bytes written to stderr.
    #[must_use]
    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }
}
