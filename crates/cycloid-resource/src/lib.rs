//! Cycloid pipeline resource.
//!
//! The pipeline runtime drives a resource through three executables:
//!
//! - `check` re-validates the last known version,
//! - `in` fetches a version into a step directory,
//! - `out` runs the configured feature (policy check, cost estimation or
//!   event) through the Cycloid CLI and reports the resulting version.
//!
//! Every executable reads one JSON request from stdin and writes one JSON
//! document to stdout. Runtime settings for the binaries themselves come
//! from [`cycloid_resource_config::Config`]; logs go to stderr.

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use cycloid_resource_config::{BUILD_ID_ENV, Config};
use cycloid_resource_invoker::{ProcessExecutor, ToolRunner};
use strum::Display;
use tracing::{error, info};

mod cli;
pub mod commands;
pub mod error;
pub mod gate;
pub mod model;
pub mod normalize;
pub mod output;
pub mod telemetry;
pub mod validate;
pub mod vars;
pub mod verbs;

#[cfg(test)]
mod tests;

use crate::error::ResourceError;
use crate::model::Request;

const RESOURCE_TARGET: &str = "cycloid_resource";

/// Resource executable being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Verb {
    /// Re-validate the current version.
    Check,
    /// Fetch a version.
    In,
    /// Produce a new version.
    Out,
}

/// Loads the binaries' runtime settings.
pub(crate) trait ConfigLoader {
    /// Loads configuration for the program named `program`.
    fn load(&self, program: Option<OsString>) -> Result<Config, ResourceError>;
}

/// Loads settings through `ortho_config`.
pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, program: Option<OsString>) -> Result<Config, ResourceError> {
        Config::load_for_program(program).map_err(ResourceError::Settings)
    }
}

/// Runs `verb` with the process arguments and standard streams.
///
/// Errors are printed to `stderr` and mapped to the exit status returned by
/// [`ResourceError::exit_code`].
#[must_use]
pub fn run<I, R, W, E>(verb: Verb, args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    run_with_loader(verb, args, stdin, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, R, W, E, L>(
    verb: Verb,
    args: I,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let args: Vec<OsString> = args.into_iter().collect();
    match execute(verb, &args, stdin, stdout, stderr, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: RESOURCE_TARGET, %verb, error = %err, "resource failed");
            let _ = writeln!(stderr, "{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn execute<R, W, E, L>(
    verb: Verb,
    args: &[OsString],
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> Result<(), ResourceError>
where
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let config = loader.load(args.first().cloned())?;
    telemetry::initialise(&config)?;
    let arguments = cli::parse(verb, args)?;
    info!(target: RESOURCE_TARGET, %verb, "starting");

    match verb {
        Verb::Check => {
            let request = Request::from_reader(stdin)?;
            output::emit(stdout, &verbs::check(&request)?)
        }
        Verb::In => {
            arguments.require_directory()?;
            let request = Request::from_reader(stdin)?;
            output::emit(stdout, &verbs::fetch(&request)?)
        }
        Verb::Out => {
            let directory = arguments.require_directory()?;
            let request = Request::from_reader(stdin)?;
            let build_id = std::env::var(BUILD_ID_ENV).unwrap_or_default();
            let runner = ToolRunner::new(config.cli_path(), ProcessExecutor);
            let envelope = verbs::put(&request, &directory, &build_id, &runner, stderr)?;
            output::emit(stdout, &envelope)
        }
    }
}
