//! The `check`, `in` and `out` operations.
//!
//! Each verb validates the source before doing anything else, so an
//! incomplete configuration never reaches the Cycloid CLI.

use std::io::Write;
use std::path::Path;

use cycloid_resource_invoker::{ToolExecutor, ToolInvocation, ToolOutput, ToolRunner};
use tracing::{debug, info};

use crate::commands::{self, EventRequest};
use crate::error::ResourceError;
use crate::gate;
use crate::model::{Envelope, Feature, Request, Version};
use crate::normalize;
use crate::output::{self, ENVELOPE_FILE, RAW_OUTPUT_FILE};
use crate::validate::{ValidatedSource, validate};

const VERBS_TARGET: &str = "cycloid_resource::verbs";

/// Re-checks the version supplied by the runtime.
///
/// With a version the result is the one-element list `[version]`. On the
/// first check the runtime sends no version, and the result is the empty
/// list rather than a single-element one: there is no version to echo and
/// none is invented. Check never contacts the Cycloid API.
///
/// # Errors
///
/// Returns configuration, decode and gate errors.
pub fn check(request: &Request) -> Result<Vec<Version>, ResourceError> {
    let source = validate(&request.source)?;
    let Some(raw) = request.version.clone() else {
        debug!(target: VERBS_TARGET, feature = %source.feature, "no version to check");
        return Ok(Vec::new());
    };
    let version = Version::decode(source.feature, raw)?;
    gate::enforce(&version)?;
    Ok(vec![version])
}

/// Fetches the version supplied by the runtime.
///
/// # Errors
///
/// Returns [`ResourceError::MissingVersion`] when the request carries no
/// version, and configuration, decode and gate errors.
pub fn fetch(request: &Request) -> Result<Envelope, ResourceError> {
    let source = validate(&request.source)?;
    let raw = request
        .version
        .clone()
        .ok_or(ResourceError::MissingVersion)?;
    let version = Version::decode(source.feature, raw)?;
    gate::enforce(&version)?;
    Ok(Envelope::new(version, Vec::new()))
}

/// Runs the configured feature against the Cycloid CLI.
///
/// The raw CLI output is written to [`RAW_OUTPUT_FILE`] before it is
/// normalised; the envelope is written to [`ENVELOPE_FILE`] and returned.
/// Cost estimations are also echoed to `console` for the pipeline log.
///
/// # Errors
///
/// Returns configuration errors before any subprocess is spawned, then any
/// tool, decode or file error.
pub fn put<E, W>(
    request: &Request,
    directory: &Path,
    build_id: &str,
    runner: &ToolRunner<E>,
    console: &mut W,
) -> Result<Envelope, ResourceError>
where
    E: ToolExecutor,
    W: Write + ?Sized,
{
    let source = validate(&request.source)?;
    let params = &request.params;
    info!(
        target: VERBS_TARGET,
        feature = %source.feature,
        org = %source.org,
        project = %source.project,
        env = %source.env,
        "running put"
    );

    let envelope = match source.feature {
        Feature::InfraPolicy => {
            let plan = commands::require_plan_path(params, source.feature)?;
            let output = execute(runner, commands::policy_invocation(&source, plan), directory)?;
            output::write_private_file(directory, RAW_OUTPUT_FILE, output.stdout())?;
            let mut envelope = normalize::normalize_policy(output.stdout(), build_id)?;
            if params.terracost {
                let estimate = estimate_cost(runner, &source, plan, directory, console)?;
                envelope
                    .metadata
                    .extend(normalize::cost_metadata(&normalize::parse_cost(estimate.stdout())?));
            }
            envelope
        }
        Feature::TerraCost => {
            let plan = commands::require_plan_path(params, source.feature)?;
            let output = estimate_cost(runner, &source, plan, directory, console)?;
            output::write_private_file(directory, RAW_OUTPUT_FILE, output.stdout())?;
            normalize::normalize_cost(output.stdout(), build_id)?
        }
        Feature::Event => {
            let event = EventRequest::prepare(&source, params, directory)?;
            let output = execute(runner, commands::event_invocation(&source, &event), directory)?;
            output::write_private_file(directory, RAW_OUTPUT_FILE, output.stdout())?;
            normalize::normalize_event(&event.title, build_id)
        }
    };

    output::write_private_file(directory, ENVELOPE_FILE, envelope.to_json()?.as_bytes())?;
    Ok(envelope)
}

fn execute<E: ToolExecutor>(
    runner: &ToolRunner<E>,
    invocation: ToolInvocation,
    directory: &Path,
) -> Result<ToolOutput, ResourceError> {
    Ok(runner.run(&invocation.current_dir(directory))?)
}

/// Runs `cy terracost estimate` and echoes its JSON for the console.
fn estimate_cost<E, W>(
    runner: &ToolRunner<E>,
    source: &ValidatedSource,
    plan: &str,
    directory: &Path,
    console: &mut W,
) -> Result<ToolOutput, ResourceError>
where
    E: ToolExecutor,
    W: Write + ?Sized,
{
    let output = execute(runner, commands::cost_invocation(source, plan), directory)?;
    console.write_all(output.stdout())?;
    console.write_all(b"\n")?;
    Ok(output)
}

#[cfg(test)]
mod tests;
