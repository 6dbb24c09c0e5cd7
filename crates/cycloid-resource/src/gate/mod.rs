//! Pass/fail decision over policy-check counters.

use tracing::debug;

use crate::error::ResourceError;
use crate::model::{PolicyVersion, Version};

const GATE_TARGET: &str = "cycloid_resource::gate";

/// Fails when a policy version reports criticals or warnings.
///
/// Advisories never block the pipeline. Counters are signed so that any
/// integer the CLI reports parses; only positive counts block.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidCounter`] when a counter is not an
/// integer and [`ResourceError::Gate`] when either count is
/// nonzero.
pub fn evaluate(version: &PolicyVersion) -> Result<(), ResourceError> {
    let criticals = counter("criticals", &version.criticals)?;
    let warnings = counter("warnings", &version.warnings)?;
    debug!(target: GATE_TARGET, criticals, warnings, "evaluated policy counters");
    if criticals > 0 || warnings > 0 {
        return Err(ResourceError::Gate {
            criticals,
            warnings,
        });
    }
    Ok(())
}

/// Applies [`evaluate`] to policy versions; other features always pass.
///
/// # Errors
///
/// Propagates the errors of [`evaluate`].
pub fn enforce(version: &Version) -> Result<(), ResourceError> {
    match version {
        Version::InfraPolicy(policy) => evaluate(policy),
        Version::TerraCost(_) | Version::Event(_) => Ok(()),
    }
}

fn counter(name: &'static str, value: &str) -> Result<i64, ResourceError> {
    value
        .parse::<i64>()
        .map_err(|source| ResourceError::InvalidCounter {
            counter: name,
            value: value.to_owned(),
            source,
        })
}
