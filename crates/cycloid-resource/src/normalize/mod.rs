//! Converts Cycloid CLI results into versions and metadata.

use serde::Deserialize;

use crate::error::ResourceError;
use crate::model::{CostVersion, Envelope, EventVersion, Metadata, PolicyVersion, Version};

/// One policy finding as reported by `cy infrapolicy validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyFinding {
    /// Human-readable reasons attached to the finding.
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Result document of `cy infrapolicy validate -o json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyReport {
    /// Findings blocking the pipeline.
    #[serde(default)]
    pub criticals: Option<Vec<PolicyFinding>>,
    /// Findings blocking the pipeline.
    #[serde(default)]
    pub warnings: Option<Vec<PolicyFinding>>,
    /// Informational findings.
    #[serde(default)]
    pub advisories: Option<Vec<PolicyFinding>>,
}

/// Result document of `cy terracost estimate -o json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CostEstimate {
    /// Estimated cost once the plan is applied.
    #[serde(default)]
    pub planned_cost: String,
    /// Cost before the plan is applied.
    #[serde(default)]
    pub prior_cost: String,
}

/// Normalises a policy report.
///
/// Each category contributes its length as the version counter. Non-empty
/// categories also contribute one metadata entry holding every reason,
/// newline-joined, in input order.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] when `raw` is not a policy report.
pub fn normalize_policy(raw: &[u8], build_id: &str) -> Result<Envelope, ResourceError> {
    let report: PolicyReport = serde_json::from_slice(raw)
        .map_err(|err| ResourceError::decode("cy infrapolicy validate output", err))?;

    let mut metadata = Vec::new();
    let criticals = summarise(
        "criticals",
        report.criticals.as_deref().unwrap_or_default(),
        &mut metadata,
    );
    let warnings = summarise(
        "warnings",
        report.warnings.as_deref().unwrap_or_default(),
        &mut metadata,
    );
    let advisories = summarise(
        "advisories",
        report.advisories.as_deref().unwrap_or_default(),
        &mut metadata,
    );

    let version = Version::InfraPolicy(PolicyVersion {
        build_id: build_id.to_owned(),
        criticals,
        warnings,
        advisories,
    });
    Ok(Envelope::new(version, metadata))
}

/// Returns the counter for one category, pushing its metadata entry.
fn summarise(
    category: &str,
    findings: &[PolicyFinding],
    metadata: &mut Vec<Metadata>,
) -> String {
    if !findings.is_empty() {
        let reasons: Vec<&str> = findings
            .iter()
            .flat_map(|finding| finding.reasons.iter().map(String::as_str))
            .collect();
        metadata.push(Metadata::new(category, reasons.join("\n")));
    }
    findings.len().to_string()
}

/// Parses a cost estimate.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] when `raw` is not a cost estimate.
pub fn parse_cost(raw: &[u8]) -> Result<CostEstimate, ResourceError> {
    serde_json::from_slice(raw)
        .map_err(|err| ResourceError::decode("cy terracost estimate output", err))
}

/// Metadata entries describing a cost estimate.
#[must_use]
pub fn cost_metadata(estimate: &CostEstimate) -> Vec<Metadata> {
    vec![
        Metadata::new("planned_cost", estimate.planned_cost.as_str()),
        Metadata::new("prior_cost", estimate.prior_cost.as_str()),
    ]
}

/// Normalises a cost estimate.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] when `raw` is not a cost estimate.
pub fn normalize_cost(raw: &[u8], build_id: &str) -> Result<Envelope, ResourceError> {
    let estimate = parse_cost(raw)?;
    let metadata = cost_metadata(&estimate);
    let version = Version::TerraCost(CostVersion {
        build_id: build_id.to_owned(),
        planned_cost: estimate.planned_cost,
        prior_cost: estimate.prior_cost,
    });
    Ok(Envelope::new(version, metadata))
}

/// Normalises a created event. The CLI output itself is not inspected.
#[must_use]
pub fn normalize_event(title: &str, build_id: &str) -> Envelope {
    Envelope::new(
        Version::Event(EventVersion {
            build_id: build_id.to_owned(),
        }),
        vec![Metadata::new("title", title)],
    )
}
