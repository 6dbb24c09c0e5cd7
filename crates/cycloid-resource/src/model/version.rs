use serde::{Deserialize, Serialize};

use super::Feature;
use crate::error::ResourceError;

/// Version emitted by the policy-check feature.
///
/// Counters are decimal strings because the pipeline runtime only stores
/// string-valued versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyVersion {
    /// Build that produced the version.
    #[serde(default)]
    pub build_id: String,
    /// Number of critical findings.
    pub criticals: String,
    /// Number of warning findings.
    pub warnings: String,
    /// Number of advisory findings.
    pub advisories: String,
}

/// Version emitted by the cost-estimation feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CostVersion {
    /// Build that produced the version.
    #[serde(default)]
    pub build_id: String,
    /// Estimated cost after applying the plan.
    pub planned_cost: String,
    /// Cost before applying the plan.
    pub prior_cost: String,
}

/// Version emitted by the event feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EventVersion {
    /// Build that produced the version.
    #[serde(default)]
    pub build_id: String,
}

/// Feature-tagged version.
///
/// Serialises as the flat payload object. Decoding always goes through
/// [`Version::decode`] so the configured feature, not the payload shape,
/// selects the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Version {
    /// Policy-check version.
    InfraPolicy(PolicyVersion),
    /// Cost-estimation version.
    TerraCost(CostVersion),
    /// Event version.
    Event(EventVersion),
}

impl Version {
    /// Decodes a raw version payload for the given feature.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] when the payload does not match the
    /// feature's version shape.
    pub fn decode(feature: Feature, value: serde_json::Value) -> Result<Self, ResourceError> {
        let decoded = match feature {
            Feature::InfraPolicy => serde_json::from_value(value).map(Self::InfraPolicy),
            Feature::TerraCost => serde_json::from_value(value).map(Self::TerraCost),
            Feature::Event => serde_json::from_value(value).map(Self::Event),
        };
        decoded.map_err(|err| ResourceError::decode(format!("{feature} version"), err))
    }

    /// Returns the feature the version belongs to.
    #[must_use]
    pub const fn feature(&self) -> Feature {
        match self {
            Self::InfraPolicy(_) => Feature::InfraPolicy,
            Self::TerraCost(_) => Feature::TerraCost,
            Self::Event(_) => Feature::Event,
        }
    }

    /// Returns the build identifier.
    #[must_use]
    pub fn build_id(&self) -> &str {
        match self {
            Self::InfraPolicy(version) => &version.build_id,
            Self::TerraCost(version) => &version.build_id,
            Self::Event(version) => &version.build_id,
        }
    }
}
