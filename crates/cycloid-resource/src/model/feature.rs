use std::str::FromStr;

use strum::{Display, EnumString, VariantNames};

/// Cycloid capability driven by the resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Feature {
    /// Policy validation of a Terraform plan (the gated feature).
    InfraPolicy,
    /// Cost estimation of a Terraform plan.
    TerraCost,
    /// Event publication.
    Event,
}

impl Feature {
    /// Resolves a feature name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`strum::ParseError`] when the name matches no feature.
    pub fn resolve(name: &str) -> Result<Self, strum::ParseError> {
        Self::from_str(name.trim())
    }

    /// Comma-separated list of accepted feature names.
    #[must_use]
    pub fn accepted() -> String {
        Self::VARIANTS.join(", ")
    }
}
