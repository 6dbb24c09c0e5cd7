//! Configuration validation.
//!
//! [`validate`] is a pure function from the raw [`Source`] to a
//! [`ValidatedSource`]: the feature is resolved, the credential is chosen and
//! the API endpoint is defaulted. It runs before any subprocess is spawned.

use std::fmt;

use crate::error::ResourceError;
use crate::model::{Feature, Source};

/// Endpoint of the Cycloid SaaS API, used when `api_url` is blank.
pub const DEFAULT_API_URL: &str = "https://http-api.cycloid.io";

/// API key handed to the Cycloid CLI through its environment.
///
/// The CLI only authenticates with API keys, so the legacy `email` and
/// `password` source fields are never turned into a credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps an API key.
    #[must_use]
    pub fn api_key(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Environment variables exposing the credential to the CLI.
    #[must_use]
    pub fn environment(&self) -> Vec<(&'static str, String)> {
        vec![("CY_API_KEY", self.0.clone())]
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Source configuration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSource {
    /// Resolved feature.
    pub feature: Feature,
    /// Credential for the CLI.
    pub credential: Credential,
    /// Organisation canonical.
    pub org: String,
    /// Project canonical.
    pub project: String,
    /// Environment canonical.
    pub env: String,
    /// API endpoint, never blank.
    pub api_url: String,
}

/// Validates a raw source configuration.
///
/// Every problem is reported at once so the user can fix the pipeline in a
/// single pass.
///
/// # Errors
///
/// Returns [`ResourceError::Configuration`] naming the empty or invalid
/// fields.
pub fn validate(source: &Source) -> Result<ValidatedSource, ResourceError> {
    let mut problems: Vec<String> = Vec::new();

    let feature = match resolve_feature(&source.feature) {
        Ok(feature) => Some(feature),
        Err(problem) => {
            problems.push(problem);
            None
        }
    };

    let credential = resolve_credential(source);
    if credential.is_none() {
        problems.push(missing_credential(source));
    }

    let missing: Vec<&str> = [
        ("org", &source.org),
        ("env", &source.env),
        ("project", &source.project),
    ]
    .into_iter()
    .filter(|(_, value)| is_blank(value))
    .map(|(name, _)| name)
    .collect();
    if !missing.is_empty() {
        problems.push(format!("{} required", describe_missing(&missing)));
    }

    match (feature, credential) {
        (Some(feature), Some(credential)) if problems.is_empty() => Ok(ValidatedSource {
            feature,
            credential,
            org: source.org.clone(),
            project: source.project.clone(),
            env: source.env.clone(),
            api_url: resolve_api_url(&source.api_url),
        }),
        _ => Err(ResourceError::configuration(problems.join("; "))),
    }
}

fn resolve_feature(raw: &str) -> Result<Feature, String> {
    if is_blank(raw) {
        return Err(String::from("feature field is empty"));
    }
    Feature::resolve(raw).map_err(|_| {
        format!(
            "feature field '{raw}' should match one of {}",
            Feature::accepted()
        )
    })
}

fn resolve_credential(source: &Source) -> Option<Credential> {
    (!is_blank(&source.api_key)).then(|| Credential::api_key(source.api_key.as_str()))
}

fn missing_credential(source: &Source) -> String {
    if is_blank(&source.email) && is_blank(&source.password) {
        String::from("api_key is required")
    } else {
        String::from(
            "api_key is required, email and password login is not supported by the Cycloid CLI",
        )
    }
}

fn resolve_api_url(raw: &str) -> String {
    if is_blank(raw) {
        DEFAULT_API_URL.to_owned()
    } else {
        raw.trim().to_owned()
    }
}

fn describe_missing(names: &[&str]) -> String {
    match names {
        [single] => format!("{single} is"),
        [init @ .., last] => format!("{} and {last} are", init.join(", ")),
        [] => String::new(),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
