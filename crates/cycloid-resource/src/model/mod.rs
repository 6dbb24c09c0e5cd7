//! Wire types exchanged with the pipeline runtime.
//!
//! The runtime writes one [`Request`] to stdin. Its `version` field is kept
//! as raw JSON until the feature is known, then decoded into the matching
//! [`Version`] variant.

mod envelope;
mod feature;
mod version;

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ResourceError;

pub use self::envelope::{Envelope, Metadata};
pub use self::feature::Feature;
pub use self::version::{CostVersion, EventVersion, PolicyVersion, Version};

/// Stdin payload of every verb.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Request {
    /// Resource configuration from the pipeline definition.
    #[serde(deserialize_with = "null_as_default")]
    pub source: Source,
    /// Version to fetch or re-check, still undecoded.
    pub version: Option<serde_json::Value>,
    /// Step parameters (only meaningful for `out`).
    #[serde(deserialize_with = "null_as_default")]
    pub params: Params,
}

impl Request {
    /// Decodes a request from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] when the input is not a valid
    /// request document.
    pub fn from_reader(reader: impl Read) -> Result<Self, ResourceError> {
        serde_json::from_reader(reader).map_err(|err| ResourceError::decode("stdin request", err))
    }
}

/// Pipeline-supplied resource configuration.
///
/// Field values are taken as-is; [`crate::validate`] decides whether they
/// form a usable configuration.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Source {
    /// Feature selector: `infrapolicy`, `terracost` or `event`.
    pub feature: String,
    /// Cycloid API key.
    pub api_key: String,
    /// Legacy login email; rejected in favour of `api_key`.
    pub email: String,
    /// Legacy login password; rejected in favour of `api_key`.
    pub password: String,
    /// Organisation canonical.
    pub org: String,
    /// Project canonical.
    pub project: String,
    /// Environment canonical.
    pub env: String,
    /// Cycloid API endpoint; defaulted when blank.
    pub api_url: String,
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("feature", &self.feature)
            .field("api_key", &redacted(&self.api_key))
            .field("email", &self.email)
            .field("password", &redacted(&self.password))
            .field("org", &self.org)
            .field("project", &self.project)
            .field("env", &self.env)
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Decodes an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

/// Parameters of an `out` step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Params {
    /// Path to the Terraform plan, relative to the step directory.
    pub tfplan_path: String,
    /// Also run a cost estimation after a policy check.
    pub terracost: bool,
    /// Event title; `$VAR` references are substituted.
    pub title: String,
    /// Event message; `$VAR` references are substituted.
    pub message: String,
    /// File holding the event message, preferred over `message`.
    pub message_file: String,
    /// Event severity passed through to the CLI.
    pub severity: String,
    /// Event type, `Custom` when blank.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event icon passed through to the CLI.
    pub icon: String,
    /// Event tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
    /// YAML file of variables available to substitution.
    pub yaml_vars_file: String,
}
