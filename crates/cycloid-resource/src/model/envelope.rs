use serde::{Deserialize, Serialize};

use super::{Feature, Version};
use crate::error::ResourceError;

/// Display-only name/value pair attached to a version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: String,
}

impl Metadata {
    /// Creates a metadata entry.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// `{version, metadata}` document returned by `in` and `out`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    /// Version produced or fetched.
    pub version: Version,
    /// Metadata describing the version.
    pub metadata: Vec<Metadata>,
}

#[derive(Deserialize)]
struct RawEnvelope {
    version: serde_json::Value,
    #[serde(default)]
    metadata: Vec<Metadata>,
}

impl Envelope {
    /// Creates an envelope.
    #[must_use]
    pub const fn new(version: Version, metadata: Vec<Metadata>) -> Self {
        Self { version, metadata }
    }

    /// Serialises the envelope as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Encode`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, ResourceError> {
        serde_json::to_string(self).map_err(ResourceError::Encode)
    }

    /// Parses an envelope previously written for `feature`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] when the text is not an envelope
    /// or its version does not match the feature.
    pub fn decode(feature: Feature, text: &str) -> Result<Self, ResourceError> {
        let raw: RawEnvelope =
            serde_json::from_str(text).map_err(|err| ResourceError::decode("envelope", err))?;
        Ok(Self {
            version: Version::decode(feature, raw.version)?,
            metadata: raw.metadata,
        })
    }
}
