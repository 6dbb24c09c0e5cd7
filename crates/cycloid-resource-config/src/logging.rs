//! Log line formats for the resource binaries.
//!
//! Pipeline build logs are read by people, so the compact format is the
//! default. JSON is meant for log shippers scraping worker output.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Format of the log lines written to standard error.
///
/// Values are matched case-insensitively. `text` and `plain` select the
/// compact format and `jsonl` selects JSON.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// One human-readable line per event.
    #[default]
    #[serde(alias = "text", alias = "plain")]
    #[strum(to_string = "compact", serialize = "text", serialize = "plain")]
    Compact,
    /// One flattened JSON object per event.
    #[serde(alias = "jsonl")]
    #[strum(to_string = "json", serialize = "jsonl")]
    Json,
}
