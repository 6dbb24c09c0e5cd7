//! Runtime settings shared by the `check`, `in` and `out` binaries.
//!
//! Pipeline-supplied configuration arrives on stdin and is modelled by the
//! `cycloid-resource` crate. This crate only covers the operator-facing knobs
//! around it: how the binaries log and which executable they treat as the
//! Cycloid CLI. Values are layered by `ortho_config` from defaults, an
//! optional configuration file and `CYCLOID_RESOURCE_*` environment
//! variables.

mod defaults;
mod logging;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{BUILD_ID_ENV, DEFAULT_CLI_PATH, DEFAULT_LOG_FILTER, default_log_format};
pub use logging::LogFormat;

/// Layered runtime configuration for the resource binaries.
///
/// Every field is optional so that an absent layer never masks a lower one;
/// accessors apply the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CYCLOID_RESOURCE")]
pub struct Config {
    /// `tracing` filter directive, for example `debug` or
    /// `cycloid_resource=trace`.
    pub log_filter: Option<String>,
    /// Output format of the log lines written to standard error.
    pub log_format: Option<LogFormat>,
    /// Path of the Cycloid CLI executable.
    pub cli_path: Option<String>,
}

impl Config {
    /// Loads the configuration from the process environment and config files.
    ///
    /// Only the program name is forwarded to the loader: the pipeline runtime
    /// owns the positional arguments of the resource binaries.
    ///
    /// # Errors
    ///
    /// Returns the loader error when a layer cannot be parsed.
    pub fn load_for_program(program: Option<OsString>) -> Result<Self, Arc<OrthoError>> {
        let program = program.unwrap_or_else(|| OsString::from("cycloid-resource"));
        Self::load_from_iter([program])
    }

    /// Returns the configured log filter or [`DEFAULT_LOG_FILTER`].
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Returns the configured log format or the compact default.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Returns the executable used to reach the Cycloid API.
    #[must_use]
    pub fn cli_path(&self) -> PathBuf {
        PathBuf::from(
            self.cli_path
                .as_deref()
                .filter(|path| !path.trim().is_empty())
                .unwrap_or(DEFAULT_CLI_PATH),
        )
    }
}
