//! Error surface of the resource verbs.
//!
//! Every failure is fatal to the invocation. [`ResourceError::class`] groups
//! the variants into the categories the pipeline runtime cares about and
//! [`ResourceError::exit_code`] picks the process exit status.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::sync::Arc;

use cycloid_resource_invoker::ToolError;
use ortho_config::OrthoError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Exit status for every failure except a tripped gate.
pub const EXIT_FAILURE: u8 = 1;

/// Exit status used when criticals or warnings block the pipeline.
pub const EXIT_GATE_FAILURE: u8 = 3;

/// Broad categories of [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or malformed command-line arguments.
    Usage,
    /// Malformed request JSON, tool JSON, or version counters.
    Decode,
    /// Incomplete or inconsistent configuration.
    Configuration,
    /// The Cycloid CLI could not be run or failed.
    ExternalTool,
    /// Criticals or warnings are present.
    Gate,
    /// Reading inputs or writing outputs failed.
    Io,
}

/// Errors raised by the `check`, `in` and `out` verbs.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Command-line arguments were missing or invalid.
    #[error("{message}")]
    Usage {
        /// Human-readable usage message.
        message: String,
    },

    /// A JSON document could not be decoded.
    #[error("unable to decode {what}: {source}")]
    Decode {
        /// Description of the document being decoded.
        what: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// `in` was called without a version.
    #[error("unable to decode the version passed as argument: no version supplied")]
    MissingVersion,

    /// A version counter is not a valid integer.
    #[error("unable to get number of {counter} checks from '{value}': {source}")]
    InvalidCounter {
        /// Counter name, `criticals` or `warnings`.
        counter: &'static str,
        /// Raw counter text.
        value: String,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },

    /// The source or params are incomplete.
    #[error("resource configuration error: {message}")]
    Configuration {
        /// Names the offending fields.
        message: String,
    },

    /// The Cycloid CLI failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Criticals or warnings are present in the policy result.
    #[error(
        "critical or warning checks are present ({criticals} criticals, {warnings} warnings), \
         check metadata of your resource for more information"
    )]
    Gate {
        /// Number of critical findings.
        criticals: i64,
        /// Number of warning findings.
        warnings: i64,
    },

    /// An input file could not be read.
    #[error("unable to read {what} '{path}': {source}")]
    ReadFile {
        /// Role of the file, for example `message file`.
        what: &'static str,
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The variable file is not a flat string mapping.
    #[error("unable to load the defined variable file '{path}': {message}")]
    VarsFile {
        /// Path of the variable file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// An output file could not be written.
    #[error("unable to write output file '{path}': {source}")]
    WriteFile {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The output envelope could not be serialised.
    #[error("unable to marshal to output: {0}")]
    Encode(#[source] serde_json::Error),

    /// Writing to standard output or standard error failed.
    #[error("unable to emit output: {0}")]
    Emit(#[source] Arc<io::Error>),

    /// Runtime settings could not be loaded.
    #[error("failed to load resource settings: {0}")]
    Settings(Arc<OrthoError>),

    /// Logging could not be configured.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

impl ResourceError {
    /// Builds a [`ResourceError::Decode`].
    pub(crate) fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            what: what.into(),
            source,
        }
    }

    /// Builds a [`ResourceError::Configuration`].
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the category of the error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Usage { .. } => ErrorClass::Usage,
            Self::Decode { .. } | Self::MissingVersion | Self::InvalidCounter { .. } => {
                ErrorClass::Decode
            }
            Self::Configuration { .. } | Self::Settings(_) | Self::Telemetry(_) => {
                ErrorClass::Configuration
            }
            Self::Tool(_) => ErrorClass::ExternalTool,
            Self::Gate { .. } => ErrorClass::Gate,
            Self::ReadFile { .. }
            | Self::VarsFile { .. }
            | Self::WriteFile { .. }
            | Self::Encode(_)
            | Self::Emit(_) => ErrorClass::Io,
        }
    }

    /// Returns the process exit status for the error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self.class() {
            ErrorClass::Gate => EXIT_GATE_FAILURE,
            _ => EXIT_FAILURE,
        }
    }
}

impl From<io::Error> for ResourceError {
    fn from(source: io::Error) -> Self {
        Self::Emit(Arc::new(source))
    }
}
