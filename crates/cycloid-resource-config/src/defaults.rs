use crate::logging::LogFormat;

/// Default log filter expression used by the resource binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Executable invoked when no tool path override is configured.
pub const DEFAULT_CLI_PATH: &str = "cy";

/// Environment variable the pipeline runtime uses to expose the build id.
pub const BUILD_ID_ENV: &str = "BUILD_ID";

/// Default logging format for the resource binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
