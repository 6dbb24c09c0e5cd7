//! Command-line arguments of the resource binaries.
//!
//! The pipeline runtime passes at most one positional argument: the step
//! directory for `in` and `out`. Everything else arrives on stdin.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::Verb;
use crate::error::ResourceError;

const MISSING_DIRECTORY: &str = "expected path to directory as first argument";

#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Step directory: destination for `in`, sources for `out`.
    #[arg(value_name = "DIRECTORY")]
    directory: Option<PathBuf>,
}

/// Parsed arguments for one verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arguments {
    pub(crate) directory: Option<PathBuf>,
}

impl Arguments {
    /// Returns the step directory, failing when it was not supplied.
    pub(crate) fn require_directory(&self) -> Result<PathBuf, ResourceError> {
        self.directory.clone().ok_or_else(|| ResourceError::Usage {
            message: MISSING_DIRECTORY.to_owned(),
        })
    }
}

/// Parses `args`, the first of which is the program name.
pub(crate) fn parse(verb: Verb, args: &[OsString]) -> Result<Arguments, ResourceError> {
    let cli = Cli::try_parse_from(args).map_err(|error| ResourceError::Usage {
        message: format!("{verb}: {}", error.to_string().trim_end()),
    })?;
    Ok(Arguments {
        directory: cli.directory,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn args(values: &[&str]) -> Vec<OsString> {
        values.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case(Verb::In)]
    #[case(Verb::Out)]
    fn directory_is_the_first_positional(#[case] verb: Verb) {
        let parsed = parse(verb, &args(&["out", "/tmp/build/put"])).expect("parse");
        assert_eq!(
            parsed.require_directory().expect("directory"),
            PathBuf::from("/tmp/build/put")
        );
    }

    #[test]
    fn missing_directory_is_usage_error() {
        let parsed = parse(Verb::In, &args(&["in"])).expect("parse");
        let err = parsed.require_directory().expect_err("should fail");
        assert!(matches!(err, ResourceError::Usage { .. }));
        assert_eq!(err.to_string(), MISSING_DIRECTORY);
        assert_eq!(err.exit_code(), crate::error::EXIT_FAILURE);
    }

    #[test]
    fn check_accepts_no_arguments() {
        let parsed = parse(Verb::Check, &args(&["check"])).expect("parse");
        assert!(parsed.directory.is_none());
    }

    #[test]
    fn extra_arguments_are_rejected() {
        let err = parse(Verb::Out, &args(&["out", "a", "b"])).expect_err("should fail");
        assert!(matches!(err, ResourceError::Usage { .. }));
    }
}
