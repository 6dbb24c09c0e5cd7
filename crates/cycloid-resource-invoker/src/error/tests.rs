//! Unit tests for tool error formatting.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use super::*;

#[test]
fn non_zero_exit_keeps_stderr_verbatim() {
    let error = ToolError::from_exit(
        ToolAction::TerraCostEstimate,
        Some(1),
        b"plan not found\n  at ./plan.json",
    );
    let rendered = error.to_string();
    assert!(rendered.contains("plan not found\n  at ./plan.json"));
    assert!(rendered.starts_with("cy terracost estimate failed"));
}

#[test]
fn empty_stderr_falls_back_to_status() {
    let error = ToolError::from_exit(ToolAction::EventCreate, Some(7), b"  \n");
    assert_eq!(error.to_string(), "cy event create failed: exited with status 7");
}

#[test]
fn signal_termination_has_generic_message() {
    let error = ToolError::from_exit(ToolAction::EventCreate, None, b"");
    assert!(error.to_string().ends_with("terminated by signal"));
}

#[test]
fn spawn_failure_names_program() {
    let error = ToolError::SpawnFailed {
        program: PathBuf::from("/missing/cy"),
        action: ToolAction::InfraPolicyValidate,
        source: Arc::new(io::Error::from(io::ErrorKind::NotFound)),
    };
    assert!(error.to_string().contains("/missing/cy"));
    assert_eq!(error.action(), ToolAction::InfraPolicyValidate);
}
