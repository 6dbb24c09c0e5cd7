//! Unit tests for verb orchestration.

use std::fs;
use std::path::Path;

use cycloid_resource_invoker::{ToolAction, ToolRunner};
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::error::{ErrorClass, EXIT_GATE_FAILURE};
use crate::model::Metadata;
use crate::tests::{ScriptedExecutor, request};

const POLICY_CLEAN: &str = r#"{"criticals":[],"warnings":[],"advisories":[{"reasons":["tag it"]},{"reasons":["name it"]},{"reasons":["doc it"]}]}"#;
const POLICY_BLOCKED: &str = r#"{"criticals":[{"reasons":["public bucket"]},{"reasons":["open port"]}],"warnings":[],"advisories":[]}"#;
const COST: &str = r#"{"planned_cost":"120.00","prior_cost":"100.00"}"#;

#[fixture]
fn workdir() -> TempDir {
    TempDir::new().expect("temp dir")
}

fn run_put(
    executor: &ScriptedExecutor,
    request: &Request,
    directory: &Path,
) -> (Result<Envelope, ResourceError>, String) {
    let runner = ToolRunner::new("cy", executor);
    let mut console = Vec::new();
    let result = put(request, directory, "42", &runner, &mut console);
    (result, String::from_utf8(console).expect("utf8 console"))
}

#[test]
fn check_without_version_emits_empty_list() {
    let versions = check(&request("terracost", None, json!({}))).expect("check");
    assert!(versions.is_empty());
}

#[test]
fn check_with_null_version_emits_empty_list() {
    let request: Request = serde_json::from_value(json!({
        "source": {"feature": "infrapolicy", "api_key": "k", "org": "o", "project": "p", "env": "e"},
        "version": null,
        "params": null
    }))
    .expect("request");
    assert!(check(&request).expect("check").is_empty());
}

#[test]
fn check_echoes_the_supplied_version() {
    let raw = json!({"build_id": "3", "planned_cost": "1", "prior_cost": "2"});
    let versions = check(&request("TerraCost", Some(raw.clone()), json!({}))).expect("check");
    assert_eq!(versions.len(), 1);
    assert_eq!(serde_json::to_value(&versions[0]).expect("encode"), raw);
}

#[test]
fn check_gates_policy_versions() {
    let raw = json!({"build_id": "", "criticals": "1", "warnings": "0", "advisories": "0"});
    let err = check(&request("infrapolicy", Some(raw), json!({}))).expect_err("should fail");
    assert_eq!(err.exit_code(), EXIT_GATE_FAILURE);
}

#[test]
fn check_rejects_versions_of_another_feature() {
    let raw = json!({"build_id": "", "criticals": "0", "warnings": "0", "advisories": "0"});
    let err = check(&request("event", Some(raw), json!({}))).expect_err("should fail");
    assert_eq!(err.class(), ErrorClass::Decode);
}

#[test]
fn fetch_requires_a_version() {
    let err = fetch(&request("event", None, json!({}))).expect_err("should fail");
    assert!(matches!(err, ResourceError::MissingVersion));
    assert_eq!(err.class(), ErrorClass::Decode);
}

#[test]
fn fetch_returns_version_without_metadata() {
    let raw = json!({"build_id": "9"});
    let envelope = fetch(&request("event", Some(raw), json!({}))).expect("fetch");
    assert_eq!(envelope.version.build_id(), "9");
    assert!(envelope.metadata.is_empty());
}

#[rstest]
#[case(json!({"feature": "", "api_key": "k", "org": "o", "project": "p", "env": "e"}))]
#[case(json!({"feature": "terracost", "org": "o", "project": "p", "env": "e"}))]
#[case(json!({"feature": "terracost", "api_key": "k", "project": "p", "env": "e"}))]
#[case(json!({"feature": "event", "api_key": "k", "org": "o", "project": "p"}))]
#[case(json!({"feature": "infrapolicy", "api_key": "k", "org": "o", "env": "e"}))]
fn invalid_source_never_spawns(workdir: TempDir, #[case] source: serde_json::Value) {
    let request: Request = serde_json::from_value(json!({
        "source": source,
        "params": {"tfplan_path": "plan.json", "title": "t", "message": "m"}
    }))
    .expect("request");
    let executor = ScriptedExecutor::new()
        .replying(ToolAction::TerraCostEstimate, COST)
        .replying(ToolAction::EventCreate, "{}")
        .replying(ToolAction::InfraPolicyValidate, POLICY_CLEAN);

    let (result, _) = run_put(&executor, &request, workdir.path());

    assert_eq!(result.expect_err("should fail").class(), ErrorClass::Configuration);
    assert!(executor.calls().is_empty());
    assert!(!workdir.path().join(RAW_OUTPUT_FILE).exists());
}

#[rstest]
fn cost_put_writes_files_and_echoes_estimate(workdir: TempDir) {
    let executor = ScriptedExecutor::new().replying(ToolAction::TerraCostEstimate, COST);
    let request = request("terracost", None, json!({"tfplan_path": "plan.json"}));

    let (result, console) = run_put(&executor, &request, workdir.path());
    let envelope = result.expect("put");

    assert_eq!(
        envelope.metadata,
        vec![
            Metadata::new("planned_cost", "120.00"),
            Metadata::new("prior_cost", "100.00"),
        ]
    );
    assert_eq!(console, format!("{COST}\n"));
    assert_eq!(
        fs::read_to_string(workdir.path().join(RAW_OUTPUT_FILE)).expect("raw"),
        COST
    );
    let written = fs::read_to_string(workdir.path().join(ENVELOPE_FILE)).expect("envelope");
    assert_eq!(written, envelope.to_json().expect("encode"));
    assert_eq!(
        Envelope::decode(Feature::TerraCost, &written).expect("decode"),
        envelope
    );

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].working_dir(), Some(workdir.path()));
}

#[rstest]
fn tool_failure_writes_no_files(workdir: TempDir) {
    let executor =
        ScriptedExecutor::new().failing(ToolAction::TerraCostEstimate, "plan not found");
    let request = request("terracost", None, json!({"tfplan_path": "plan.json"}));

    let (result, console) = run_put(&executor, &request, workdir.path());
    let err = result.expect_err("should fail");

    assert_eq!(err.class(), ErrorClass::ExternalTool);
    assert!(err.to_string().contains("plan not found"));
    assert!(console.is_empty());
    assert!(!workdir.path().join(RAW_OUTPUT_FILE).exists());
    assert!(!workdir.path().join(ENVELOPE_FILE).exists());
}

#[rstest]
fn missing_plan_path_never_spawns(workdir: TempDir) {
    let executor = ScriptedExecutor::new().replying(ToolAction::InfraPolicyValidate, POLICY_CLEAN);
    let request = request("infrapolicy", None, json!({}));

    let (result, _) = run_put(&executor, &request, workdir.path());

    assert_eq!(result.expect_err("should fail").class(), ErrorClass::Configuration);
    assert!(executor.calls().is_empty());
}

#[rstest]
fn policy_put_reports_findings_without_gating(workdir: TempDir) {
    let executor = ScriptedExecutor::new().replying(ToolAction::InfraPolicyValidate, POLICY_BLOCKED);
    let request = request("infrapolicy", None, json!({"tfplan_path": "plan.json"}));

    let (result, console) = run_put(&executor, &request, workdir.path());
    let envelope = result.expect("put");

    assert_eq!(
        envelope.metadata,
        vec![Metadata::new("criticals", "public bucket\nopen port")]
    );
    assert!(console.is_empty());
    let err = gate::enforce(&envelope.version).expect_err("gate trips on fetch");
    assert_eq!(err.exit_code(), EXIT_GATE_FAILURE);
}

#[rstest]
fn policy_put_with_advisories_only_passes_the_gate(workdir: TempDir) {
    let executor = ScriptedExecutor::new().replying(ToolAction::InfraPolicyValidate, POLICY_CLEAN);
    let request = request("infrapolicy", None, json!({"tfplan_path": "plan.json"}));

    let (result, _) = run_put(&executor, &request, workdir.path());
    let envelope = result.expect("put");

    assert_eq!(
        envelope.metadata,
        vec![Metadata::new("advisories", "tag it\nname it\ndoc it")]
    );
    gate::enforce(&envelope.version).expect("gate passes");
}

#[rstest]
fn policy_put_can_append_a_cost_estimate(workdir: TempDir) {
    let executor = ScriptedExecutor::new()
        .replying(ToolAction::InfraPolicyValidate, POLICY_CLEAN)
        .replying(ToolAction::TerraCostEstimate, COST);
    let request = request(
        "infrapolicy",
        None,
        json!({"tfplan_path": "plan.json", "terracost": true}),
    );

    let (result, console) = run_put(&executor, &request, workdir.path());
    let envelope = result.expect("put");

    let names: Vec<&str> = envelope
        .metadata
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, ["advisories", "planned_cost", "prior_cost"]);
    assert_eq!(console, format!("{COST}\n"));
    assert_eq!(
        fs::read_to_string(workdir.path().join(RAW_OUTPUT_FILE)).expect("raw"),
        POLICY_CLEAN
    );
    let actions: Vec<ToolAction> = executor.calls().iter().map(|call| call.action()).collect();
    assert_eq!(
        actions,
        [ToolAction::InfraPolicyValidate, ToolAction::TerraCostEstimate]
    );
}

#[rstest]
fn event_put_records_the_title(workdir: TempDir) {
    let executor = ScriptedExecutor::new().replying(ToolAction::EventCreate, r#"{"id":1}"#);
    let request = request(
        "event",
        None,
        json!({"title": "Deployed", "message": "line one\nline two"}),
    );

    let (result, _) = run_put(&executor, &request, workdir.path());
    let envelope = result.expect("put");

    assert_eq!(envelope.version.build_id(), "42");
    assert_eq!(envelope.metadata, vec![Metadata::new("title", "Deployed")]);
    assert_eq!(
        fs::read_to_string(workdir.path().join(RAW_OUTPUT_FILE)).expect("raw"),
        r#"{"id":1}"#
    );
    let calls = executor.calls();
    let arguments = calls[0].arguments();
    let message = arguments
        .iter()
        .position(|argument| argument == "--message")
        .map(|index| arguments[index + 1].as_str());
    assert_eq!(message, Some("line one\\nline two"));
}

#[rstest]
fn malformed_tool_output_is_decode_error_after_raw_write(workdir: TempDir) {
    let executor = ScriptedExecutor::new().replying(ToolAction::InfraPolicyValidate, "not json");
    let request = request("infrapolicy", None, json!({"tfplan_path": "plan.json"}));

    let (result, _) = run_put(&executor, &request, workdir.path());

    assert_eq!(result.expect_err("should fail").class(), ErrorClass::Decode);
    assert!(workdir.path().join(RAW_OUTPUT_FILE).exists());
    assert!(!workdir.path().join(ENVELOPE_FILE).exists());
}
