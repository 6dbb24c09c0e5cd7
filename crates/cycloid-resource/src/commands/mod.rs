//! Argument vectors for each Cycloid CLI sub-action.
//!
//! Flag order follows what the CLI documents for each action. Every
//! invocation requests `-o json` and carries the credential in its
//! environment.

use std::collections::BTreeMap;
use std::path::Path;

use cycloid_resource_invoker::{ToolAction, ToolInvocation};

use crate::error::ResourceError;
use crate::model::{Feature, Params};
use crate::validate::ValidatedSource;
use crate::vars::{self, Variables};

/// Event type used when the step does not set one.
pub const DEFAULT_EVENT_TYPE: &str = "Custom";

/// Starts an invocation for `action` carrying the source credential.
fn authenticated(source: &ValidatedSource, action: ToolAction) -> ToolInvocation {
    source
        .credential
        .environment()
        .into_iter()
        .fold(ToolInvocation::new(action), |invocation, (key, value)| {
            invocation.env(key, value)
        })
}

/// Returns the plan path, rejecting a blank one.
///
/// # Errors
///
/// Returns [`ResourceError::Configuration`] when `tfplan_path` is blank.
pub fn require_plan_path(params: &Params, feature: Feature) -> Result<&str, ResourceError> {
    let plan = params.tfplan_path.trim();
    if plan.is_empty() {
        return Err(ResourceError::configuration(format!(
            "'tfplan_path' parameter is required by the {feature} feature"
        )));
    }
    Ok(plan)
}

/// `cy infrapolicy validate` for a Terraform plan.
#[must_use]
pub fn policy_invocation(source: &ValidatedSource, plan_path: &str) -> ToolInvocation {
    authenticated(source, ToolAction::InfraPolicyValidate)
        .flag("--org", source.org.as_str())
        .flag("--api-url", source.api_url.as_str())
        .flag("--env", source.env.as_str())
        .flag("--project", source.project.as_str())
        .flag("--plan-path", plan_path)
        .json_output()
}

/// `cy terracost estimate` for a Terraform plan.
#[must_use]
pub fn cost_invocation(source: &ValidatedSource, plan_path: &str) -> ToolInvocation {
    authenticated(source, ToolAction::TerraCostEstimate)
        .flag("--org", source.org.as_str())
        .flag("--plan-path", plan_path)
        .flag("--api-url", source.api_url.as_str())
        .json_output()
}

/// Event fields after validation, file loading and substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    /// Substituted title.
    pub title: String,
    /// Substituted message, not yet shell-sanitised.
    pub message: String,
    /// Event type.
    pub event_type: String,
    /// Optional severity.
    pub severity: String,
    /// Optional icon.
    pub icon: String,
    /// Tags, including the project and environment defaults.
    pub tags: BTreeMap<String, String>,
}

impl EventRequest {
    /// Builds the event from step params.
    ///
    /// `message_file` and `yaml_vars_file` are resolved against `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Configuration`] when the title or message is
    /// missing, and a read error when a referenced file cannot be loaded.
    pub fn prepare(
        source: &ValidatedSource,
        params: &Params,
        directory: &Path,
    ) -> Result<Self, ResourceError> {
        if params.title.trim().is_empty() {
            return Err(ResourceError::configuration(
                "'title' parameter is missing",
            ));
        }
        if params.message.is_empty() && params.message_file.trim().is_empty() {
            return Err(ResourceError::configuration(
                "'message' or 'message_file' parameter is missing",
            ));
        }

        let message = if params.message_file.trim().is_empty() {
            params.message.clone()
        } else {
            vars::read_text_file(&vars::resolve_path(directory, params.message_file.trim()))?
        };

        let variables = if params.yaml_vars_file.trim().is_empty() {
            Variables::new()
        } else {
            vars::load_vars_file(&vars::resolve_path(
                directory,
                params.yaml_vars_file.trim(),
            ))?
        };

        let event_type = if params.event_type.trim().is_empty() {
            DEFAULT_EVENT_TYPE.to_owned()
        } else {
            params.event_type.clone()
        };

        Ok(Self {
            title: vars::substitute(&params.title, &variables),
            message: vars::substitute(&message, &variables),
            event_type,
            severity: params.severity.clone(),
            icon: params.icon.clone(),
            tags: default_tags(source, &params.tags),
        })
    }
}

/// Adds the scope tags the console relies on, without overriding the user's.
fn default_tags(
    source: &ValidatedSource,
    tags: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = tags.clone();
    for (name, value) in [
        ("project", &source.project),
        ("env", &source.env),
        ("project_canonical", &source.project),
        ("environment_canonical", &source.env),
    ] {
        merged
            .entry(name.to_owned())
            .or_insert_with(|| value.clone());
    }
    merged
}

/// `cy event create` for a prepared event.
#[must_use]
pub fn event_invocation(source: &ValidatedSource, event: &EventRequest) -> ToolInvocation {
    let mut invocation = authenticated(source, ToolAction::EventCreate)
        .flag("--org", source.org.as_str())
        .flag("--title", event.title.as_str())
        .flag("--message", shell_safe(&event.message))
        .flag("--type", event.event_type.as_str())
        .flag("--api-url", source.api_url.as_str())
        .json_output();
    for (name, value) in &event.tags {
        invocation = invocation.flag("--tag", format!("{name}={value}"));
    }
    if !event.severity.is_empty() {
        invocation = invocation.flag("--severity", event.severity.as_str());
    }
    if !event.icon.is_empty() {
        invocation = invocation.flag("--icon", event.icon.as_str());
    }
    invocation
}

/// Neutralises the characters the CLI's shell-based message handling trips
/// on: backslashes and backticks are escaped, newlines become a literal `\n`.
///
/// Nothing else is touched.
#[must_use]
pub fn shell_safe(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for character in message.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '`' => escaped.push_str("\\`"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
