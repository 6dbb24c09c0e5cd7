//! Shared fixtures for crate-level tests.

use std::cell::RefCell;
use std::path::Path;

use cycloid_resource_invoker::{
    ToolAction, ToolError, ToolExecutor, ToolInvocation, ToolOutput,
};
use serde_json::{Value, json};

use crate::model::Request;

/// Replies per action with scripted stdout or a failure, recording calls.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    replies: Vec<(ToolAction, Result<Vec<u8>, String>)>,
    calls: RefCell<Vec<ToolInvocation>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn replying(mut self, action: ToolAction, stdout: &str) -> Self {
        self.replies.push((action, Ok(stdout.as_bytes().to_vec())));
        self
    }

    pub(crate) fn failing(mut self, action: ToolAction, stderr: &str) -> Self {
        self.replies.push((action, Err(stderr.to_owned())));
        self
    }

    pub(crate) fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.borrow().clone()
    }
}

impl ToolExecutor for ScriptedExecutor {
    fn execute(
        &self,
        _program: &Path,
        invocation: &ToolInvocation,
    ) -> Result<ToolOutput, ToolError> {
        self.calls.borrow_mut().push(invocation.clone());
        let reply = self
            .replies
            .iter()
            .find(|(action, _)| *action == invocation.action())
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Err(format!("no scripted reply for {}", invocation.action())));
        match reply {
            Ok(stdout) => Ok(ToolOutput::from_stdout(stdout)),
            Err(stderr) => Err(ToolError::from_exit(
                invocation.action(),
                Some(1),
                stderr.as_bytes(),
            )),
        }
    }
}

/// Builds a request for `feature` with a complete API-key source.
pub(crate) fn request(feature: &str, version: Option<Value>, params: Value) -> Request {
    serde_json::from_value(json!({
        "source": {
            "feature": feature,
            "api_key": "secret-key",
            "org": "acme",
            "project": "shop",
            "env": "prod"
        },
        "version": version,
        "params": params
    }))
    .expect("request fixture")
}
