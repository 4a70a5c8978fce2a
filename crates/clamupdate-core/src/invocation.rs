use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Caller-supplied metadata, used only to correlate log lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            function_name: None,
        }
    }

    pub fn with_function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }
}

/// One trigger of the job. The event is opaque and only ever logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub event: serde_json::Value,
    pub context: InvocationContext,
}

impl Invocation {
    pub fn new(event: serde_json::Value, context: InvocationContext) -> Self {
        Self { event, context }
    }

    /// An empty event with a generated request id.
    pub fn scheduled() -> Self {
        Self::new(serde_json::Value::Object(Default::default()), InvocationContext::default())
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSummary {
    pub request_id: String,
    pub definitions_dir: PathBuf,
    pub config_created: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    #[serde(skip)]
    pub output: String,
}
