//! Structured failure payload handed to the host's log and alerting pipeline.

use crate::error::UpdateError;
use serde::{Deserialize, Serialize};

/// Fixed tag identifying this job in alerts.
pub const SOURCE: &str = "serverless-clamscan-update";

/// The only failure signal this job emits.
///
/// Keeps `source` and `message` as real fields; serialization happens at the
/// edge of the process, not inside an error string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub source: String,
    pub message: String,
}

impl FailureReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            source: SOURCE.to_string(),
            message: message.into(),
        }
    }

    /// Compact single-line JSON.
    pub fn to_json(&self) -> String {
        // Two string fields cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"source":"{SOURCE}","message":"unserializable failure report"}}"#)
        })
    }

    /// Emit the report as an error-level log event.
    pub fn log(&self, request_id: &str) {
        tracing::error!(request_id, source = %self.source, "{}", self.message);
    }
}

impl From<UpdateError> for FailureReport {
    fn from(err: UpdateError) -> Self {
        Self::new(err.to_string())
    }
}

impl std::fmt::Display for FailureReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_json())
    }
}

impl std::error::Error for FailureReport {}
