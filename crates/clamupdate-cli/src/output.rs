use clamupdate_core::FailureReport;
use serde::Serialize;
use std::io::Write;

/// One line of `serve` output.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Succeeded {
        request_id: String,
    },
    Failed {
        request_id: String,
        #[serde(flatten)]
        report: FailureReport,
    },
}

impl InvocationOutcome {
    pub fn from_result(request_id: &str, result: Result<(), FailureReport>) -> Self {
        let request_id = request_id.to_string();
        match result {
            Ok(()) => Self::Succeeded { request_id },
            Err(report) => Self::Failed { request_id, report },
        }
    }
}

pub fn write_json_line<T: Serialize, W: Write>(out: &mut W, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(value)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succeeded_outcome_shape() {
        let outcome = InvocationOutcome::from_result("req-1", Ok(()));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "succeeded", "request_id": "req-1" })
        );
    }

    #[test]
    fn failed_outcome_flattens_report() {
        let outcome =
            InvocationOutcome::from_result("req-2", Err(FailureReport::new("disk full")));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["request_id"], "req-2");
        assert_eq!(json["source"], "serverless-clamscan-update");
        assert_eq!(json["message"], "disk full");
    }

    #[test]
    fn json_line_is_newline_terminated() {
        let mut buf = Vec::new();
        write_json_line(&mut buf, &serde_json::json!({ "a": 1 })).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"a\":1}\n");
    }
}
