pub mod run;
pub mod serve;

use clamupdate_core::{handle, FailureReport, Invocation, JobConfig, JobRuntime};

/// Handle one invocation against the process-wide runtime.
///
/// The event is logged before the runtime is built, and runtime setup
/// failures (missing variables) are reported the same way as update
/// failures.
pub fn invoke<F>(init: &F, invocation: &Invocation) -> Result<(), FailureReport>
where
    F: Fn() -> clamupdate_core::Result<JobConfig>,
{
    handle(invocation, || JobRuntime::global(init)).map(|_| ())
}

/// Parse a raw trigger event. Malformed input becomes a logged report.
pub fn parse_event(raw: &str, request_id: &str) -> Result<serde_json::Value, FailureReport> {
    serde_json::from_str(raw).map_err(|e| {
        let report = FailureReport::new(format!("invalid event: {e}"));
        report.log(request_id);
        report
    })
}
