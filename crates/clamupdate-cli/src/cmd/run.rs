use clamupdate_core::{FailureReport, Invocation, InvocationContext, JobConfig};

/// `clamupdate run`: one update. Prints the failure report on stdout and
/// returns it as the error; prints nothing on success.
pub fn run<F>(init: &F, event: Option<&str>, context: InvocationContext) -> anyhow::Result<()>
where
    F: Fn() -> clamupdate_core::Result<JobConfig>,
{
    let result = match event {
        Some(raw) => super::parse_event(raw, &context.request_id),
        None => Ok(serde_json::json!({})),
    }
    .and_then(|event| super::invoke(init, &Invocation::new(event, context)));

    result.map_err(|report: FailureReport| {
        println!("{}", report.to_json());
        anyhow::Error::new(report)
    })
}
