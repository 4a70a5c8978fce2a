use std::io::{BufRead, Write};

use clamupdate_core::{Invocation, InvocationContext, JobConfig};

use crate::output::{write_json_line, InvocationOutcome};

/// `clamupdate serve`: treat each non-empty stdin line as one trigger
/// event, reusing the same runtime for every invocation.
///
/// A failed invocation is reported on its own output line and does not stop
/// the loop.
pub fn run<F, R, W>(init: &F, input: R, out: &mut W) -> anyhow::Result<()>
where
    F: Fn() -> clamupdate_core::Result<JobConfig>,
    R: BufRead,
    W: Write,
{
    let mut handled = 0usize;
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let context = InvocationContext::default();
        let request_id = context.request_id.clone();
        let result = super::parse_event(trimmed, &request_id)
            .and_then(|event| super::invoke(init, &Invocation::new(event, context)));

        write_json_line(out, &InvocationOutcome::from_result(&request_id, result))?;
        handled += 1;
    }
    tracing::info!(invocations = handled, "input closed");
    Ok(())
}
