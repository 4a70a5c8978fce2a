//! Single freshclam invocation against the shared definitions directory.
//!
//! [`handle`] logs the trigger event, then [`UpdateRunner::run`] makes sure
//! the configuration file exists, runs freshclam to completion, and turns
//! anything other than a zero exit into a [`FailureReport`]. There is no retry; the scheduler
//! re-triggers the job on its next interval.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::Utc;

use crate::error::{Result, UpdateError};
use crate::freshclam_conf;
use crate::invocation::{Invocation, UpdateSummary};
use crate::report::FailureReport;
use crate::runtime::JobRuntime;

/// Exit status and combined output of one freshclam process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Stdout and stderr as one stream, in write order, lossily decoded.
    pub output: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a non-zero or signalled exit into the matching error.
    pub fn into_result(self) -> Result<String> {
        if self.success() {
            return Ok(self.output);
        }
        match self.code {
            Some(code) => Err(UpdateError::ToolFailed {
                code,
                output: self.output,
            }),
            None => Err(UpdateError::ToolTerminated {
                output: self.output,
            }),
        }
    }
}

/// Log the trigger event verbatim. First thing every invocation does.
pub fn log_invocation(invocation: &Invocation) {
    let ctx = &invocation.context;
    tracing::info!(
        request_id = %ctx.request_id,
        function_name = ctx.function_name.as_deref().unwrap_or(""),
        event = %invocation.event,
        "invocation received"
    );
}

fn fail(err: UpdateError, request_id: &str) -> FailureReport {
    let report = FailureReport::from(err);
    report.log(request_id);
    report
}

/// Full handling of one trigger: log the event, obtain the runtime, run.
///
/// `runtime` is only called after the event has been logged, so setup
/// failures (missing variables) still leave the event in the logs.
pub fn handle<'r, F>(
    invocation: &Invocation,
    runtime: F,
) -> std::result::Result<UpdateSummary, FailureReport>
where
    F: FnOnce() -> Result<&'r JobRuntime>,
{
    log_invocation(invocation);
    let runtime = runtime().map_err(|e| fail(e, &invocation.context.request_id))?;
    UpdateRunner::new(runtime).run(invocation)
}

pub struct UpdateRunner<'a> {
    runtime: &'a JobRuntime,
}

impl<'a> UpdateRunner<'a> {
    pub fn new(runtime: &'a JobRuntime) -> Self {
        Self { runtime }
    }

    /// Ensure the configuration and run freshclam. The caller logs the
    /// event first (see [`handle`]).
    pub fn run(&self, invocation: &Invocation) -> std::result::Result<UpdateSummary, FailureReport> {
        self.update(invocation)
            .map_err(|e| fail(e, &invocation.context.request_id))
    }

    fn update(&self, invocation: &Invocation) -> Result<UpdateSummary> {
        let config = self.runtime.config();
        let started_at = Utc::now();
        let definitions_dir = config.definitions_dir();

        if !definitions_dir.is_dir() {
            tracing::warn!(
                path = %definitions_dir.display(),
                "definitions directory does not exist"
            );
        }

        let config_created = freshclam_conf::ensure(&config.config_file)?;
        let user = self.runtime.update_user()?;

        let output = run_freshclam(&config.freshclam, &config.config_file, user, &definitions_dir)?
            .into_result()?;

        tracing::debug!(output = %output, "freshclam output");
        let finished_at = Utc::now();
        tracing::info!(
            request_id = %invocation.context.request_id,
            path = %definitions_dir.display(),
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "definitions updated"
        );

        Ok(UpdateSummary {
            request_id: invocation.context.request_id.clone(),
            definitions_dir,
            config_created,
            started_at,
            finished_at,
            output,
        })
    }
}

/// Build the freshclam command line.
///
/// Arguments, in order: `--config-file=<conf>`, `--stdout`, `-u <user>`,
/// `--datadir=<dir>`.
pub fn build_command(program: &Path, config_file: &Path, user: &str, datadir: &Path) -> Command {
    let mut cmd = Command::new(program);
    cmd.arg(prefixed("--config-file=", config_file))
        .arg("--stdout")
        .arg("-u")
        .arg(user)
        .arg(prefixed("--datadir=", datadir));
    cmd
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path);
    arg
}

/// Resolve `tool` on `PATH` (or as a path) and run it to completion.
///
/// Stdout and stderr share one pipe, so the captured output keeps the order
/// in which the tool wrote it. Any failure to find, start or wait on the
/// process is a launch failure; the exit status is left for the caller.
pub fn run_freshclam(
    tool: &str,
    config_file: &Path,
    user: &str,
    datadir: &Path,
) -> Result<ToolOutput> {
    let spawn_failed = |e: &dyn std::fmt::Display| UpdateError::ToolSpawnFailed {
        tool: tool.to_string(),
        reason: e.to_string(),
    };

    let program: PathBuf = which::which(tool).map_err(|e| spawn_failed(&e))?;
    tracing::debug!(program = %program.display(), user, "launching freshclam");

    let (mut reader, writer) = std::io::pipe().map_err(|e| spawn_failed(&e))?;
    let stderr_writer = writer.try_clone().map_err(|e| spawn_failed(&e))?;

    let mut child = {
        let mut cmd = build_command(&program, config_file, user, datadir);
        cmd.stdin(Stdio::null()).stdout(writer).stderr(stderr_writer);
        // `cmd` owns the parent's write ends; dropping it lets the read hit EOF.
        cmd.spawn().map_err(|e| spawn_failed(&e))?
    };

    let mut raw = Vec::new();
    let read = reader.read_to_end(&mut raw);
    let status = child.wait().map_err(|e| spawn_failed(&e))?;
    read.map_err(|e| spawn_failed(&e))?;

    Ok(ToolOutput {
        code: status.code(),
        output: String::from_utf8_lossy(&raw).into_owned(),
    })
}
