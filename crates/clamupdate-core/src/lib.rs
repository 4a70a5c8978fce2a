//! `clamupdate-core`: refresh a shared virus-definition directory with
//! `freshclam`.
//!
//! ```text
//! JobConfig ──► JobRuntime (once per process)
//!                   │
//!                   ▼
//! Invocation ──► runner::handle             (log event, then get runtime)
//!                   │
//!                   ▼
//!               UpdateRunner::run
//!                   ├─ freshclam_conf::ensure   (write default conf if absent)
//!                   ├─ JobRuntime::update_user  (resolve non-root account)
//!                   ├─ runner::run_freshclam    (one child process, awaited)
//!                   └─ FailureReport            (on any error)
//! ```

pub mod config;
pub mod error;
pub mod freshclam_conf;
pub mod invocation;
pub mod paths;
pub mod report;
pub mod runner;
pub mod runtime;
pub mod user;

pub use config::JobConfig;
pub use error::{Result, UpdateError};
pub use invocation::{Invocation, InvocationContext, UpdateSummary};
pub use report::FailureReport;
pub use runner::{handle, UpdateRunner};
pub use runtime::JobRuntime;
