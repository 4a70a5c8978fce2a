use crate::config::JobConfig;
use crate::error::Result;
use crate::user;
use std::sync::OnceLock;

/// Looks up the update user, given an explicit override if configured.
pub type UserResolver = fn(Option<&str>) -> Result<String>;

/// Per-process state shared by every invocation served from one
/// execution environment.
///
/// Built once, on first use, and kept for the life of the process. The
/// runner borrows it explicitly rather than reaching for globals. The update
/// user is resolved on first request, after the configuration file has been
/// ensured, and cached once found.
#[derive(Debug, Clone)]
pub struct JobRuntime {
    config: JobConfig,
    resolve_user: UserResolver,
    update_user: OnceLock<String>,
}

static RUNTIME: OnceLock<JobRuntime> = OnceLock::new();

impl JobRuntime {
    pub fn new(config: JobConfig) -> Self {
        Self::with_user_resolver(config, user::resolve)
    }

    pub fn with_user_resolver(config: JobConfig, resolve_user: UserResolver) -> Self {
        Self {
            config,
            resolve_user,
            update_user: OnceLock::new(),
        }
    }

    /// The process-wide runtime, created by `init` on first call.
    ///
    /// A failed `init` leaves the slot empty so a later call can retry.
    pub fn global<F>(init: F) -> Result<&'static JobRuntime>
    where
        F: FnOnce() -> Result<JobConfig>,
    {
        if let Some(rt) = RUNTIME.get() {
            return Ok(rt);
        }
        let rt = Self::new(init()?);
        tracing::debug!(mount_path = %rt.config.mount_path, "job runtime initialized");
        Ok(RUNTIME.get_or_init(|| rt))
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// The unprivileged account freshclam should switch to.
    ///
    /// A failed lookup is not cached.
    pub fn update_user(&self) -> Result<&str> {
        if let Some(name) = self.update_user.get() {
            return Ok(name);
        }
        let name = (self.resolve_user)(self.config.update_user.as_deref())?;
        Ok(self.update_user.get_or_init(|| name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;

    #[test]
    fn explicit_user_skips_lookup() {
        let mut config = JobConfig::new("/mnt/efs", "defs");
        config.update_user = Some("clamav".into());
        let rt = JobRuntime::new(config);
        assert_eq!(rt.update_user().unwrap(), "clamav");
        assert_eq!(rt.config().mount_path, "/mnt/efs");
    }

    #[test]
    fn failed_lookup_is_retried() {
        fn unknown(_: Option<&str>) -> Result<String> {
            Err(UpdateError::UserNotFound(4242))
        }
        let rt = JobRuntime::with_user_resolver(JobConfig::new("/mnt/efs", "defs"), unknown);
        assert!(matches!(rt.update_user(), Err(UpdateError::UserNotFound(4242))));
        assert!(matches!(rt.update_user(), Err(UpdateError::UserNotFound(4242))));
    }

    #[test]
    fn global_is_initialized_once() {
        let first = JobRuntime::global(|| {
            let mut c = JobConfig::new("/mnt/a", "defs");
            c.update_user = Some("first".into());
            Ok(c)
        })
        .unwrap();
        let second = JobRuntime::global(|| {
            let mut c = JobConfig::new("/mnt/b", "defs");
            c.update_user = Some("second".into());
            Ok(c)
        })
        .unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.update_user().unwrap(), "first");
    }
}
