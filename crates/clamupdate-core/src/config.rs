use crate::error::{Result, UpdateError};
use crate::paths;
use std::path::PathBuf;

/// Everything the job needs to know before it can run an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub mount_path: String,
    pub definitions_subpath: String,
    pub config_file: PathBuf,
    pub freshclam: String,
    /// Explicit update user. `None` means resolve from the current uid.
    pub update_user: Option<String>,
}

impl JobConfig {
    pub fn new(mount_path: impl Into<String>, definitions_subpath: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            definitions_subpath: definitions_subpath.into(),
            config_file: paths::default_config_file().to_path_buf(),
            freshclam: paths::DEFAULT_FRESHCLAM.to_string(),
            update_user: None,
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset for the optional overrides but are
    /// accepted for the two required variables, which are joined verbatim.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mount_path =
            lookup(paths::ENV_MOUNT_PATH).ok_or(UpdateError::MissingEnv(paths::ENV_MOUNT_PATH))?;
        let definitions_subpath =
            lookup(paths::ENV_DEF_PATH).ok_or(UpdateError::MissingEnv(paths::ENV_DEF_PATH))?;

        let mut config = Self::new(mount_path, definitions_subpath);
        if let Some(file) = non_empty(lookup(paths::ENV_CONFIG_FILE)) {
            config.config_file = PathBuf::from(file);
        }
        if let Some(bin) = non_empty(lookup(paths::ENV_FRESHCLAM)) {
            config.freshclam = bin;
        }
        config.update_user = non_empty(lookup(paths::ENV_USER));
        Ok(config)
    }

    pub fn definitions_dir(&self) -> PathBuf {
        paths::definitions_dir(&self.mount_path, &self.definitions_subpath)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
