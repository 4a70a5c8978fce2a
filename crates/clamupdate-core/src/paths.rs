use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Environment variable names
// ---------------------------------------------------------------------------

pub const ENV_MOUNT_PATH: &str = "EFS_MOUNT_PATH";
pub const ENV_DEF_PATH: &str = "EFS_DEF_PATH";
pub const ENV_CONFIG_FILE: &str = "CLAMUPDATE_CONFIG_FILE";
pub const ENV_FRESHCLAM: &str = "CLAMUPDATE_FRESHCLAM";
pub const ENV_USER: &str = "CLAMUPDATE_USER";

// ---------------------------------------------------------------------------
// Fixed locations
// ---------------------------------------------------------------------------

/// Ephemeral, local to the execution environment. Survives warm reuse only.
pub const DEFAULT_CONFIG_FILE: &str = "/tmp/freshclam.conf";
pub const DEFAULT_FRESHCLAM: &str = "freshclam";

/// Join the mount root and the definitions subpath with a single `/`.
///
/// This is a plain string join: an absolute `definitions_subpath` does not
/// replace the mount root the way `Path::join` would.
pub fn definitions_dir(mount_path: &str, definitions_subpath: &str) -> PathBuf {
    PathBuf::from(format!("{mount_path}/{definitions_subpath}"))
}

pub fn default_config_file() -> &'static Path {
    Path::new(DEFAULT_CONFIG_FILE)
}
