//! Resolution of the unprivileged account freshclam should switch to.

use crate::error::{Result, UpdateError};
use nix::unistd::{getuid, User};

/// Name of the passwd entry for the current real uid.
pub fn current_user_name() -> Result<String> {
    let uid = getuid();
    match User::from_uid(uid) {
        Ok(Some(user)) => Ok(user.name),
        Ok(None) => Err(UpdateError::UserNotFound(uid.as_raw())),
        Err(e) => Err(UpdateError::UserLookup(e.to_string())),
    }
}

/// Use `explicit` when given, otherwise look up the current user.
pub fn resolve(explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(name) => Ok(name.to_string()),
        None => current_user_name(),
    }
}
