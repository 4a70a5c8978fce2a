use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("could not resolve a user name for uid {0}")]
    UserNotFound(u32),

    #[error("user lookup failed: {0}")]
    UserLookup(String),

    #[error("failed to launch {tool}: {reason}")]
    ToolSpawnFailed { tool: String, reason: String },

    #[error("FreshClam exited with unexpected code: {code}\nOutput: {output}")]
    ToolFailed { code: i32, output: String },

    #[error("FreshClam terminated by signal\nOutput: {output}")]
    ToolTerminated { output: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UpdateError>;
