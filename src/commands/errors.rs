/// Command-level error: every failure a command can surface to the user.
use thiserror::Error;

use crate::actor::{IdentityError, ResolveError};
use crate::session::{ConfigError, TargetError};

/// Errors returned by command handlers.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A session precondition is not met.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// The current user could not be determined.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The space quota lookup failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The session file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing to stdout/stderr failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Exit code mapping for `CommandError` variants.
impl CommandError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Target(_) | Self::Identity(_) => 3,
            Self::Resolve(ResolveError::NotFound { .. }) => 4,
            Self::Resolve(_) => 5,
            Self::Config(_) | Self::Io(_) => 1,
        }
    }
}
