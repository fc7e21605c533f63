/// Errors from the session layer: target checks and session file loading.
use std::path::PathBuf;

use thiserror::Error;

/// A session precondition that is not met.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// No access token in the session.
    #[error("Not logged in. Use '{binary_name} login' to log in.")]
    NotLoggedIn {
        /// Binary name used in the hint.
        binary_name: String,
    },

    /// The command needs a targeted organization.
    #[error("No org targeted, use '{binary_name} target -o ORG' to target an org.")]
    NoOrganizationTargeted { binary_name: String },

    /// The command needs a targeted space.
    #[error("No space targeted, use '{binary_name} target -s SPACE' to target a space.")]
    NoSpaceTargeted { binary_name: String },
}

/// Failure reading the session file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No `--config` given and the platform config directory is unknown.
    #[error("Could not determine config directory")]
    NoConfigDir,
}
