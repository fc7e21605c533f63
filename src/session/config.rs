/// Session configuration: the targeted organization/space and credentials.
///
/// The file is written by the login/target tooling and only read here.
/// Layout (JSON):
///
/// ```json
/// {
///   "api_endpoint": "https://api.example.com",
///   "access_token": "bearer eyJ...",
///   "user": { "name": "some-user" },
///   "organization": { "name": "some-org", "guid": "some-org-guid" },
///   "space": { "name": "some-space", "guid": "some-space-guid" },
///   "request_timeout_secs": 30,
///   "skip_ssl_validation": false
/// }
/// ```
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::ConfigError;

/// Binary name shown in user-facing hints.
pub const BINARY_NAME: &str = env!("CARGO_PKG_NAME");

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Read-only view of the current session.
pub trait Config {
    /// The targeted organization, if any.
    fn targeted_organization(&self) -> Option<Organization>;

    /// Name of the targeted organization, empty when none is targeted.
    fn targeted_organization_name(&self) -> String {
        self.targeted_organization()
            .map(|org| org.name)
            .unwrap_or_default()
    }

    /// The targeted space, if any.
    fn targeted_space(&self) -> Option<Space>;

    /// Access token for the platform API; `None` when logged out.
    fn access_token(&self) -> Option<&str>;

    /// Binary name used in error hints.
    fn binary_name(&self) -> &str {
        BINARY_NAME
    }
}

/// An organization reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub guid: String,
}

/// A space reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub name: String,
    pub guid: String,
}

/// The authenticated user as recorded at login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
}

/// File-backed session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the platform API.
    #[serde(default)]
    pub api_endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Space>,

    /// Per-request timeout for platform API calls.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Accept invalid TLS certificates from the platform API.
    #[serde(default)]
    pub skip_ssl_validation: bool,

    /// Where this configuration was loaded from.
    #[serde(skip)]
    source: Option<PathBuf>,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            access_token: None,
            user: None,
            organization: None,
            space: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            skip_ssl_validation: false,
            source: None,
        }
    }
}

impl SessionConfig {
    /// Load the session from `path`, or from the default location.
    ///
    /// A missing file yields an empty (logged-out) session.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed,
    /// or if no path was given and the config directory cannot be determined.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if path.exists() {
            Self::load_from_file(&path)
        } else {
            debug!(path = %path.display(), "no session file, using empty session");
            Ok(Self {
                source: Some(path),
                ..Self::default()
            })
        }
    }

    /// Load the session from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` or `ConfigError::Parse`.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), "loaded session file");
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// `<config_dir>/spacequota/config.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has no config directory.
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(BINARY_NAME).join("config.json"))
    }

    /// Path the session was loaded from.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Name of the logged-in user, if recorded.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.name.as_str())
            .filter(|name| !name.is_empty())
    }
}

impl Config for SessionConfig {
    fn targeted_organization(&self) -> Option<Organization> {
        self.organization
            .clone()
            .filter(|org| !org.guid.is_empty())
    }

    fn targeted_space(&self) -> Option<Space> {
        self.space.clone().filter(|space| !space.guid.is_empty())
    }

    fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}
