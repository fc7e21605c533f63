/// Errors from platform lookups.
use thiserror::Error;

/// Failure resolving a space quota.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No space quota with this name exists in the organization.
    #[error("Space quota with name '{name}' not found.")]
    NotFound {
        /// The searched quota name.
        name: String,
    },

    /// The platform answered with a non-success status.
    #[error("Platform API returned {status}: {detail}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Error detail from the response envelope, or the raw body.
        detail: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Request to platform API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not a valid space quota listing.
    #[error("Unexpected response from platform API: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure determining the current user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Not logged in.")]
    NotLoggedIn,

    /// Logged in, but the session does not record who.
    #[error("Current user is not recorded in the session.")]
    MissingUser,
}
