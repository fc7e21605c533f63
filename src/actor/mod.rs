/// Platform actor: identity and space-quota lookups against the remote API.
pub mod client;
pub mod errors;

pub use client::PlatformActor;
pub use errors::{IdentityError, ResolveError};

use crate::quota::SpaceQuota;

/// Advisory messages returned alongside a platform call, in arrival order.
pub type Warnings = Vec<String>;

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

/// Platform operations needed by the quota command.
pub trait Actor {
    /// The current user, read fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` when no user can be determined.
    fn current_user(&self) -> Result<User, IdentityError>;

    /// Look up a space quota by name within an organization.
    ///
    /// Warnings are returned whether or not the lookup succeeds.
    fn get_space_quota_by_name(
        &self,
        name: &str,
        org_guid: &str,
    ) -> (Result<SpaceQuota, ResolveError>, Warnings);
}
