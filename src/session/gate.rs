/// Session precondition checks run before any platform call.
use tracing::debug;

use super::config::Config;
use super::errors::TargetError;

/// Capabilities shared by every command.
pub trait SharedActor {
    /// Verify the session is logged in and, when required, has a targeted
    /// organization and/or space.
    ///
    /// # Errors
    ///
    /// Returns the first unmet precondition, checked in the order
    /// logged in → organization → space.
    fn check_target(&self, require_org: bool, require_space: bool) -> Result<(), TargetError>;
}

/// `SharedActor` backed by the session configuration.
pub struct SessionGate<'a, C> {
    config: &'a C,
}

impl<'a, C: Config> SessionGate<'a, C> {
    #[must_use]
    pub fn new(config: &'a C) -> Self {
        Self { config }
    }
}

impl<C: Config> SharedActor for SessionGate<'_, C> {
    fn check_target(&self, require_org: bool, require_space: bool) -> Result<(), TargetError> {
        let binary_name = self.config.binary_name().to_owned();

        if self.config.access_token().is_none() {
            return Err(TargetError::NotLoggedIn { binary_name });
        }

        if require_org && self.config.targeted_organization().is_none() {
            return Err(TargetError::NoOrganizationTargeted { binary_name });
        }

        if require_space {
            let Some(space) = self.config.targeted_space() else {
                return Err(TargetError::NoSpaceTargeted { binary_name });
            };
            debug!(space = %space.name, "space targeted");
        }

        Ok(())
    }
}
