/// Session layer: targeted organization/space, credentials, precondition checks.
pub mod config;
pub mod errors;
pub mod gate;

pub use config::{Config, Organization, SessionConfig, Space};
pub use errors::{ConfigError, TargetError};
pub use gate::{SessionGate, SharedActor};
