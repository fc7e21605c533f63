/// Space quota resource as returned by the platform API (`/v3/space_quotas`).
use serde::Deserialize;

use super::quantity::OptionalQuantity;

/// A named set of limits scoped to a space within an organization.
///
/// A read-only snapshot of remote state at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpaceQuota {
    /// Quota name, unique within its organization.
    pub name: String,
    /// Platform identifier.
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub apps: AppLimits,
    #[serde(default)]
    pub services: ServiceLimits,
    #[serde(default)]
    pub routes: RouteLimits,
}

/// Application limits. Memory values are in megabytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppLimits {
    #[serde(default, rename = "total_memory_in_mb")]
    pub total_memory: OptionalQuantity,
    #[serde(default, rename = "per_process_memory_in_mb")]
    pub instance_memory: OptionalQuantity,
    #[serde(default, rename = "total_instances")]
    pub total_app_instances: OptionalQuantity,
}

/// Service limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceLimits {
    #[serde(default)]
    pub total_service_instances: OptionalQuantity,
    /// Whether paid service plans may be provisioned.
    #[serde(default, rename = "paid_services_allowed")]
    pub paid_service_plans: bool,
}

/// Route limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteLimits {
    #[serde(default)]
    pub total_routes: OptionalQuantity,
    #[serde(default)]
    pub total_reserved_ports: OptionalQuantity,
}
