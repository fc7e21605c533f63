/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout in the JSON output modes.
/// They are decoupled from the platform-facing `SpaceQuota` model.
use serde::{Deserialize, Serialize};

use crate::actor::ResolveError;
use crate::commands::CommandError;
use crate::quota::{OptionalQuantity, QuotaRow, SpaceQuota};
use crate::session::TargetError;

/// A resolved space quota.
///
/// Limits serialize as `null` (unset), `"unlimited"`, or an integer.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceQuotaOutput {
    pub name: String,
    pub guid: String,
    pub total_memory_in_mb: OptionalQuantity,
    pub instance_memory_in_mb: OptionalQuantity,
    pub total_routes: OptionalQuantity,
    pub total_service_instances: OptionalQuantity,
    pub paid_service_plans: bool,
    pub total_app_instances: OptionalQuantity,
    pub total_reserved_ports: OptionalQuantity,
    /// Human-readable rendering, in display order.
    pub display: Vec<DisplayRow>,
}

/// One `(label, text)` display pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayRow {
    pub label: String,
    pub text: String,
}

impl SpaceQuotaOutput {
    #[must_use]
    pub fn new(quota: &SpaceQuota, rows: &[QuotaRow]) -> Self {
        Self {
            name: quota.name.clone(),
            guid: quota.guid.clone(),
            total_memory_in_mb: quota.apps.total_memory,
            instance_memory_in_mb: quota.apps.instance_memory,
            total_routes: quota.routes.total_routes,
            total_service_instances: quota.services.total_service_instances,
            paid_service_plans: quota.services.paid_service_plans,
            total_app_instances: quota.apps.total_app_instances,
            total_reserved_ports: quota.routes.total_reserved_ports,
            display: rows
                .iter()
                .map(|r| DisplayRow {
                    label: r.label.to_owned(),
                    text: r.text.clone(),
                })
                .collect(),
        }
    }
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status, for errors reported by the platform API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorOutput {
    /// Construct from a `CommandError`.
    #[must_use]
    pub fn from_command_error(err: &CommandError) -> Self {
        let (code, status) = match err {
            CommandError::Target(TargetError::NotLoggedIn { .. }) => ("not_logged_in", None),
            CommandError::Target(TargetError::NoOrganizationTargeted { .. }) => {
                ("no_org_targeted", None)
            }
            CommandError::Target(TargetError::NoSpaceTargeted { .. }) => {
                ("no_space_targeted", None)
            }
            CommandError::Identity(_) => ("identity_error", None),
            CommandError::Resolve(ResolveError::NotFound { .. }) => {
                ("space_quota_not_found", None)
            }
            CommandError::Resolve(ResolveError::Remote { status, .. }) => {
                ("remote_error", Some(*status))
            }
            CommandError::Resolve(ResolveError::Transport(_)) => ("transport_error", None),
            CommandError::Resolve(ResolveError::Decode(_)) => ("decode_error", None),
            CommandError::Config(_) => ("config_error", None),
            CommandError::Io(_) => ("io_error", None),
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
                status,
            },
        }
    }
}
