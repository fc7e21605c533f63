/// Render a resolved space quota as ordered `(label, text)` rows.
///
/// Row order is fixed and independent of which limits are set:
///
/// 1. total memory
/// 2. instance memory
/// 3. routes
/// 4. service instances
/// 5. paid service plans
/// 6. app instances
/// 7. route ports
///
/// Consumers (table and JSON renderers) rely on this order.
use super::model::SpaceQuota;
use super::quantity::OptionalQuantity;

/// Text for an explicitly uncapped limit.
pub const UNLIMITED: &str = "unlimited";

const MEGABYTES_PER_GIGABYTE: u64 = 1024;

/// One rendered quota field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRow {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
enum Unit {
    Megabytes,
    Count,
}

/// How a single row is read from the quota and rendered.
enum Field {
    Limit {
        label: &'static str,
        unit: Unit,
        /// Text shown when the platform reports no limit configured.
        unset: &'static str,
        get: fn(&SpaceQuota) -> OptionalQuantity,
    },
    Flag {
        label: &'static str,
        get: fn(&SpaceQuota) -> bool,
    },
}

// An absent limit carries no cap on the platform, so every field renders
// `Unset` the same as `Unlimited`.
const FIELDS: [Field; 7] = [
    Field::Limit {
        label: "total memory",
        unit: Unit::Megabytes,
        unset: UNLIMITED,
        get: |q| q.apps.total_memory,
    },
    Field::Limit {
        label: "instance memory",
        unit: Unit::Megabytes,
        unset: UNLIMITED,
        get: |q| q.apps.instance_memory,
    },
    Field::Limit {
        label: "routes",
        unit: Unit::Count,
        unset: UNLIMITED,
        get: |q| q.routes.total_routes,
    },
    Field::Limit {
        label: "service instances",
        unit: Unit::Count,
        unset: UNLIMITED,
        get: |q| q.services.total_service_instances,
    },
    Field::Flag {
        label: "paid service plans",
        get: |q| q.services.paid_service_plans,
    },
    Field::Limit {
        label: "app instances",
        unit: Unit::Count,
        unset: UNLIMITED,
        get: |q| q.apps.total_app_instances,
    },
    Field::Limit {
        label: "route ports",
        unit: Unit::Count,
        unset: UNLIMITED,
        get: |q| q.routes.total_reserved_ports,
    },
];

/// Format every quota field in display order.
#[must_use]
pub fn format_quota(quota: &SpaceQuota) -> Vec<QuotaRow> {
    FIELDS
        .iter()
        .map(|field| match field {
            Field::Limit {
                label,
                unit,
                unset,
                get,
            } => QuotaRow {
                label: *label,
                text: format_limit(get(quota), *unit, unset),
            },
            Field::Flag { label, get } => QuotaRow {
                label: *label,
                text: format_allowed(get(quota)).to_owned(),
            },
        })
        .collect()
}

fn format_limit(value: OptionalQuantity, unit: Unit, unset: &str) -> String {
    match value {
        OptionalQuantity::Unset => unset.to_owned(),
        OptionalQuantity::Unlimited => UNLIMITED.to_owned(),
        OptionalQuantity::Bounded(n) => match unit {
            Unit::Megabytes => format_megabytes(n),
            Unit::Count => n.to_string(),
        },
    }
}

/// Render a megabyte amount in the largest unit that represents it exactly.
///
/// Promotes to gigabytes only when the value is an exact multiple of 1024.
#[must_use]
pub fn format_megabytes(megabytes: u64) -> String {
    if megabytes == 0 {
        "0".to_owned()
    } else if megabytes % MEGABYTES_PER_GIGABYTE == 0 {
        format!("{}G", megabytes / MEGABYTES_PER_GIGABYTE)
    } else {
        format!("{megabytes}M")
    }
}

#[must_use]
fn format_allowed(allowed: bool) -> &'static str {
    if allowed { "allowed" } else { "disallowed" }
}
