/// Space quota domain layer: limit values, the resource model, display rules.
pub mod display;
pub mod model;
pub mod quantity;

pub use display::{QuotaRow, format_quota};
pub use model::SpaceQuota;
pub use quantity::OptionalQuantity;
