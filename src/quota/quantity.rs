/// Optional numeric limits.
///
/// The platform API distinguishes three states for a limit:
/// - the field is absent from the document → [`OptionalQuantity::Unset`]
/// - the field is present with `null` → [`OptionalQuantity::Unlimited`]
/// - the field carries a non-negative integer → [`OptionalQuantity::Bounded`]
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A limit that may be unset, explicitly unlimited, or a concrete value.
///
/// Fields of this type must be declared with `#[serde(default)]` so that a
/// missing key decodes as `Unset` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionalQuantity {
    /// No limit configured.
    #[default]
    Unset,
    /// Explicitly no cap.
    Unlimited,
    /// A concrete, non-negative limit. Units depend on the field.
    Bounded(u64),
}

impl<'de> Deserialize<'de> for OptionalQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None => Ok(Self::Unlimited),
            Some(n) => u64::try_from(n)
                .map(Self::Bounded)
                .map_err(|_| D::Error::custom(format!("limit must be non-negative, got {n}"))),
        }
    }
}

/// Serialized as `null` (unset), `"unlimited"`, or the bounded integer.
impl Serialize for OptionalQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Unlimited => serializer.serialize_str("unlimited"),
            Self::Bounded(n) => serializer.serialize_u64(*n),
        }
    }
}
