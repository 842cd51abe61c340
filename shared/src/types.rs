//! Common types used across the platform

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};

/// Marker shown wherever a value could not be derived from the source data
pub const NOT_AVAILABLE: &str = "N/A";

/// Round an `f64` to a fixed number of decimal places.
///
/// Rounds the exact binary value half away from zero and pins the scale, so
/// `25.0` renders as `"25.0"` rather than `"25"`. Non-finite input never
/// panics: NaN becomes zero and infinities saturate.
pub fn round_to(value: f64, decimal_places: u32) -> Decimal {
    let exact = if value.is_nan() {
        Decimal::ZERO
    } else {
        Decimal::from_f64_retain(value).unwrap_or(if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    };

    let mut rounded =
        exact.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimal_places);
    rounded
}

/// Deserialize `null` as the type's default value
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapter for display ratios: `Some(d)` as a numeric string, `None` as `"N/A"`
pub mod ratio {
    use super::NOT_AVAILABLE;
    use rust_decimal::Decimal;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ratio) => serializer.serialize_str(&ratio.to_string()),
            None => serializer.serialize_str(NOT_AVAILABLE),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw == NOT_AVAILABLE {
            return Ok(None);
        }
        Decimal::from_str(&raw).map(Some).map_err(de::Error::custom)
    }
}
