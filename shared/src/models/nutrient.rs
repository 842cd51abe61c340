//! Per-100g nutrient profile models

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single nutrient amount, either reported or not available (NA).
///
/// Zero is a real measurement and never stands in for a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Nutrient {
    Present(f64),
    #[default]
    Absent,
}

impl Nutrient {
    /// Interpret a raw JSON value. Numbers and numeric strings are present;
    /// null, non-finite numbers and any other shape are NA.
    pub fn from_json(value: &Value) -> Self {
        let amount = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        };

        amount
            .filter(|amount| amount.is_finite())
            .map(Nutrient::Present)
            .unwrap_or(Nutrient::Absent)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Nutrient::Present(amount) => Some(*amount),
            Nutrient::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Nutrient::Absent)
    }
}

impl From<f64> for Nutrient {
    fn from(amount: f64) -> Self {
        if amount.is_finite() {
            Nutrient::Present(amount)
        } else {
            Nutrient::Absent
        }
    }
}

impl From<Option<f64>> for Nutrient {
    fn from(amount: Option<f64>) -> Self {
        amount.map(Nutrient::from).unwrap_or(Nutrient::Absent)
    }
}

impl Serialize for Nutrient {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Nutrient::Present(amount) => serializer.serialize_f64(*amount),
            Nutrient::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Nutrient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Nutrient::from_json(&raw))
    }
}

/// Nutrient amounts per 100g, keyed the way OpenFoodFacts reports `nutriments`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy in kcal
    #[serde(rename = "energy-kcal_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub energy_kcal: Nutrient,
    #[serde(rename = "sugars_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub sugars: Nutrient,
    /// Total fat; reported for context only, not scored
    #[serde(rename = "fat_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub fat: Nutrient,
    #[serde(rename = "saturated-fat_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub saturated_fat: Nutrient,
    #[serde(rename = "trans-fat_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub trans_fat: Nutrient,
    /// Sodium in grams
    #[serde(rename = "sodium_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub sodium: Nutrient,
    #[serde(rename = "fiber_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub fiber: Nutrient,
    #[serde(rename = "proteins_100g", default, skip_serializing_if = "Nutrient::is_absent")]
    pub proteins: Nutrient,
}

impl NutrientProfile {
    /// Energy used as the denominator for energy shares. Missing energy counts as 0.
    pub fn total_kcal(&self) -> f64 {
        self.energy_kcal.value().unwrap_or(0.0)
    }

    /// Zero-calorie products (e.g. water) get full fiber and protein credit
    pub fn is_zero_calorie(&self) -> bool {
        self.total_kcal() == 0.0
    }
}
