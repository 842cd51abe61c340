//! Nutrient score report models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rating::{rate_health, HealthRating};

/// Nutrients that earn a sub-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKind {
    Sugars,
    SaturatedFat,
    TransFat,
    Sodium,
    Fiber,
    Proteins,
}

impl NutrientKind {
    pub const ALL: [NutrientKind; 6] = [
        NutrientKind::Sugars,
        NutrientKind::SaturatedFat,
        NutrientKind::TransFat,
        NutrientKind::Sodium,
        NutrientKind::Fiber,
        NutrientKind::Proteins,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NutrientKind::Sugars => "Sugars",
            NutrientKind::SaturatedFat => "Saturated Fat",
            NutrientKind::TransFat => "Trans Fat",
            NutrientKind::Sodium => "Sodium",
            NutrientKind::Fiber => "Fiber",
            NutrientKind::Proteins => "Proteins",
        }
    }

    /// Unit of the display ratio, if the nutrient has one
    pub fn ratio_unit(&self) -> Option<&'static str> {
        match self {
            NutrientKind::Sodium => Some("mg/kcal"),
            NutrientKind::Fiber => None,
            _ => Some("% energy"),
        }
    }
}

impl std::fmt::Display for NutrientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Score for a single nutrient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub nutrient: NutrientKind,
    /// 0-25, one decimal place
    pub value: Decimal,
    pub not_available: bool,
    /// Percent of energy (mg/kcal for sodium), for display only
    #[serde(with = "crate::types::ratio")]
    pub ratio: Option<Decimal>,
}

impl SubScore {
    pub fn not_available(nutrient: NutrientKind) -> Self {
        Self {
            nutrient,
            value: crate::types::round_to(0.0, 1),
            not_available: true,
            ratio: None,
        }
    }
}

/// More than this many missing nutrients and no rating is shown
pub const MAX_MISSING_NUTRIENTS: u8 = 3;

/// Check whether enough nutrients were reported to rate a product
pub fn has_sufficient_data(na_count: u8) -> bool {
    na_count <= MAX_MISSING_NUTRIENTS
}

/// Complete scoring result for one nutrient profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub sugars: SubScore,
    pub saturated_fat: SubScore,
    pub trans_fat: SubScore,
    pub sodium: SubScore,
    pub fiber: SubScore,
    pub proteins: SubScore,
    /// 0-100, one decimal place
    pub total_score: Decimal,
    pub total_kcal: f64,
    pub na_count: u8,
}

impl ScoreReport {
    /// Sub-scores in canonical order
    pub fn sub_scores(&self) -> [&SubScore; 6] {
        [
            &self.sugars,
            &self.saturated_fat,
            &self.trans_fat,
            &self.sodium,
            &self.fiber,
            &self.proteins,
        ]
    }

    pub fn get(&self, nutrient: NutrientKind) -> &SubScore {
        match nutrient {
            NutrientKind::Sugars => &self.sugars,
            NutrientKind::SaturatedFat => &self.saturated_fat,
            NutrientKind::TransFat => &self.trans_fat,
            NutrientKind::Sodium => &self.sodium,
            NutrientKind::Fiber => &self.fiber,
            NutrientKind::Proteins => &self.proteins,
        }
    }

    pub fn has_sufficient_data(&self) -> bool {
        has_sufficient_data(self.na_count)
    }

    /// Health rating, or `None` when too many nutrients are missing
    pub fn rating(&self) -> Option<HealthRating> {
        self.has_sufficient_data()
            .then(|| rate_health(self.total_score))
    }
}
