//! Display model for a scored product
//!
//! Turns a [`Product`] and its [`ScoreReport`] into ready-to-render text,
//! progress bars and a verdict. Clients only lay this out.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    HealthRating, Nutrient, NutrientKind, NutrientProfile, Product, ScoreReport, SubScore,
};
use crate::types::NOT_AVAILABLE;

/// Progress bar color for a sub-score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Red,
    Orange,
    Green,
}

impl BarColor {
    /// Red below 5 points, orange below 15, green otherwise
    pub fn for_score(value: Decimal) -> Self {
        if value < Decimal::from(5) {
            BarColor::Red
        } else if value < Decimal::from(15) {
            BarColor::Orange
        } else {
            BarColor::Green
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BarColor::Red => "red",
            BarColor::Orange => "orange",
            BarColor::Green => "green",
        }
    }
}

/// One rendered nutrient row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutrientLine {
    pub nutrient: NutrientKind,
    pub label: String,
    /// Amount per 100g with unit, e.g. `"12.5 g/100g"`
    pub amount: String,
    /// Energy share or density with unit, e.g. `"10.0% energy"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,
    pub score: Decimal,
    pub bar_width_percent: Decimal,
    pub bar_color: BarColor,
}

/// Rating shown for the product, or why none is shown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Rated {
        rating: HealthRating,
        label: String,
        color: String,
    },
    InsufficientData {
        missing: u8,
        message: String,
    },
}

impl Verdict {
    pub fn from_report(report: &ScoreReport) -> Self {
        match report.rating() {
            Some(rating) => Verdict::Rated {
                rating,
                label: rating.label().to_string(),
                color: rating.color().to_string(),
            },
            None => Verdict::InsufficientData {
                missing: report.na_count,
                message: format!(
                    "Product not available - Insufficient nutrient information ({} nutrients missing)",
                    report.na_count
                ),
            },
        }
    }
}

/// Everything needed to render one scanned product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub product_name: String,
    pub energy: String,
    pub nutri_score: String,
    /// Empty when the verdict is insufficient data
    pub nutrients: Vec<NutrientLine>,
    pub total_score: Decimal,
    pub verdict: Verdict,
}

impl ProductSummary {
    pub fn build(product: &Product, report: &ScoreReport) -> Self {
        let verdict = Verdict::from_report(report);
        let nutrients = match verdict {
            Verdict::Rated { .. } => NutrientKind::ALL
                .iter()
                .map(|kind| nutrient_line(&product.nutriments, report.get(*kind)))
                .collect(),
            Verdict::InsufficientData { .. } => Vec::new(),
        };

        Self {
            product_name: product.name().unwrap_or("Unknown Product").to_string(),
            energy: match product.nutriments.energy_kcal {
                Nutrient::Present(kcal) => format!("{} kcal/100g", kcal),
                Nutrient::Absent => NOT_AVAILABLE.to_string(),
            },
            nutri_score: product
                .nutrition_grades
                .as_deref()
                .filter(|grade| !grade.is_empty())
                .map(str::to_uppercase)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            nutrients,
            total_score: report.total_score,
            verdict,
        }
    }
}

fn amount_text(profile: &NutrientProfile, kind: NutrientKind) -> String {
    let amount = match kind {
        NutrientKind::Sugars => profile.sugars,
        NutrientKind::SaturatedFat => profile.saturated_fat,
        NutrientKind::TransFat => profile.trans_fat,
        NutrientKind::Sodium => profile.sodium,
        NutrientKind::Fiber => profile.fiber,
        NutrientKind::Proteins => profile.proteins,
    };

    match (amount, kind) {
        (Nutrient::Absent, _) => NOT_AVAILABLE.to_string(),
        (Nutrient::Present(grams), NutrientKind::Sodium) => {
            format!("{} mg/100g", grams * 1000.0)
        }
        (Nutrient::Present(grams), _) => format!("{} g/100g", grams),
    }
}

fn nutrient_line(profile: &NutrientProfile, sub_score: &SubScore) -> NutrientLine {
    let kind = sub_score.nutrient;
    let ratio = kind.ratio_unit().map(|unit| match sub_score.ratio {
        Some(ratio) if unit.starts_with('%') => format!("{}{}", ratio, unit),
        Some(ratio) => format!("{} {}", ratio, unit),
        None => NOT_AVAILABLE.to_string(),
    });

    NutrientLine {
        nutrient: kind,
        label: kind.label().to_string(),
        amount: amount_text(profile, kind),
        ratio,
        score: sub_score.value,
        bar_width_percent: sub_score.value * Decimal::from(4),
        bar_color: BarColor::for_score(sub_score.value),
    }
}
