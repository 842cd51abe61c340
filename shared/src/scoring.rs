//! Nutrient scoring (FSSAI-style thresholds)
//!
//! Six nutrients each earn 0-25 points from a piecewise-linear rule. The
//! average of the six, scaled to 0-100, is the total score, minus an extra
//! penalty for products whose sugars exceed 20% of energy.
//!
//! A nutrient that is not available scores 0 and still counts toward the
//! average, so incomplete data is scored as the worst case.

use rust_decimal::prelude::ToPrimitive;

use crate::models::{Nutrient, NutrientKind, NutrientProfile, ScoreReport, SubScore};
use crate::types::round_to;

pub const SUGAR_KCAL_PER_GRAM: f64 = 4.0;
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

pub const MAX_SUB_SCORE: f64 = 25.0;
pub const MAX_TOTAL_SCORE: f64 = 100.0;

/// Sugars above this share of energy add a penalty to the total
pub const SUGAR_PENALTY_THRESHOLD_PERCENT: f64 = 20.0;
/// Points removed from the total per percent of energy above the threshold
pub const SUGAR_PENALTY_PER_PERCENT: f64 = 0.5;

/// Share of total energy contributed by a nutrient, in percent.
/// Zero when the product has no (or negative) energy.
pub fn percent_of_energy(grams: f64, kcal_per_gram: f64, total_kcal: f64) -> f64 {
    if total_kcal > 0.0 {
        (grams * kcal_per_gram / total_kcal) * 100.0
    } else {
        0.0
    }
}

/// Sodium density in mg per kcal
pub fn sodium_mg_per_kcal(sodium_grams: f64, total_kcal: f64) -> f64 {
    if total_kcal > 0.0 {
        sodium_grams * 1000.0 / total_kcal
    } else {
        0.0
    }
}

/// Full points up to 5% energy, falling linearly to 0 at 20%
pub fn sugars_points(percent_energy: f64) -> f64 {
    if percent_energy <= 5.0 {
        MAX_SUB_SCORE
    } else if percent_energy <= 20.0 {
        MAX_SUB_SCORE - (percent_energy - 5.0) * (25.0 / 15.0)
    } else {
        0.0
    }
}

pub fn saturated_fat_points(percent_energy: f64) -> f64 {
    if percent_energy <= 5.0 {
        MAX_SUB_SCORE
    } else if percent_energy <= 20.0 {
        MAX_SUB_SCORE - (percent_energy - 5.0) * (5.0 / 3.0)
    } else {
        0.0
    }
}

/// Only a trans fat share of exactly zero earns full points
pub fn trans_fat_points(percent_energy: f64) -> f64 {
    if percent_energy == 0.0 {
        MAX_SUB_SCORE
    } else if percent_energy <= 5.0 {
        MAX_SUB_SCORE - percent_energy * 5.0
    } else {
        0.0
    }
}

pub fn sodium_points(mg_per_kcal: f64) -> f64 {
    if mg_per_kcal <= 0.5 {
        MAX_SUB_SCORE
    } else if mg_per_kcal <= 2.0 {
        MAX_SUB_SCORE - (mg_per_kcal - 0.5) * (50.0 / 3.0)
    } else {
        0.0
    }
}

/// Fiber is scored on absolute grams: 3g/100g or more earns full points
pub fn fiber_points(grams: f64, zero_calorie: bool) -> f64 {
    if zero_calorie || grams >= 3.0 {
        MAX_SUB_SCORE
    } else {
        MAX_SUB_SCORE - (3.0 - grams) * (25.0 / 3.0)
    }
}

pub fn protein_points(percent_energy: f64, zero_calorie: bool) -> f64 {
    if zero_calorie || percent_energy >= 10.0 {
        MAX_SUB_SCORE
    } else {
        MAX_SUB_SCORE - (10.0 - percent_energy) * (5.0 / 2.0)
    }
}

/// Clamp raw points to 0-25 and round to one decimal
fn finish(nutrient: NutrientKind, raw_points: f64, ratio: Option<f64>, ratio_places: u32) -> SubScore {
    SubScore {
        nutrient,
        value: round_to(raw_points.clamp(0.0, MAX_SUB_SCORE), 1),
        not_available: false,
        ratio: ratio.map(|ratio| round_to(ratio, ratio_places)),
    }
}

/// Score a nutrient by its share of energy
fn score_energy_share(
    nutrient: NutrientKind,
    grams: Nutrient,
    kcal_per_gram: f64,
    total_kcal: f64,
    points: impl Fn(f64) -> f64,
) -> SubScore {
    match grams {
        Nutrient::Absent => SubScore::not_available(nutrient),
        Nutrient::Present(grams) => {
            let share = percent_of_energy(grams, kcal_per_gram, total_kcal);
            finish(nutrient, points(share), Some(share), 1)
        }
    }
}

fn score_sodium(sodium: Nutrient, total_kcal: f64) -> SubScore {
    match sodium {
        Nutrient::Absent => SubScore::not_available(NutrientKind::Sodium),
        Nutrient::Present(grams) => {
            let density = sodium_mg_per_kcal(grams, total_kcal);
            finish(NutrientKind::Sodium, sodium_points(density), Some(density), 2)
        }
    }
}

fn score_fiber(fiber: Nutrient, zero_calorie: bool) -> SubScore {
    match fiber {
        Nutrient::Absent => SubScore::not_available(NutrientKind::Fiber),
        Nutrient::Present(grams) => {
            finish(NutrientKind::Fiber, fiber_points(grams, zero_calorie), None, 1)
        }
    }
}

/// Extra points taken off the total for sugars above 20% of energy
pub fn sugar_penalty(profile: &NutrientProfile) -> f64 {
    let Some(grams) = profile.sugars.value() else {
        return 0.0;
    };

    let share = percent_of_energy(grams, SUGAR_KCAL_PER_GRAM, profile.total_kcal());
    if share > SUGAR_PENALTY_THRESHOLD_PERCENT {
        (share - SUGAR_PENALTY_THRESHOLD_PERCENT) * SUGAR_PENALTY_PER_PERCENT
    } else {
        0.0
    }
}

/// Score a nutrient profile.
///
/// Pure and total: every profile, including an empty one, produces a report.
pub fn score(profile: &NutrientProfile) -> ScoreReport {
    let total_kcal = profile.total_kcal();
    let zero_calorie = profile.is_zero_calorie();

    let sugars = score_energy_share(
        NutrientKind::Sugars,
        profile.sugars,
        SUGAR_KCAL_PER_GRAM,
        total_kcal,
        sugars_points,
    );
    let saturated_fat = score_energy_share(
        NutrientKind::SaturatedFat,
        profile.saturated_fat,
        FAT_KCAL_PER_GRAM,
        total_kcal,
        saturated_fat_points,
    );
    let trans_fat = score_energy_share(
        NutrientKind::TransFat,
        profile.trans_fat,
        FAT_KCAL_PER_GRAM,
        total_kcal,
        trans_fat_points,
    );
    let sodium = score_sodium(profile.sodium, total_kcal);
    let fiber = score_fiber(profile.fiber, zero_calorie);
    let proteins = score_energy_share(
        NutrientKind::Proteins,
        profile.proteins,
        PROTEIN_KCAL_PER_GRAM,
        total_kcal,
        |share| protein_points(share, zero_calorie),
    );

    let sub_scores = [&sugars, &saturated_fat, &trans_fat, &sodium, &fiber, &proteins];
    let na_count = sub_scores.iter().filter(|s| s.not_available).count() as u8;
    let total_score = aggregate(&sub_scores, sugar_penalty(profile));

    ScoreReport {
        sugars,
        saturated_fat,
        trans_fat,
        sodium,
        fiber,
        proteins,
        total_score,
        total_kcal,
        na_count,
    }
}

/// Average the rounded sub-scores, scale to 0-100, subtract the sugar
/// penalty, then clamp. The penalty is applied before the clamp.
fn aggregate(sub_scores: &[&SubScore; 6], sugar_penalty: f64) -> rust_decimal::Decimal {
    let sum: f64 = sub_scores
        .iter()
        .map(|s| s.value.to_f64().unwrap_or(0.0))
        .sum();
    let average = sum / sub_scores.len() as f64;
    let total = average * 4.0 - sugar_penalty;

    round_to(total.clamp(0.0, MAX_TOTAL_SCORE), 1)
}
