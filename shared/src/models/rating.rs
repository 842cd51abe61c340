//! Health rating derived from the total score

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Qualitative health rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum HealthRating {
    /// 85+ points
    VeryHealthy,
    /// 70-84.9 points
    Healthy,
    /// 55-69.9 points
    Moderate,
    /// 40-54.9 points
    Unhealthy,
    /// Below 40 points
    VeryUnhealthy,
}

impl HealthRating {
    pub fn label(&self) -> &'static str {
        match self {
            HealthRating::VeryHealthy => "Very Healthy",
            HealthRating::Healthy => "Healthy",
            HealthRating::Moderate => "Moderate",
            HealthRating::Unhealthy => "Unhealthy",
            HealthRating::VeryUnhealthy => "Very Unhealthy",
        }
    }

    /// Color token used by the presentation layer
    pub fn color(&self) -> &'static str {
        match self {
            HealthRating::VeryHealthy => "green",
            HealthRating::Healthy => "lightgreen",
            HealthRating::Moderate => "yellow",
            HealthRating::Unhealthy => "orange",
            HealthRating::VeryUnhealthy => "red",
        }
    }
}

impl std::fmt::Display for HealthRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Rate a product by its total score (0-100)
pub fn rate_health(total_score: Decimal) -> HealthRating {
    if total_score >= Decimal::from(85) {
        HealthRating::VeryHealthy
    } else if total_score >= Decimal::from(70) {
        HealthRating::Healthy
    } else if total_score >= Decimal::from(55) {
        HealthRating::Moderate
    } else if total_score >= Decimal::from(40) {
        HealthRating::Unhealthy
    } else {
        HealthRating::VeryUnhealthy
    }
}

/// Rating with its display label and color, as sent to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingBadge {
    pub rating: HealthRating,
    pub label: String,
    pub color: String,
}

impl From<HealthRating> for RatingBadge {
    fn from(rating: HealthRating) -> Self {
        Self {
            rating,
            label: rating.label().to_string(),
            color: rating.color().to_string(),
        }
    }
}
