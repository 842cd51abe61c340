//! Packaged food product models

use serde::{Deserialize, Serialize};

use super::nutrient::NutrientProfile;
use crate::types::null_as_default;

/// Product record as returned by the food database lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutriments: NutrientProfile,
    /// Nutri-Score grade as published by the database (a-e)
    #[serde(default)]
    pub nutrition_grades: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
}

impl Product {
    /// Product name, or `None` when missing or blank
    pub fn name(&self) -> Option<&str> {
        self.product_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn ingredients(&self) -> Option<&str> {
        self.ingredients_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
