//! WebAssembly module for NutriScan
//!
//! Provides client-side computation for:
//! - Nutrient scoring of OpenFoodFacts nutriments
//! - Health rating labels and colors
//! - Product summary rendering data
//! - Barcode validation before a lookup

use rust_decimal::Decimal;
use shared::{
    has_sufficient_data, rate_health, score, validate_barcode, BarColor, NutrientProfile, Product,
    ProductSummary,
};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("NutriScan scorer loaded"));
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn score_report_json(nutriments_json: &str) -> Result<String, String> {
    let profile: NutrientProfile = serde_json::from_str(nutriments_json)
        .map_err(|e| format!("Invalid nutriments JSON: {}", e))?;

    serde_json::to_string(&score(&profile)).map_err(|e| format!("Failed to encode report: {}", e))
}

fn product_summary_json(product_json: &str) -> Result<String, String> {
    let product: Product = serde_json::from_str(product_json)
        .map_err(|e| format!("Invalid product JSON: {}", e))?;
    let report = score(&product.nutriments);

    serde_json::to_string(&ProductSummary::build(&product, &report))
        .map_err(|e| format!("Failed to encode summary: {}", e))
}

/// Score an OpenFoodFacts nutriments object; returns the score report as JSON
#[wasm_bindgen]
pub fn score_nutriments(nutriments_json: &str) -> Result<String, JsValue> {
    score_report_json(nutriments_json).map_err(|e| JsValue::from_str(&e))
}

/// Health rating label for a total score
#[wasm_bindgen]
pub fn health_rating(total_score: f64) -> String {
    rate_health(to_decimal(total_score)).label().to_string()
}

/// Color token for a total score's rating
#[wasm_bindgen]
pub fn health_rating_color(total_score: f64) -> String {
    rate_health(to_decimal(total_score)).color().to_string()
}

/// Whether too many nutrients are missing to show a rating
#[wasm_bindgen]
pub fn is_insufficient_data(na_count: u8) -> bool {
    !has_sufficient_data(na_count)
}

/// Bar color for a 0-25 sub-score
#[wasm_bindgen]
pub fn sub_score_bar_color(value: f64) -> String {
    BarColor::for_score(to_decimal(value)).as_str().to_string()
}

/// Build the render data for an OpenFoodFacts product object
#[wasm_bindgen]
pub fn summarize_product(product_json: &str) -> Result<String, JsValue> {
    product_summary_json(product_json).map_err(|e| JsValue::from_str(&e))
}

/// Check a barcode before sending it to the server
#[wasm_bindgen]
pub fn is_valid_barcode(barcode: &str) -> bool {
    validate_barcode(barcode).is_ok()
}
