//! HTTP handlers for product scanning and scoring

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use shared::{BarcodeError, NutrientProfile};

use crate::{
    error::{AppError, AppResult},
    services::{score_profile, ScanResult, ScoreResult},
    AppState,
};

/// Scan request body. Scanners send the barcode as text or as a bare number.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub barcode: Value,
}

impl ScanRequest {
    /// Barcode as text, ready for validation
    pub fn barcode(&self) -> Result<String, BarcodeError> {
        match &self.barcode {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            Value::Null => Err(BarcodeError::Missing),
            _ => Err(BarcodeError::NonDigit),
        }
    }
}

/// Look up a product by barcode and score it
pub async fn scan_product(
    State(state): State<AppState>,
    body: Result<Json<ScanRequest>, JsonRejection>,
) -> AppResult<Json<ScanResult>> {
    let Json(request) = body?;
    let barcode = request.barcode()?;

    let result = state.scan.scan(&barcode).await?;
    Ok(Json(result))
}

/// Score an OpenFoodFacts-style nutriments object without a lookup
pub async fn score_nutriments(
    body: Result<Json<NutrientProfile>, JsonRejection>,
) -> AppResult<Json<ScoreResult>> {
    let Json(profile) = body?;
    Ok(Json(score_profile(&profile)))
}

/// Fallback for unknown routes
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}
