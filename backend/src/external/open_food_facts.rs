//! OpenFoodFacts product lookup client
//!
//! Fetches a product's name, grade and per-100g nutriments by barcode.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use shared::Product;

use crate::config::OpenFoodFactsConfig;
use crate::error::{AppError, AppResult};

/// Fields requested from the product API; everything else is left out of the payload
const PRODUCT_FIELDS: &str =
    "product_name,nutriscore_data,nutriments,nutrition_grades,ingredients_text";

/// Client for the OpenFoodFacts v2 product API
#[derive(Clone)]
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
}

/// OpenFoodFacts API response for a product lookup
#[derive(Debug, Deserialize)]
struct ProductResponse {
    /// 1 when found, 0 when not (v3 uses "success"/"failure")
    #[serde(default)]
    status: Value,
    #[serde(default)]
    product: Option<Product>,
}

impl ProductResponse {
    fn is_not_found(&self) -> bool {
        let status_missing = match &self.status {
            Value::Number(number) => number.as_i64() == Some(0),
            Value::String(status) => status == "failure",
            _ => false,
        };
        status_missing || self.product.is_none()
    }
}

impl OpenFoodFactsClient {
    /// Create a new client from configuration
    pub fn new(config: &OpenFoodFactsConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a product by (already validated) barcode
    pub async fn get_product(&self, barcode: &str) -> AppResult<Product> {
        let url = format!("{}/api/v2/product/{}", self.base_url, barcode);

        let response = self
            .client
            .get(&url)
            .query(&[("fields", PRODUCT_FIELDS)])
            .send()
            .await
            .map_err(|e| AppError::LookupUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::ProductNotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                "OpenFoodFacts API error: {} - {}",
                status,
                body.chars().take(500).collect::<String>()
            );
            return Err(AppError::ProductLookup {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let data: ProductResponse = response.json().await.map_err(|e| {
            AppError::LookupUnavailable(format!("Failed to parse product response: {}", e))
        })?;

        if data.is_not_found() {
            return Err(AppError::ProductNotFound);
        }

        tracing::debug!("Product {} found", barcode);
        data.product.ok_or(AppError::ProductNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::test_support::spawn_stub;
    use axum::{extract::Path, http::StatusCode as HttpStatus, routing::get, Json, Router};
    use serde_json::json;
    use shared::Nutrient;

    fn client_for(base_url: String) -> OpenFoodFactsClient {
        OpenFoodFactsClient::new(&OpenFoodFactsConfig {
            base_url,
            user_agent: "NutriScan-Test/1.0".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    async fn stub_product(Path(barcode): Path<String>) -> (HttpStatus, Json<Value>) {
        match barcode.as_str() {
            "3017620422003" => (
                HttpStatus::OK,
                Json(json!({
                    "code": barcode,
                    "status": 1,
                    "product": {
                        "product_name": "Hazelnut Spread",
                        "nutrition_grades": "e",
                        "nutriments": {
                            "energy-kcal_100g": 539,
                            "sugars_100g": 56.3,
                            "saturated-fat_100g": 10.6
                        }
                    }
                })),
            ),
            "00000000" => (
                HttpStatus::OK,
                Json(json!({ "code": barcode, "status": 0, "status_verbose": "product not found" })),
            ),
            "11111111" => (
                HttpStatus::NOT_FOUND,
                Json(json!({ "status": 0 })),
            ),
            _ => (
                HttpStatus::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "maintenance" })),
            ),
        }
    }

    async fn stub_base() -> String {
        spawn_stub(Router::new().route("/api/v2/product/:barcode", get(stub_product))).await
    }

    #[tokio::test]
    async fn test_get_product_found() {
        let client = client_for(stub_base().await);
        let product = client.get_product("3017620422003").await.unwrap();

        assert_eq!(product.name(), Some("Hazelnut Spread"));
        assert_eq!(product.nutriments.energy_kcal, Nutrient::Present(539.0));
        assert!(product.nutriments.fiber.is_absent());
    }

    #[tokio::test]
    async fn test_status_zero_is_not_found() {
        let client = client_for(stub_base().await);
        let err = client.get_product("00000000").await.unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));
    }

    #[tokio::test]
    async fn test_upstream_404_is_not_found() {
        let client = client_for(stub_base().await);
        let err = client.get_product("11111111").await.unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_status() {
        let client = client_for(stub_base().await);
        match client.get_product("22222222").await.unwrap_err() {
            AppError::ProductLookup { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Nothing listens on port 9 (discard) in test environments
        let client = client_for("http://127.0.0.1:9".to_string());
        let err = client.get_product("3017620422003").await.unwrap_err();
        assert!(matches!(err, AppError::LookupUnavailable(_)));
    }
}
