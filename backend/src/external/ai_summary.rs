//! AI Summary Client
//!
//! Client for the hosted AI workflow that writes an ingredient analysis for a
//! product. Inputs are kept short because the workflow caps each input field.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{AiReport, NutrientProfile, Product};

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};

const MAX_PRODUCT_NAME_CHARS: usize = 200;
const MAX_INGREDIENTS_CHARS: usize = 1000;
const MAX_NUTRIMENTS_CHARS: usize = 250;

/// Client for the AI summary workflow API
#[derive(Clone)]
pub struct AiSummaryClient {
    client: Client,
    base_url: String,
    api_key: String,
    user: String,
}

/// Request to run the analysis workflow
#[derive(Debug, Serialize)]
pub struct WorkflowRunRequest<'a> {
    pub inputs: WorkflowInputs,
    pub response_mode: &'static str,
    pub user: &'a str,
}

/// Workflow input fields
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WorkflowInputs {
    pub product_name: String,
    pub ingredients: String,
    pub nutriments: String,
}

impl WorkflowInputs {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_name: truncate(
                product.name().unwrap_or("Unknown Product"),
                MAX_PRODUCT_NAME_CHARS,
            ),
            ingredients: truncate(
                product.ingredients().unwrap_or("No ingredients listed"),
                MAX_INGREDIENTS_CHARS,
            ),
            nutriments: truncate(&nutrient_summary(&product.nutriments), MAX_NUTRIMENTS_CHARS),
        }
    }
}

/// Response from the workflow run API
#[derive(Debug, Deserialize)]
struct WorkflowRunResponse {
    data: WorkflowRunData,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunData {
    #[serde(default)]
    outputs: Value,
}

/// One-line nutrient summary; missing values print as 0
pub fn nutrient_summary(profile: &NutrientProfile) -> String {
    let amount = |nutrient: shared::Nutrient| nutrient.value().unwrap_or(0.0);
    [
        format!("Energy: {} kcal/100g", amount(profile.energy_kcal)),
        format!("Sugar: {}g", amount(profile.sugars)),
        format!("Fat: {}g", amount(profile.fat)),
        format!("Sat fat: {}g", amount(profile.saturated_fat)),
        format!("Sodium: {}mg", amount(profile.sodium) * 1000.0),
    ]
    .join(", ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

impl AiSummaryClient {
    /// Create a client, or `None` when no API key is configured
    pub fn from_config(config: &AiConfig) -> AppResult<Option<Self>> {
        let Some(api_key) = config.api_key() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            user: config.user.clone(),
        }))
    }

    /// Run the analysis workflow for a product
    pub async fn analyze(&self, product: &Product) -> AppResult<AiReport> {
        let request = WorkflowRunRequest {
            inputs: WorkflowInputs::from_product(product),
            response_mode: "blocking",
            user: &self.user,
        };
        tracing::debug!("Sending to AI workflow: {:?}", request.inputs);

        let response = self
            .client
            .post(format!("{}/workflows/run", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::AiSummary(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AiSummary(format!(
                "API returned {}: {}",
                status,
                truncate(&body, 500)
            )));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AiSummary(format!(
                "Expected JSON, got: {}",
                truncate(&body, 500)
            )));
        }

        let result: WorkflowRunResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiSummary(format!("Failed to parse response: {}", e)))?;

        AiReport::from_outputs(&result.data.outputs)
            .ok_or_else(|| AppError::AiSummary("Workflow returned no outputs".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::test_support::spawn_stub;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::json;

    fn config_for(base_url: String) -> AiConfig {
        AiConfig {
            base_url,
            api_key: Some("app-secret".to_string()),
            user: "nutriscan-user".to_string(),
            timeout_secs: 5,
        }
    }

    fn spread() -> Product {
        Product {
            product_name: Some("Hazelnut Spread".to_string()),
            ingredients_text: Some("Sugar, palm oil, hazelnuts 13%".to_string()),
            nutriments: NutrientProfile {
                energy_kcal: 539.0.into(),
                sugars: 56.3.into(),
                fat: 30.9.into(),
                sodium: 0.0428.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_nutrient_summary_format() {
        let summary = nutrient_summary(&NutrientProfile {
            energy_kcal: 250.0.into(),
            sugars: 12.5.into(),
            sodium: 0.5.into(),
            ..Default::default()
        });
        assert_eq!(
            summary,
            "Energy: 250 kcal/100g, Sugar: 12.5g, Fat: 0g, Sat fat: 0g, Sodium: 500mg"
        );
    }

    #[test]
    fn test_inputs_defaults_and_truncation() {
        let inputs = WorkflowInputs::from_product(&Product::default());
        assert_eq!(inputs.product_name, "Unknown Product");
        assert_eq!(inputs.ingredients, "No ingredients listed");

        let product = Product {
            product_name: Some("x".repeat(300)),
            ingredients_text: Some("é".repeat(1200)),
            ..Default::default()
        };
        let inputs = WorkflowInputs::from_product(&product);
        assert_eq!(inputs.product_name.chars().count(), 200);
        assert_eq!(inputs.ingredients.chars().count(), 1000);
        assert!(inputs.nutriments.chars().count() <= 250);
    }

    #[test]
    fn test_disabled_without_key() {
        let mut config = config_for("http://localhost".to_string());
        config.api_key = None;
        assert!(AiSummaryClient::from_config(&config).unwrap().is_none());
    }

    async fn stub_workflow(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer app-secret") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "bad key" })));
        }
        assert_eq!(body["response_mode"], "blocking");
        assert_eq!(body["inputs"]["product_name"], "Hazelnut Spread");

        (
            StatusCode::OK,
            Json(json!({
                "data": {
                    "outputs": {
                        "text": "```json\n{\"summary\": \"Very high in sugar\", \"risks\": \"Obesity, Diabetes\"}\n```"
                    }
                }
            })),
        )
    }

    #[tokio::test]
    async fn test_analyze_normalizes_outputs() {
        let base = spawn_stub(Router::new().route("/workflows/run", post(stub_workflow))).await;
        let client = AiSummaryClient::from_config(&config_for(base)).unwrap().unwrap();

        let report = client.analyze(&spread()).await.unwrap();
        assert_eq!(report.summary, "Very high in sugar");
        assert_eq!(report.risks, vec!["Obesity", "Diabetes"]);
        assert!(report.alternatives.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_json() {
        let base = spawn_stub(
            Router::new().route("/workflows/run", post(|| async { "<html>gateway</html>" })),
        )
        .await;
        let client = AiSummaryClient::from_config(&config_for(base)).unwrap().unwrap();

        let err = client.analyze(&spread()).await.unwrap_err();
        assert!(matches!(err, AppError::AiSummary(_)));
    }

    #[tokio::test]
    async fn test_analyze_surfaces_http_errors() {
        let base = spawn_stub(Router::new().route("/workflows/run", post(stub_workflow))).await;
        let mut config = config_for(base);
        config.api_key = Some("wrong".to_string());
        let client = AiSummaryClient::from_config(&config).unwrap().unwrap();

        match client.analyze(&spread()).await.unwrap_err() {
            AppError::AiSummary(message) => assert!(message.contains("401")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
