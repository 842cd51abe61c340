//! NutriScan - Backend Server
//!
//! Looks products up by barcode, scores their nutrient profile and serves the
//! result to the scanner front-end.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{AiSummaryClient, OpenFoodFactsClient};
use services::ScanService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scan: ScanService,
}

impl AppState {
    /// Build the external clients described by the configuration
    pub fn from_config(config: Config) -> error::AppResult<Self> {
        let lookup = OpenFoodFactsClient::new(&config.open_food_facts)?;
        let ai = AiSummaryClient::from_config(&config.ai)?;

        Ok(Self {
            config: Arc::new(config),
            scan: ScanService::new(lookup, ai),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutriscan_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting NutriScan Server");
    tracing::info!("Environment: {}", config.environment);

    let addr = config.server.socket_addr()?;
    let state = AppState::from_config(config)?;
    if state.scan.ai_enabled() {
        tracing::info!("AI summaries enabled ({})", state.config.ai.base_url);
    } else {
        tracing::warn!("No AI API key configured; AI summaries disabled");
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .fallback(handlers::route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "NutriScan API v1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AiConfig, OpenFoodFactsConfig, ServerConfig};
    use crate::external::test_support::spawn_stub;
    use axum::{
        body::Body,
        extract::Path,
        http::{header, Request, StatusCode},
        Json,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn stub_product(Path(barcode): Path<String>) -> (StatusCode, Json<Value>) {
        match barcode.as_str() {
            "3017620422003" => (
                StatusCode::OK,
                Json(json!({
                    "status": 1,
                    "product": {
                        "product_name": "Hazelnut Spread",
                        "nutrition_grades": "e",
                        "nutriments": {
                            "energy-kcal_100g": 539,
                            "sugars_100g": 56.3,
                            "saturated-fat_100g": 10.6,
                            "trans-fat_100g": 0,
                            "sodium_100g": 0.0428,
                            "fiber_100g": 0,
                            "proteins_100g": 6.3
                        }
                    }
                })),
            ),
            "22222222" => (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))),
            _ => (StatusCode::OK, Json(json!({ "status": 0 }))),
        }
    }

    async fn test_app() -> Router {
        let base_url =
            spawn_stub(Router::new().route("/api/v2/product/:barcode", get(stub_product))).await;
        let config = Config {
            environment: "test".to_string(),
            server: ServerConfig {
                port: 0,
                host: "127.0.0.1".to_string(),
            },
            open_food_facts: OpenFoodFactsConfig {
                base_url,
                user_agent: "NutriScan-Test/1.0".to_string(),
                timeout_secs: 5,
            },
            ai: AiConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: None,
                user: "tester".to_string(),
                timeout_secs: 5,
            },
        };
        create_app(AppState::from_config(config).unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(test_app().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["ai_enabled"], false);
    }

    #[tokio::test]
    async fn test_scan_product() {
        let (status, body) = send(
            test_app().await,
            post_json("/api/scan", json!({ "barcode": "3017620422003" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["barcode"], "3017620422003");
        assert_eq!(body["product"]["product_name"], "Hazelnut Spread");
        assert_eq!(body["report"]["na_count"], 0);
        assert_eq!(body["insufficient_data"], false);
        assert_eq!(body["rating"]["color"], "red");
        assert!(body["ai"].is_null());
    }

    #[tokio::test]
    async fn test_scan_accepts_numeric_barcode() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"barcode": 3017620422003}"#))
            .unwrap();
        let (status, body) = send(test_app().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["barcode"], "3017620422003");
    }

    #[tokio::test]
    async fn test_scan_requires_barcode() {
        let (status, body) = send(test_app().await, post_json("/api/scan", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "barcode");
    }

    #[tokio::test]
    async fn test_scan_invalid_barcode() {
        let (status, body) = send(
            test_app().await,
            post_json("/api/scan", json!({ "barcode": "12345" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Barcode must be 8 to 13 digits long, got 5"
        );
    }

    #[tokio::test]
    async fn test_scan_unknown_product() {
        let (status, body) = send(
            test_app().await,
            post_json("/api/scan", json!({ "barcode": "87654321" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Product not found");
    }

    #[tokio::test]
    async fn test_scan_passes_upstream_status() {
        let (status, body) = send(
            test_app().await,
            post_json("/api/scan", json!({ "barcode": "22222222" })),
        )
        .await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body["error"]["message"],
            "Failed to fetch product data: Too Many Requests"
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scan")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(test_app().await, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_score_nutriments() {
        let (status, body) = send(
            test_app().await,
            post_json(
                "/api/score",
                json!({
                    "energy-kcal_100g": 200,
                    "sugars_100g": 5,
                    "saturated-fat_100g": 2,
                    "trans-fat_100g": 0,
                    "sodium_100g": 0.2,
                    "fiber_100g": 1.5,
                    "proteins_100g": 2.5
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["total_score"], "67.8");
        assert_eq!(body["report"]["sugars"]["ratio"], "10.0");
        assert_eq!(body["report"]["fiber"]["ratio"], "N/A");
        assert_eq!(body["rating"]["label"], "Moderate");
    }

    #[tokio::test]
    async fn test_score_insufficient_data() {
        let (status, body) = send(
            test_app().await,
            post_json("/api/score", json!({ "energy-kcal_100g": 100, "sugars_100g": null })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["na_count"], 6);
        assert_eq!(body["insufficient_data"], true);
        assert!(body["rating"].is_null());
    }

    #[tokio::test]
    async fn test_score_out_of_range_amount_is_not_available() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"energy-kcal_100g": 100, "sugars_100g": 1e400}"#))
            .unwrap();
        let (status, body) = send(test_app().await, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report"]["sugars"]["not_available"], true);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let (status, body) = send(test_app().await, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Route not found");
    }
}
