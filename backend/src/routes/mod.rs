//! Route definitions for the NutriScan server

use axum::{routing::post, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/scan", post(handlers::scan_product))
        .route("/score", post(handlers::score_nutriments))
}
