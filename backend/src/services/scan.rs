//! Product scan service
//!
//! Validates a barcode, looks the product up, scores its nutriments and
//! optionally attaches an AI ingredient analysis.

use serde::Serialize;
use shared::{
    score, validate_barcode, AiReport, NutrientProfile, Product, RatingBadge, ScoreReport,
};

use crate::error::AppResult;
use crate::external::{AiSummaryClient, OpenFoodFactsClient};

/// Scan service combining product lookup, scoring and AI enrichment
#[derive(Clone)]
pub struct ScanService {
    lookup: OpenFoodFactsClient,
    ai: Option<AiSummaryClient>,
}

/// Result of scanning one barcode
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub barcode: String,
    pub product: Product,
    pub report: ScoreReport,
    /// `None` when too many nutrients are missing to rate the product
    pub rating: Option<RatingBadge>,
    pub insufficient_data: bool,
    pub ai: Option<AiReport>,
}

/// Result of scoring a bare nutrient profile
#[derive(Debug, Serialize)]
pub struct ScoreResult {
    pub report: ScoreReport,
    pub rating: Option<RatingBadge>,
    pub insufficient_data: bool,
}

impl ScoreResult {
    fn from_report(report: ScoreReport) -> Self {
        Self {
            rating: report.rating().map(RatingBadge::from),
            insufficient_data: !report.has_sufficient_data(),
            report,
        }
    }
}

/// Score a nutrient profile without any lookup
pub fn score_profile(profile: &NutrientProfile) -> ScoreResult {
    ScoreResult::from_report(score(profile))
}

impl ScanService {
    pub fn new(lookup: OpenFoodFactsClient, ai: Option<AiSummaryClient>) -> Self {
        Self { lookup, ai }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }

    /// Scan a product by barcode
    pub async fn scan(&self, raw_barcode: &str) -> AppResult<ScanResult> {
        let barcode = validate_barcode(raw_barcode)?;
        tracing::info!("Scanning barcode {}", barcode);

        let product = self.lookup.get_product(barcode).await?;
        let ScoreResult {
            report,
            rating,
            insufficient_data,
        } = score_profile(&product.nutriments);
        tracing::debug!(
            "Scored {}: total {} ({} nutrients missing)",
            barcode,
            report.total_score,
            report.na_count
        );

        let ai = self.enrich(&product).await;

        Ok(ScanResult {
            barcode: barcode.to_string(),
            product,
            report,
            rating,
            insufficient_data,
            ai,
        })
    }

    /// AI analysis for a product; failures never fail the scan
    async fn enrich(&self, product: &Product) -> Option<AiReport> {
        let client = self.ai.as_ref()?;
        match client.analyze(product).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("AI summary unavailable: {}", e);
                None
            }
        }
    }
}
