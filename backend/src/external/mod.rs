//! External API integrations

pub mod ai_summary;
pub mod open_food_facts;

pub use ai_summary::AiSummaryClient;
pub use open_food_facts::OpenFoodFactsClient;
