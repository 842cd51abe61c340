//! Domain models for the NutriScan platform

mod ai_report;
mod nutrient;
mod product;
mod rating;
mod score;

pub use ai_report::*;
pub use nutrient::*;
pub use product::*;
pub use rating::*;
pub use score::*;
