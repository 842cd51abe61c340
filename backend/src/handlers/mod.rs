//! HTTP request handlers

pub mod health;
pub mod scan;

pub use health::health_check;
pub use scan::{route_not_found, scan_product, score_nutriments};
