//! Business logic services for the NutriScan server

pub mod scan;

pub use scan::{score_profile, ScanResult, ScanService, ScoreResult};
