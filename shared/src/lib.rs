//! Shared types, models and scoring for the NutriScan platform
//!
//! This crate contains the nutrient scorer and everything shared between the
//! backend, the frontend (via WASM), and other components of the system.

pub mod models;
pub mod presentation;
pub mod scoring;
pub mod types;
pub mod validation;

pub use models::*;
pub use presentation::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
