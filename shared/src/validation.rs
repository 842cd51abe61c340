//! Validation utilities for NutriScan

use thiserror::Error;

/// Shortest accepted barcode (EAN-8)
pub const MIN_BARCODE_DIGITS: usize = 8;
/// Longest accepted barcode (EAN-13)
pub const MAX_BARCODE_DIGITS: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    #[error("Barcode is required")]
    Missing,

    #[error("Barcode must contain digits only")]
    NonDigit,

    #[error("Barcode must be 8 to 13 digits long, got {0}")]
    InvalidLength(usize),
}

/// Validate a product barcode (EAN-8 through EAN-13, UPC-A/E).
///
/// Surrounding whitespace is ignored; the trimmed barcode is returned.
pub fn validate_barcode(raw: &str) -> Result<&str, BarcodeError> {
    let barcode = raw.trim();
    if barcode.is_empty() {
        return Err(BarcodeError::Missing);
    }
    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(BarcodeError::NonDigit);
    }
    if !(MIN_BARCODE_DIGITS..=MAX_BARCODE_DIGITS).contains(&barcode.len()) {
        return Err(BarcodeError::InvalidLength(barcode.len()));
    }
    Ok(barcode)
}
