//! Currency amount parsing
//!
//! Staff type amounts the way they appear on screen ("₹1,234.50"), so every
//! character that is not an ASCII digit, `.` or `-` is dropped before parsing.

use crate::error::{FieldError, FieldResult};

/// Parse a user-entered amount
///
/// Rejects input that has no parseable number left after stripping,
/// instead of storing a degenerate value.
pub fn parse_amount(raw: &str) -> FieldResult<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return Err(FieldError::InvalidAmount(raw.to_string()));
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::InvalidAmount(raw.to_string())),
    }
}
