//! Validation utilities for the Travel Timing Recommendation Platform

use crate::models::ScoreWeights;

// ============================================================================
// Scoring Validations
// ============================================================================

/// Validate a calendar month is in 1-12
pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err("Month must be between 1 and 12")
    }
}

/// Validate a latitude is on the globe
pub fn validate_latitude(latitude: f64) -> Result<(), &'static str> {
    if (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err("Latitude must be between -90 and 90")
    }
}

/// Validate score weights are non-negative
///
/// Weights conventionally sum to 1.0 but the sum is owned by the caller
/// and is deliberately not checked here.
pub fn validate_weights(weights: &ScoreWeights) -> Result<(), &'static str> {
    let values = [
        weights.weather,
        weights.cost,
        weights.crowd,
        weights.buzz,
    ];
    for w in values {
        if !w.is_finite() {
            return Err("Weights must be finite");
        }
        if w < 0.0 {
            return Err("Weights cannot be negative");
        }
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a destination id is a well-formed slug
pub fn validate_destination_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() {
        return Err("Destination id cannot be empty");
    }
    if id.len() > 64 {
        return Err("Destination id must be at most 64 characters");
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Destination id must be lowercase alphanumeric with dashes");
    }
    Ok(())
}

/// Validate a day of month is plausible for the given month
///
/// February 29 is accepted; leap-year resolution happens when a window is
/// projected onto a concrete year.
pub fn validate_month_day(month: u32, day: u32) -> Result<(), &'static str> {
    validate_month(month)?;
    let max_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 29,
        _ => unreachable!(),
    };
    if day == 0 || day > max_day {
        return Err("Day is out of range for the month");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
        assert!(validate_month(13).is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoreWeights {
            weather: 0.35,
            cost: -0.25,
            crowd: 0.15,
            buzz: 0.25,
        };
        assert!(validate_weights(&weights).is_err());
    }

    #[test]
    fn test_destination_id_slug() {
        assert!(validate_destination_id("paris").is_ok());
        assert!(validate_destination_id("rio-de-janeiro").is_ok());
        assert!(validate_destination_id("").is_err());
        assert!(validate_destination_id("Paris").is_err());
    }

    #[test]
    fn test_month_day_limits() {
        assert!(validate_month_day(2, 29).is_ok());
        assert!(validate_month_day(2, 30).is_err());
        assert!(validate_month_day(4, 31).is_err());
        assert!(validate_month_day(12, 31).is_ok());
    }
}
