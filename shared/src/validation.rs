//! Validation utilities for review and catalog input
//!
//! The scoring core accepts any finite number; range checks on submitted
//! reviews happen here, at the caller's boundary.

use crate::models::TerpeneProfile;
use crate::scoring::{ReviewInput, SubRatings};

/// Lowest accepted sub-rating
pub const MIN_RATING: i32 = 1;
/// Highest accepted sub-rating
pub const MAX_RATING: i32 = 10;

// ============================================================================
// Review Validations
// ============================================================================

/// Validate a required free-text field is not blank
pub fn validate_required_text(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Validate a sub-rating is on the 1-10 scale
pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err("Rating must be between 1 and 10");
    }
    Ok(())
}

/// Validate a content percentage
pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Percentage must be a number");
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate all eight sub-ratings, reporting the first offending field
pub fn validate_sub_ratings(ratings: &SubRatings) -> Result<(), (&'static str, &'static str)> {
    for (field, rating) in ratings.named() {
        validate_rating(rating).map_err(|msg| (field, msg))?;
    }
    Ok(())
}

/// Validate coerced review input, reporting the first offending field
pub fn validate_review_input(input: &ReviewInput) -> Result<(), (&'static str, &'static str)> {
    validate_percentage(input.thc_percentage).map_err(|msg| ("thc_percentage", msg))?;
    validate_percentage(input.terpene_percentage).map_err(|msg| ("terpene_percentage", msg))?;
    validate_sub_ratings(&input.ratings)
}

/// Validate terpene amounts are finite, non-negative percentages
pub fn validate_terpene_profile(profile: &TerpeneProfile) -> Result<(), &'static str> {
    for (name, value) in profile {
        if name.trim().is_empty() {
            return Err("Terpene name cannot be blank");
        }
        validate_percentage(*value)?;
    }
    Ok(())
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate a product barcode: UPC-E (8), UPC-A (12) or EAN-13 digits
pub fn validate_upc(code: &str) -> Result<(), &'static str> {
    let code = code.trim();
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("UPC code must contain digits only");
    }
    if !matches!(code.len(), 8 | 12 | 13) {
        return Err("UPC code must be 8, 12 or 13 digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("Blue Dream").is_ok());
        assert!(validate_required_text("").is_err());
        assert!(validate_required_text("   ").is_err());
    }

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(10).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(11).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(0.0).is_ok());
        assert!(validate_percentage(27.4).is_ok());
        assert!(validate_percentage(-0.1).is_err());
        assert!(validate_percentage(100.5).is_err());
        assert!(validate_percentage(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_sub_ratings_reports_field() {
        let mut ratings = SubRatings::uniform(7);
        assert!(validate_sub_ratings(&ratings).is_ok());

        ratings.burn = 0;
        let (field, _) = validate_sub_ratings(&ratings).unwrap_err();
        assert_eq!(field, "burn");
    }

    #[test]
    fn test_validate_review_input() {
        let input = ReviewInput::new(-5.0, 1.0, SubRatings::uniform(5));
        assert_eq!(validate_review_input(&input).unwrap_err().0, "thc_percentage");
        assert!(validate_review_input(&ReviewInput::default()).is_ok());
    }

    #[test]
    fn test_validate_terpene_profile() {
        let mut profile = TerpeneProfile::new();
        profile.insert("myrcene".to_string(), 0.9);
        assert!(validate_terpene_profile(&profile).is_ok());

        profile.insert("pinene".to_string(), -1.0);
        assert!(validate_terpene_profile(&profile).is_err());
    }

    #[test]
    fn test_validate_upc() {
        assert!(validate_upc("012345678905").is_ok());
        assert!(validate_upc("4006381333931").is_ok());
        assert!(validate_upc("01234565").is_ok());
        assert!(validate_upc("12345").is_err());
        assert!(validate_upc("01234567890A").is_err());
    }
}
