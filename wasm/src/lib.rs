//! WebAssembly module for the Strain Review Platform
//!
//! Provides client-side computation for:
//! - Live composite score while a review form is being filled in
//! - Grade and rank classification with their display colours
//! - Score verdicts

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
use shared::RawReviewForm;

/// Score a form given as JSON; fields may be missing or hold strings
fn score_form(form_json: &str) -> Result<f64, serde_json::Error> {
    let form: RawReviewForm = serde_json::from_str(form_json)?;
    Ok(shared::compute_score(&form.score_input()).value())
}

/// Full preview (score, grade, colour, verdict) as JSON
fn preview_form(form_json: &str) -> Result<String, serde_json::Error> {
    let form: RawReviewForm = serde_json::from_str(form_json)?;
    serde_json::to_string(&ScorePreview::for_input(form.score_input()))
}

fn js_error(context: &str, err: serde_json::Error) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::warn_1(&JsValue::from_str(&message));
    js_sys::Error::new(&message).into()
}

/// Composite score of a review form
#[wasm_bindgen]
pub fn compute_total_score(form_json: &str) -> Result<f64, JsValue> {
    score_form(form_json).map_err(|e| js_error("Invalid review form JSON", e))
}

/// Score, grade, colour class and verdict of a review form, as JSON
#[wasm_bindgen]
pub fn score_preview(form_json: &str) -> Result<String, JsValue> {
    preview_form(form_json).map_err(|e| js_error("Invalid review form JSON", e))
}

/// Letter grade of a score
#[wasm_bindgen]
pub fn score_to_grade(score: f64) -> String {
    shared::score_to_grade(score).to_string()
}

/// CSS colour class of a grade label
#[wasm_bindgen]
pub fn grade_color_class(grade: &str) -> String {
    shared::grade_to_display_color(grade).css_class().to_string()
}

/// Rank title for a review count
#[wasm_bindgen]
pub fn review_count_to_rank(count: i32) -> String {
    shared::review_count_to_rank(i64::from(count)).to_string()
}

/// CSS colour class of a rank title
#[wasm_bindgen]
pub fn rank_color_class(rank: &str) -> String {
    shared::rank_to_display_color(rank).css_class().to_string()
}

/// Descriptive verdict for a score
#[wasm_bindgen]
pub fn score_verdict(score: f64) -> String {
    shared::ScoreVerdict::from_score(score).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_form() {
        let score = score_form(r#"{"thc_percentage": 20, "terpene_percentage": "2"}"#).unwrap();
        assert_eq!(score, 49.32);
        assert_eq!(score_form("{}").unwrap(), 28.28);
    }

    #[test]
    fn test_score_form_rejects_malformed_json() {
        assert!(score_form("{not json").is_err());
    }

    #[test]
    fn test_preview_form() {
        let json = preview_form(r#"{"thc_percentage": 30, "terpene_percentage": 5,
            "flower_structure": 10, "trichome_density": 10, "trim": 10, "burn": 10,
            "ash_color": 10, "flavor": 10, "intensity": 10, "clarity": 10}"#)
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_score"], 94.79);
        assert_eq!(value["grade"], "AAAA");
        assert_eq!(value["verdict"], "Outstanding");
    }

    #[test]
    fn test_score_to_grade() {
        assert_eq!(score_to_grade(95.0), "AAAA+");
        assert_eq!(score_to_grade(94.99), "AAAA");
        assert_eq!(score_to_grade(35.0), "B+");
        assert_eq!(score_to_grade(34.99), "B");
    }

    #[test]
    fn test_color_classes() {
        assert_eq!(grade_color_class("AAAA"), "text-purple-600");
        assert_eq!(grade_color_class("AAA+"), "text-green-600");
        assert_eq!(grade_color_class("B"), "text-red-600");
        assert_eq!(rank_color_class("Budtender"), "text-blue-600");
        assert_eq!(rank_color_class("Seedling"), "text-gray-600");
    }

    #[test]
    fn test_ranks() {
        assert_eq!(review_count_to_rank(0), "Seedling");
        assert_eq!(review_count_to_rank(99), "Head Cultivator");
        assert_eq!(review_count_to_rank(100), "Master Grower");
        assert_eq!(review_count_to_rank(-3), "Seedling");
    }

    #[test]
    fn test_score_verdict() {
        assert_eq!(score_verdict(95.0), "Exceptional");
        assert_eq!(score_verdict(72.0), "Good");
        assert_eq!(score_verdict(49.32), "Below Average");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn malformed_form_is_a_js_error() {
        assert!(compute_total_score("{not json").is_err());
    }

    #[wasm_bindgen_test]
    fn preview_round_trips() {
        assert!(score_preview("{}").unwrap().contains("\"grade\""));
    }
}
