//! Score preview handler

use axum::Json;

use crate::models::{RawReviewForm, ScorePreview};

/// Score a review form without saving it
pub async fn preview_score(Json(form): Json<RawReviewForm>) -> Json<ScorePreview> {
    let preview = ScorePreview::for_input(form.score_input());
    tracing::debug!(score = preview.total_score, grade = %preview.grade, "Score preview");
    Json(preview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::{Grade, ScoreVerdict};

    fn preview(body: serde_json::Value) -> ScorePreview {
        let form: RawReviewForm = serde_json::from_value(body).unwrap();
        tokio_test::block_on(preview_score(Json(form))).0
    }

    #[test]
    fn test_preview_reference_form() {
        let result = preview(json!({ "thc_percentage": 20, "terpene_percentage": 2 }));
        assert_eq!(result.total_score, 49.32);
        assert_eq!(result.grade, Grade::BBPlus);
        assert_eq!(result.verdict, ScoreVerdict::BelowAverage);
    }

    #[test]
    fn test_preview_accepts_junk() {
        let result = preview(json!({ "thc_percentage": "lots", "flavor": "great" }));
        assert_eq!(result.total_score, 28.28);
        assert_eq!(result.input.ratings.flavor, 5);
    }

    #[test]
    fn test_preview_clamps() {
        let result = preview(json!({
            "thc_percentage": 40, "terpene_percentage": 15,
            "flower_structure": 10, "trichome_density": 10, "trim": 10, "burn": 10,
            "ash_color": 10, "flavor": 10, "intensity": 10, "clarity": 10
        }));
        assert_eq!(result.total_score, 100.0);
        assert_eq!(result.grade, Grade::AAAAPlus);
        assert_eq!(result.grade_color, "text-purple-600");
    }
}
