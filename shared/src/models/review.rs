//! Review models

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::grading::{Grade, ScoreVerdict};
use crate::scoring::{ReviewInput, ScoreBreakdown, SubRatings};
use crate::types::{decimal_to_f64, score_to_decimal};

/// Plant taxonomy of a strain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Taxonomy {
    #[serde(alias = "indica")]
    Indica,
    #[serde(alias = "sativa")]
    Sativa,
    #[default]
    #[serde(alias = "hybrid")]
    Hybrid,
}

impl Taxonomy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Indica => "Indica",
            Taxonomy::Sativa => "Sativa",
            Taxonomy::Hybrid => "Hybrid",
        }
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown taxonomy: {0}")]
pub struct ParseTaxonomyError(pub String);

impl std::str::FromStr for Taxonomy {
    type Err = ParseTaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indica" => Ok(Taxonomy::Indica),
            "sativa" => Ok(Taxonomy::Sativa),
            "hybrid" => Ok(Taxonomy::Hybrid),
            _ => Err(ParseTaxonomyError(s.to_string())),
        }
    }
}

/// Terpene name to percentage
pub type TerpeneProfile = BTreeMap<String, f64>;

/// One terpene's share of a profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerpeneShare {
    pub name: String,
    pub percentage: f64,
    /// Fraction of the profile total, 0-1
    pub share: f64,
}

/// Terpenes ordered by percentage, largest first
pub fn terpene_shares(profile: &TerpeneProfile) -> Vec<TerpeneShare> {
    let total: f64 = profile.values().filter(|v| **v > 0.0).sum();

    let mut shares: Vec<TerpeneShare> = profile
        .iter()
        .map(|(name, percentage)| TerpeneShare {
            name: name.clone(),
            percentage: *percentage,
            share: if total > 0.0 { percentage.max(0.0) / total } else { 0.0 },
        })
        .collect();

    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}

/// A persisted review (also the storage shape of a catalog product)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub review_id: i64,
    pub strain_name: String,
    pub producer: String,
    pub package_date: Option<NaiveDate>,
    pub thc_percentage: Option<f64>,
    pub terpene_percentage: Option<f64>,
    pub taxonomy: Taxonomy,
    pub ratings: SubRatings,
    pub total_score: Decimal,
    pub terpene_profile: Option<TerpeneProfile>,
    pub notes: Option<String>,
    pub user_id: Option<Uuid>,
    pub upc_code: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn score(&self) -> f64 {
        decimal_to_f64(self.total_score)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.score())
    }

    /// Scoring inputs as they were stored
    pub fn score_input(&self) -> ReviewInput {
        ReviewInput::new(
            self.thc_percentage.unwrap_or_default(),
            self.terpene_percentage.unwrap_or_default(),
            self.ratings,
        )
    }
}

/// A review decorated for display
#[derive(Debug, Clone, Serialize)]
pub struct GradedReview {
    #[serde(flatten)]
    pub review: Review,
    pub grade: Grade,
    pub grade_color: &'static str,
    pub verdict: ScoreVerdict,
}

impl From<Review> for GradedReview {
    fn from(review: Review) -> Self {
        let score = review.score();
        let grade = Grade::from_score(score);
        Self {
            review,
            grade,
            grade_color: grade.color().css_class(),
            verdict: ScoreVerdict::from_score(score),
        }
    }
}

/// Review detail with the per-term score breakdown and terpene shares
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDetail {
    #[serde(flatten)]
    pub graded: GradedReview,
    /// Absent when the stored score was not produced by the model
    /// (catalog products carry a fixed score)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    pub terpenes: Vec<TerpeneShare>,
}

impl From<Review> for ReviewDetail {
    fn from(review: Review) -> Self {
        let breakdown = Some(ScoreBreakdown::for_input(&review.score_input()))
            .filter(|b| score_to_decimal(b.total.value()) == review.total_score);
        let terpenes = review
            .terpene_profile
            .as_ref()
            .map(terpene_shares)
            .unwrap_or_default();
        Self {
            graded: GradedReview::from(review),
            breakdown,
            terpenes,
        }
    }
}

/// Result of scoring a form without persisting it
#[derive(Debug, Clone, Serialize)]
pub struct ScorePreview {
    pub input: ReviewInput,
    pub total_score: f64,
    pub grade: Grade,
    pub grade_color: &'static str,
    pub verdict: ScoreVerdict,
}

impl ScorePreview {
    pub fn for_input(input: ReviewInput) -> Self {
        let total = crate::scoring::compute_score(&input);
        let grade = total.grade();
        Self {
            input,
            total_score: total.value(),
            grade,
            grade_color: grade.color().css_class(),
            verdict: ScoreVerdict::from_score(total.value()),
        }
    }
}
