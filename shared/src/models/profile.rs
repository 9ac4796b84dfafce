//! Reviewer profile and wishlist models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grading::{Grade, RankProgress, UserRank};
use crate::models::{GradedReview, Taxonomy};
use crate::types::decimal_to_f64;

/// Summary of the product a wishlist entry points at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistProduct {
    pub review_id: i64,
    pub strain_name: String,
    pub producer: String,
    pub taxonomy: Taxonomy,
    pub total_score: Decimal,
    pub grade: Grade,
}

impl WishlistProduct {
    pub fn new(
        review_id: i64,
        strain_name: String,
        producer: String,
        taxonomy: Taxonomy,
        total_score: Decimal,
    ) -> Self {
        Self {
            review_id,
            strain_name,
            producer,
            taxonomy,
            total_score,
            grade: Grade::from_score(decimal_to_f64(total_score)),
        }
    }
}

/// A product saved to a user's wishlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: i64,
    pub user_id: Uuid,
    pub product_id: i64,
    pub product: Option<WishlistProduct>,
    pub created_at: DateTime<Utc>,
}

/// Input for saving a product to the wishlist
#[derive(Debug, Clone, Deserialize)]
pub struct AddToWishlist {
    pub product_id: i64,
}

/// Outcome of a wishlist add
#[derive(Debug, Clone, Serialize)]
pub struct WishlistAddResult {
    pub success: bool,
    /// `false` when the product was already on the wishlist
    pub created: bool,
    pub message: String,
    pub entry_id: i64,
}

/// A reviewer's profile page
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub reviews: Vec<GradedReview>,
    pub wishlist: Vec<WishlistEntry>,
    pub review_count: i64,
    pub average_score: Option<f64>,
    pub rank: UserRank,
    pub rank_color: &'static str,
    pub progress: RankProgress,
}

impl UserProfile {
    pub fn new(user_id: Uuid, reviews: Vec<GradedReview>, wishlist: Vec<WishlistEntry>) -> Self {
        let review_count = reviews.len() as i64;
        let scores: Vec<f64> = reviews.iter().map(|r| r.review.score()).collect();
        let progress = RankProgress::for_count(review_count);
        let rank = progress.rank;

        Self {
            user_id,
            reviews,
            wishlist,
            review_count,
            average_score: crate::models::average_score(&scores),
            rank,
            rank_color: rank.color().css_class(),
            progress,
        }
    }
}
