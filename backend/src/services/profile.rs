//! User profile: own reviews, wishlist and rank

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{GradedReview, UserProfile};
use crate::services::{ReviewService, WishlistService};

#[derive(Clone)]
pub struct ProfileService {
    db: PgPool,
}

impl ProfileService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let reviews = ReviewService::new(self.db.clone())
            .reviews_by_user(user_id)
            .await?;
        let wishlist = WishlistService::new(self.db.clone()).list(user_id).await?;

        let profile = UserProfile::new(
            user_id,
            reviews.into_iter().map(GradedReview::from).collect(),
            wishlist,
        );

        tracing::debug!(
            review_count = profile.review_count,
            rank = %profile.rank,
            "Loaded profile"
        );

        Ok(profile)
    }
}
