//! Wishlist service

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{WishlistAddResult, WishlistEntry, WishlistRow};

#[derive(Clone)]
pub struct WishlistService {
    db: PgPool,
}

impl WishlistService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add a product to the user's wishlist; adding twice is not an error
    pub async fn add(&self, user_id: Uuid, product_id: i64) -> AppResult<WishlistAddResult> {
        let product_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_reviews WHERE review_id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        if !product_exists {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO user_wishlist (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        if let Some(entry_id) = inserted {
            tracing::info!(entry_id, product_id, "Added to wishlist");
            return Ok(added(entry_id));
        }

        let entry_id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM user_wishlist WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(already_present(entry_id))
    }

    /// Remove one of the user's wishlist entries
    pub async fn remove(&self, user_id: Uuid, entry_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM user_wishlist WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Wishlist entry".to_string()));
        }

        tracing::info!(entry_id, "Removed from wishlist");
        Ok(())
    }

    /// The user's wishlist, newest first
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<WishlistEntry>> {
        let rows = sqlx::query_as::<_, WishlistRow>(
            r#"
            SELECT w.id, w.user_id, w.product_id, w.created_at,
                   p.strain_name, p.producer, p.taxonomy, p.total_score
            FROM user_wishlist w
            LEFT JOIN product_reviews p ON p.review_id = w.product_id
            WHERE w.user_id = $1
            ORDER BY w.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(WishlistEntry::from).collect())
    }
}

fn added(entry_id: i64) -> WishlistAddResult {
    WishlistAddResult {
        success: true,
        created: true,
        message: "Added to wishlist".to_string(),
        entry_id,
    }
}

fn already_present(entry_id: i64) -> WishlistAddResult {
    WishlistAddResult {
        success: true,
        created: false,
        message: "Already in wishlist".to_string(),
        entry_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_add_is_success() {
        let first = added(4);
        let again = already_present(4);
        assert!(first.success && again.success);
        assert!(first.created);
        assert!(!again.created);
        assert_eq!(again.message, "Already in wishlist");
        assert_eq!(first.entry_id, again.entry_id);
    }
}
