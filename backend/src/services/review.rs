//! Review submission and retrieval

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    GradedReview, RawReviewForm, Review, ReviewDetail, ReviewRow, Taxonomy, TerpeneProfile,
    REVIEW_COLUMNS,
};
use shared::{
    compute_score, score_to_decimal, validate_required_text, validate_review_input,
    validate_terpene_profile, validate_upc, CompositeScore, PaginatedResponse, Pagination,
    PaginationMeta, ReviewInput,
};

/// Review service for submitting and reading strain reviews
#[derive(Clone)]
pub struct ReviewService {
    db: PgPool,
}

/// A review form that passed validation, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReview {
    pub strain_name: String,
    pub producer: String,
    pub package_date: Option<NaiveDate>,
    pub taxonomy: Taxonomy,
    pub input: ReviewInput,
    pub score: CompositeScore,
    pub terpene_profile: Option<TerpeneProfile>,
    pub notes: Option<String>,
    pub upc_code: Option<String>,
}

/// Coerce, validate and score a submitted form
pub fn validate_review_form(form: &RawReviewForm) -> AppResult<ValidatedReview> {
    let strain_name = RawReviewForm::text(&form.strain_name).unwrap_or_default();
    validate_required_text(&strain_name)
        .map_err(|_| AppError::validation("strain_name", "Strain name is required"))?;

    let producer = RawReviewForm::text(&form.producer).unwrap_or_default();
    validate_required_text(&producer)
        .map_err(|_| AppError::validation("producer", "Producer is required"))?;

    let package_date = RawReviewForm::text(&form.package_date)
        .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| AppError::validation("package_date", "Package date must be YYYY-MM-DD"))?;

    let input = form.score_input();
    validate_review_input(&input).map_err(|(field, msg)| AppError::validation(field, msg))?;

    let terpene_profile = form.terpene_profile();
    if let Some(profile) = &terpene_profile {
        validate_terpene_profile(profile)
            .map_err(|msg| AppError::validation("terpene_profile", msg))?;
    }

    let upc_code = RawReviewForm::text(&form.upc_code);
    if let Some(code) = &upc_code {
        validate_upc(code).map_err(|msg| AppError::validation("upc_code", msg))?;
    }

    let score = compute_score(&input);

    Ok(ValidatedReview {
        strain_name,
        producer,
        package_date,
        taxonomy: form.taxonomy(),
        input,
        score,
        terpene_profile,
        notes: RawReviewForm::text(&form.notes),
        upc_code,
    })
}

impl ReviewService {
    /// Create a new ReviewService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Submit a review: coerce the form, score it and persist it
    pub async fn submit_review(&self, user_id: Uuid, form: RawReviewForm) -> AppResult<Review> {
        let review = validate_review_form(&form).map_err(|e| {
            tracing::warn!("Rejected review form: {}", e);
            e
        })?;

        tracing::debug!(
            strain = %review.strain_name,
            score = %review.score,
            "Computed composite score"
        );

        let terpene_json = review
            .terpene_profile
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let ratings = review.input.ratings;
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            INSERT INTO product_reviews (
                strain_name, producer, package_date, thc_percentage, terpene_percentage,
                taxonomy, flower_structure, trichome_density, trim, burn, ash_color,
                flavor, intensity, clarity, total_score, terpene_profile, notes,
                user_id, upc_code
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(&review.strain_name)
        .bind(&review.producer)
        .bind(review.package_date)
        .bind(review.input.thc_percentage)
        .bind(review.input.terpene_percentage)
        .bind(review.taxonomy.as_str())
        .bind(ratings.flower_structure)
        .bind(ratings.trichome_density)
        .bind(ratings.trim)
        .bind(ratings.burn)
        .bind(ratings.ash_color)
        .bind(ratings.flavor)
        .bind(ratings.intensity)
        .bind(ratings.clarity)
        .bind(score_to_decimal(review.score.value()))
        .bind(&terpene_json)
        .bind(&review.notes)
        .bind(user_id)
        .bind(&review.upc_code)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "upc_code"))?;

        tracing::info!(
            review_id = row.review_id,
            strain = %row.strain_name,
            "Review submitted"
        );

        Ok(row.into())
    }

    /// List reviews newest first
    pub async fn list_reviews(
        &self,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<GradedReview>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product_reviews")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {}
            FROM product_reviews
            ORDER BY created_at DESC, review_id DESC
            LIMIT $1 OFFSET $2
            "#,
            REVIEW_COLUMNS
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows
                .into_iter()
                .map(|row| GradedReview::from(Review::from(row)))
                .collect(),
            pagination: PaginationMeta::new(pagination, total.max(0) as u64),
        })
    }

    /// Get one review by ID
    pub async fn get_review(&self, review_id: i64) -> AppResult<Review> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {} FROM product_reviews WHERE review_id = $1",
            REVIEW_COLUMNS
        ))
        .bind(review_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review".to_string()))?;

        Ok(row.into())
    }

    /// Get one review with its score breakdown
    pub async fn get_review_detail(&self, review_id: i64) -> AppResult<ReviewDetail> {
        let review = self.get_review(review_id).await?;
        Ok(ReviewDetail::from(review))
    }

    /// Every review, oldest first
    pub async fn all_reviews(&self) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {} FROM product_reviews ORDER BY review_id",
            REVIEW_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    /// Reviews written by one user, newest first
    pub async fn reviews_by_user(&self, user_id: Uuid) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            SELECT {}
            FROM product_reviews
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
            REVIEW_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    /// Other reviews of the same strain, highest score first
    pub async fn related_reviews(
        &self,
        strain_name: &str,
        exclude_id: i64,
    ) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(&related_reviews_sql())
            .bind(strain_name)
            .bind(exclude_id)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }
}

/// Other reviews of exactly the same strain name, newest first
fn related_reviews_sql() -> String {
    format!(
        r#"
        SELECT {}
        FROM product_reviews
        WHERE strain_name = $1 AND review_id <> $2
        ORDER BY created_at DESC
        "#,
        REVIEW_COLUMNS
    )
}
