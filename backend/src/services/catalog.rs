//! Product catalog service

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{
    GradedReview, NewProduct, ProductDetail, Review, ReviewRow, UpcLookup, DEFAULT_PRODUCT_SCORE,
    REVIEW_COLUMNS,
};
use crate::services::ReviewService;
use shared::{score_to_decimal, validate_terpene_profile, validate_upc, SubRatings};

/// Catalog service for products awaiting review
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Normalise and validate a product's barcode
fn normalize_upc(upc: Option<&str>) -> AppResult<Option<String>> {
    match upc.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(code) => {
            validate_upc(code).map_err(|msg| AppError::validation("upc_code", msg))?;
            Ok(Some(code.to_string()))
        }
    }
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Add a product with neutral ratings and the default score
    pub async fn add_product(&self, user_id: Uuid, input: NewProduct) -> AppResult<Review> {
        input.validate()?;

        let upc_code = normalize_upc(input.upc_code.as_deref())?;
        if let Some(profile) = &input.terpene_profile {
            validate_terpene_profile(profile)
                .map_err(|msg| AppError::validation("terpene_profile", msg))?;
        }

        // Check the barcode up front for a clean 409; the unique index
        // still catches concurrent inserts
        if let Some(code) = &upc_code {
            if self.lookup_upc(code).await?.found {
                tracing::warn!("Rejected product with existing UPC {}", code);
                return Err(AppError::DuplicateEntry("upc_code".to_string()));
            }
        }

        let terpene_json = input
            .terpene_profile
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let ratings = SubRatings::default();
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            r#"
            INSERT INTO product_reviews (
                strain_name, producer, package_date, thc_percentage, terpene_percentage,
                taxonomy, flower_structure, trichome_density, trim, burn, ash_color,
                flavor, intensity, clarity, total_score, terpene_profile, user_id,
                upc_code, description, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(input.strain_name.trim())
        .bind(input.producer.trim())
        .bind(input.package_date)
        .bind(input.thc_percentage)
        .bind(input.terpene_percentage)
        .bind(input.taxonomy.as_str())
        .bind(ratings.flower_structure)
        .bind(ratings.trichome_density)
        .bind(ratings.trim)
        .bind(ratings.burn)
        .bind(ratings.ash_color)
        .bind(ratings.flavor)
        .bind(ratings.intensity)
        .bind(ratings.clarity)
        .bind(score_to_decimal(DEFAULT_PRODUCT_SCORE))
        .bind(&terpene_json)
        .bind(user_id)
        .bind(&upc_code)
        .bind(&input.description)
        .bind(&input.image_url)
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_unique_violation(e, "upc_code"))?;

        tracing::info!(
            product_id = row.review_id,
            strain = %row.strain_name,
            "Product added to catalog"
        );

        Ok(row.into())
    }

    /// Get a product with the other reviews of the same strain
    pub async fn get_product(&self, product_id: i64) -> AppResult<ProductDetail> {
        let row = sqlx::query_as::<_, ReviewRow>(&format!(
            "SELECT {} FROM product_reviews WHERE review_id = $1",
            REVIEW_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let product = Review::from(row);
        let related = ReviewService::new(self.db.clone())
            .related_reviews(&product.strain_name, product.review_id)
            .await?;

        Ok(ProductDetail {
            product: GradedReview::from(product),
            reviews: related.into_iter().map(GradedReview::from).collect(),
        })
    }

    /// Look up a product by barcode
    pub async fn lookup_upc(&self, upc_code: &str) -> AppResult<UpcLookup> {
        let product_id = sqlx::query_scalar::<_, i64>(
            "SELECT review_id FROM product_reviews WHERE upc_code = $1 LIMIT 1",
        )
        .bind(upc_code.trim())
        .fetch_optional(&self.db)
        .await?;

        Ok(UpcLookup {
            found: product_id.is_some(),
            product_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_upc() {
        assert_eq!(normalize_upc(None).unwrap(), None);
        assert_eq!(normalize_upc(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_upc(Some(" 012345678905 ")).unwrap().as_deref(),
            Some("012345678905")
        );
        assert!(matches!(
            normalize_upc(Some("12-34")),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_default_product_score_grades_bbb() {
        assert_eq!(
            shared::score_to_grade(DEFAULT_PRODUCT_SCORE),
            shared::Grade::BBB
        );
    }
}
