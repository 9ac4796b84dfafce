//! Database models for the Strain Review Platform
//!
//! Re-exports models from the shared crate and adds the row types sqlx
//! decodes query results into.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

pub use shared::models::*;
pub use shared::RawReviewForm;
use shared::SubRatings;

/// Column list matching `ReviewRow`, for `SELECT`/`RETURNING` clauses
pub const REVIEW_COLUMNS: &str = r#"
    review_id, strain_name, producer, package_date, thc_percentage, terpene_percentage,
    taxonomy, flower_structure, trichome_density, trim, burn, ash_color, flavor,
    intensity, clarity, total_score, terpene_profile, notes, user_id, upc_code,
    description, image_url, created_at, updated_at
"#;

/// Database row for `product_reviews`
#[derive(Debug, sqlx::FromRow)]
pub struct ReviewRow {
    pub review_id: i64,
    pub strain_name: String,
    pub producer: String,
    pub package_date: Option<NaiveDate>,
    pub thc_percentage: Option<f64>,
    pub terpene_percentage: Option<f64>,
    pub taxonomy: String,
    pub flower_structure: i32,
    pub trichome_density: i32,
    pub trim: i32,
    pub burn: i32,
    pub ash_color: i32,
    pub flavor: i32,
    pub intensity: i32,
    pub clarity: i32,
    pub total_score: Decimal,
    pub terpene_profile: Option<serde_json::Value>,
    pub notes: Option<String>,
    pub user_id: Option<Uuid>,
    pub upc_code: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        let terpene_profile: Option<TerpeneProfile> = row
            .terpene_profile
            .and_then(|v| serde_json::from_value(v).ok());

        Review {
            review_id: row.review_id,
            strain_name: row.strain_name,
            producer: row.producer,
            package_date: row.package_date,
            thc_percentage: row.thc_percentage,
            terpene_percentage: row.terpene_percentage,
            taxonomy: row.taxonomy.parse().unwrap_or_default(),
            ratings: SubRatings {
                flower_structure: row.flower_structure,
                trichome_density: row.trichome_density,
                trim: row.trim,
                burn: row.burn,
                ash_color: row.ash_color,
                flavor: row.flavor,
                intensity: row.intensity,
                clarity: row.clarity,
            },
            total_score: row.total_score,
            terpene_profile,
            notes: row.notes,
            user_id: row.user_id,
            upc_code: row.upc_code,
            description: row.description,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Aggregate row for the strain database
#[derive(Debug, sqlx::FromRow)]
pub struct StrainAverageRow {
    pub strain_name: String,
    pub producer: String,
    pub taxonomy: String,
    pub thc_percentage: Option<f64>,
    pub terpene_percentage: Option<f64>,
    pub review_count: i64,
    pub average_score: Decimal,
}

impl From<StrainAverageRow> for StrainAverage {
    fn from(row: StrainAverageRow) -> Self {
        StrainAverage::new(
            row.strain_name,
            row.producer,
            row.taxonomy.parse().unwrap_or_default(),
            row.thc_percentage,
            row.terpene_percentage,
            row.review_count,
            shared::decimal_to_f64(row.average_score),
        )
    }
}

/// Wishlist row joined with its product
#[derive(Debug, sqlx::FromRow)]
pub struct WishlistRow {
    pub id: i64,
    pub user_id: Uuid,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
    pub strain_name: Option<String>,
    pub producer: Option<String>,
    pub taxonomy: Option<String>,
    pub total_score: Option<Decimal>,
}

impl From<WishlistRow> for WishlistEntry {
    fn from(row: WishlistRow) -> Self {
        let product = match (row.strain_name, row.producer, row.total_score) {
            (Some(strain_name), Some(producer), Some(total_score)) => Some(WishlistProduct::new(
                row.product_id,
                strain_name,
                producer,
                row.taxonomy
                    .and_then(|t| t.parse().ok())
                    .unwrap_or_default(),
                total_score,
            )),
            _ => None,
        };

        WishlistEntry {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            product,
            created_at: row.created_at,
        }
    }
}
