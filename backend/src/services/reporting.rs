//! Dashboard statistics and review export

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{DashboardStats, Review};
use shared::decimal_to_f64;

#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// One review flattened to a CSV row
#[derive(Debug, Serialize)]
pub struct ReviewCsvRow {
    pub review_id: i64,
    pub strain_name: String,
    pub producer: String,
    pub package_date: Option<NaiveDate>,
    pub taxonomy: String,
    pub thc_percentage: Option<f64>,
    pub terpene_percentage: Option<f64>,
    pub flower_structure: i32,
    pub trichome_density: i32,
    pub trim: i32,
    pub burn: i32,
    pub ash_color: i32,
    pub flavor: i32,
    pub intensity: i32,
    pub clarity: i32,
    pub total_score: Decimal,
    pub grade: String,
    pub notes: Option<String>,
    pub upc_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Review> for ReviewCsvRow {
    fn from(review: &Review) -> Self {
        let r = review.ratings;
        Self {
            review_id: review.review_id,
            strain_name: review.strain_name.clone(),
            producer: review.producer.clone(),
            package_date: review.package_date,
            taxonomy: review.taxonomy.to_string(),
            thc_percentage: review.thc_percentage,
            terpene_percentage: review.terpene_percentage,
            flower_structure: r.flower_structure,
            trichome_density: r.trichome_density,
            trim: r.trim,
            burn: r.burn,
            ash_color: r.ash_color,
            flavor: r.flavor,
            intensity: r.intensity,
            clarity: r.clarity,
            total_score: review.total_score,
            grade: review.grade().to_string(),
            notes: review.notes.clone(),
            upc_code: review.upc_code.clone(),
            created_at: review.created_at,
        }
    }
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Review count, average, top strain and grade distribution
    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let scores: Vec<f64> =
            sqlx::query_scalar::<_, Decimal>("SELECT total_score FROM product_reviews")
                .fetch_all(&self.db)
                .await?
                .into_iter()
                .map(decimal_to_f64)
                .collect();

        let top = sqlx::query_as::<_, (String, Decimal)>(
            r#"
            SELECT strain_name, total_score
            FROM product_reviews
            ORDER BY total_score DESC, created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?
        .map(|(name, score)| (name, decimal_to_f64(score)));

        Ok(DashboardStats::new(&scores, top))
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    /// All reviews as CSV
    pub fn reviews_to_csv(reviews: &[Review]) -> AppResult<String> {
        let rows: Vec<ReviewCsvRow> = reviews.iter().map(ReviewCsvRow::from).collect();
        Self::export_to_csv(&rows)
    }
}
