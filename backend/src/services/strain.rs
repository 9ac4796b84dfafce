//! Strain database: per-strain averages and the example catalog import

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ExampleStrain, ImportSummary, StrainAverage, StrainAverageRow, StrainQuery};
use shared::{compute_score, score_to_decimal, validate_review_input};

/// Example strains bundled with the server
const EXAMPLE_STRAINS_CSV: &str = include_str!("../../data/example_strains.csv");

#[derive(Clone)]
pub struct StrainService {
    db: PgPool,
}

/// Parse and validate example strain rows
pub fn parse_example_strains(data: &str) -> AppResult<Vec<ExampleStrain>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut strains = Vec::new();

    for (line, record) in reader.deserialize::<ExampleStrain>().enumerate() {
        let strain = record.map_err(|e| {
            AppError::Internal(format!("Example strain row {} is invalid: {}", line + 1, e))
        })?;
        validate_review_input(&strain.score_input()).map_err(|(field, msg)| {
            AppError::Internal(format!(
                "Example strain {} has invalid {}: {}",
                strain.strain_name, field, msg
            ))
        })?;
        strains.push(strain);
    }

    Ok(strains)
}

impl StrainService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Averages per strain and producer, filtered and sorted
    pub async fn list_strains(&self, query: &StrainQuery) -> AppResult<Vec<StrainAverage>> {
        let rows = sqlx::query_as::<_, StrainAverageRow>(
            r#"
            SELECT strain_name,
                   producer,
                   MODE() WITHIN GROUP (ORDER BY taxonomy) AS taxonomy,
                   AVG(thc_percentage) AS thc_percentage,
                   AVG(terpene_percentage) AS terpene_percentage,
                   COUNT(*) AS review_count,
                   AVG(total_score) AS average_score
            FROM product_reviews
            GROUP BY strain_name, producer
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let strains = rows.into_iter().map(StrainAverage::from).collect();
        Ok(query.apply(strains))
    }

    /// Import the bundled example strains, skipping ones already present
    pub async fn import_examples(&self, user_id: Uuid) -> AppResult<ImportSummary> {
        let strains = parse_example_strains(EXAMPLE_STRAINS_CSV)?;
        let mut summary = ImportSummary {
            imported: 0,
            skipped: 0,
        };

        let mut tx = self.db.begin().await?;

        for strain in &strains {
            let exists = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM product_reviews
                    WHERE LOWER(strain_name) = LOWER($1) AND LOWER(producer) = LOWER($2)
                )
                "#,
            )
            .bind(&strain.strain_name)
            .bind(&strain.producer)
            .fetch_one(&mut *tx)
            .await?;

            if exists {
                summary.skipped += 1;
                continue;
            }

            let input = strain.score_input();
            let score = compute_score(&input);
            let ratings = input.ratings;

            sqlx::query(
                r#"
                INSERT INTO product_reviews (
                    strain_name, producer, thc_percentage, terpene_percentage, taxonomy,
                    flower_structure, trichome_density, trim, burn, ash_color,
                    flavor, intensity, clarity, total_score, notes, user_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
                "#,
            )
            .bind(&strain.strain_name)
            .bind(&strain.producer)
            .bind(input.thc_percentage)
            .bind(input.terpene_percentage)
            .bind(strain.taxonomy.as_str())
            .bind(ratings.flower_structure)
            .bind(ratings.trichome_density)
            .bind(ratings.trim)
            .bind(ratings.burn)
            .bind(ratings.ash_color)
            .bind(ratings.flavor)
            .bind(ratings.intensity)
            .bind(ratings.clarity)
            .bind(score_to_decimal(score.value()))
            .bind(&strain.notes)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

            summary.imported += 1;
        }

        tx.commit().await?;

        tracing::info!(
            imported = summary.imported,
            skipped = summary.skipped,
            "Example strains imported"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Taxonomy;

    #[test]
    fn test_bundled_examples_parse() {
        let strains = parse_example_strains(EXAMPLE_STRAINS_CSV).unwrap();
        assert_eq!(strains.len(), 10);
        assert_eq!(strains[0].strain_name, "Blue Dream");
        assert_eq!(strains[1].taxonomy, Taxonomy::Indica);
    }

    #[test]
    fn test_blank_notes_read_as_none() {
        let strains = parse_example_strains(EXAMPLE_STRAINS_CSV).unwrap();
        let jack = strains.iter().find(|s| s.strain_name == "Jack Herer").unwrap();
        assert!(jack.notes.is_none());
    }

    #[test]
    fn test_bundled_examples_score_in_range() {
        for strain in parse_example_strains(EXAMPLE_STRAINS_CSV).unwrap() {
            let score = compute_score(&strain.score_input()).value();
            assert!((0.0..=100.0).contains(&score), "{} scored {}", strain.strain_name, score);
        }
    }

    #[test]
    fn test_out_of_range_row_rejected() {
        let data = "strain_name,producer,taxonomy,thc_percentage,terpene_percentage,flower_structure,trichome_density,trim,burn,ash_color,flavor,intensity,clarity,notes\n\
                    Bad,Acme,Hybrid,20.0,2.0,0,5,5,5,5,5,5,5,\n";
        assert!(parse_example_strains(data).is_err());
    }

    #[test]
    fn test_malformed_row_rejected() {
        let data = "strain_name,producer\nOnly,Two\n";
        assert!(parse_example_strains(data).is_err());
    }
}
