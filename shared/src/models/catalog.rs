//! Product catalog and strain aggregate models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::grading::Grade;
use crate::models::{GradedReview, Taxonomy, TerpeneProfile};

/// Score assigned to a catalog product before it has been reviewed
pub const DEFAULT_PRODUCT_SCORE: f64 = 50.0;

/// Input for adding a product to the catalog
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 200, message = "Strain name is required"))]
    pub strain_name: String,
    #[validate(length(min = 1, max = 200, message = "Producer is required"))]
    pub producer: String,
    pub package_date: Option<chrono::NaiveDate>,
    #[validate(range(min = 0.0, max = 100.0, message = "THC percentage must be between 0 and 100"))]
    pub thc_percentage: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "Terpene percentage must be between 0 and 100"))]
    pub terpene_percentage: Option<f64>,
    #[serde(default)]
    pub taxonomy: Taxonomy,
    pub upc_code: Option<String>,
    pub terpene_profile: Option<TerpeneProfile>,
    pub description: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// A product with the other reviews of the same strain
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product: GradedReview,
    pub reviews: Vec<GradedReview>,
}

/// Result of a barcode lookup
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UpcLookup {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
}

/// Averages across every review of one strain from one producer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StrainAverage {
    pub strain_name: String,
    pub producer: String,
    pub taxonomy: Taxonomy,
    pub thc_percentage: Option<f64>,
    pub terpene_percentage: Option<f64>,
    pub review_count: i64,
    pub average_score: f64,
    pub grade: Grade,
    pub grade_color: &'static str,
}

impl StrainAverage {
    pub fn new(
        strain_name: String,
        producer: String,
        taxonomy: Taxonomy,
        thc_percentage: Option<f64>,
        terpene_percentage: Option<f64>,
        review_count: i64,
        average_score: f64,
    ) -> Self {
        let average_score = crate::scoring::round_to_hundredths(average_score);
        let grade = Grade::from_score(average_score);
        Self {
            strain_name,
            producer,
            taxonomy,
            thc_percentage,
            terpene_percentage,
            review_count,
            average_score,
            grade,
            grade_color: grade.color().css_class(),
        }
    }
}

/// Sort order of the strain database
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrainSort {
    /// Highest average first
    #[default]
    #[serde(alias = "score")]
    Grade,
    Name,
    Producer,
    Reviews,
    Thc,
    Terpenes,
}

/// Filters over the strain database
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrainQuery {
    /// Case-insensitive match on strain name or producer
    pub search: Option<String>,
    /// Grade family, e.g. "AA" matches AA and AA+
    pub grade: Option<String>,
    /// Lowest grade to include, e.g. "AA" keeps AA and everything above.
    /// Unknown labels do not filter.
    pub min_grade: Option<String>,
    pub taxonomy: Option<Taxonomy>,
    #[serde(default)]
    pub sort: StrainSort,
}

impl StrainQuery {
    fn matches(&self, strain: &StrainAverage) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                strain.strain_name.to_lowercase().contains(&term)
                    || strain.producer.to_lowercase().contains(&term)
            }
        };

        let grade_ok = match self.grade.as_deref().map(str::trim) {
            None | Some("") | Some("all") => true,
            Some(family) => strain.grade.family().eq_ignore_ascii_case(family),
        };

        let min_grade_ok = match self.min_grade.as_deref().map(str::parse::<Grade>) {
            Some(Ok(min)) => strain.grade >= min,
            _ => true,
        };

        let taxonomy_ok = self.taxonomy.map_or(true, |t| strain.taxonomy == t);

        search_ok && grade_ok && min_grade_ok && taxonomy_ok
    }

    /// Filter and sort strain averages
    pub fn apply(&self, strains: Vec<StrainAverage>) -> Vec<StrainAverage> {
        let mut filtered: Vec<StrainAverage> =
            strains.into_iter().filter(|s| self.matches(s)).collect();

        match self.sort {
            StrainSort::Grade => {
                filtered.sort_by(|a, b| b.average_score.total_cmp(&a.average_score))
            }
            StrainSort::Name => filtered.sort_by(|a, b| {
                a.strain_name.to_lowercase().cmp(&b.strain_name.to_lowercase())
            }),
            StrainSort::Producer => filtered
                .sort_by(|a, b| a.producer.to_lowercase().cmp(&b.producer.to_lowercase())),
            StrainSort::Reviews => filtered.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            StrainSort::Thc => filtered.sort_by(|a, b| {
                let (a, b) = (a.thc_percentage.unwrap_or(0.0), b.thc_percentage.unwrap_or(0.0));
                b.total_cmp(&a)
            }),
            StrainSort::Terpenes => filtered.sort_by(|a, b| {
                let (a, b) = (
                    a.terpene_percentage.unwrap_or(0.0),
                    b.terpene_percentage.unwrap_or(0.0),
                );
                b.total_cmp(&a)
            }),
        }

        filtered
    }
}

/// One row of the bundled example strain catalog
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleStrain {
    pub strain_name: String,
    pub producer: String,
    pub taxonomy: Taxonomy,
    pub thc_percentage: f64,
    pub terpene_percentage: f64,
    pub flower_structure: i32,
    pub trichome_density: i32,
    pub trim: i32,
    pub burn: i32,
    pub ash_color: i32,
    pub flavor: i32,
    pub intensity: i32,
    pub clarity: i32,
    pub notes: Option<String>,
}

impl ExampleStrain {
    pub fn score_input(&self) -> crate::scoring::ReviewInput {
        crate::scoring::ReviewInput::new(
            self.thc_percentage,
            self.terpene_percentage,
            crate::scoring::SubRatings {
                flower_structure: self.flower_structure,
                trichome_density: self.trichome_density,
                trim: self.trim,
                burn: self.burn,
                ash_color: self.ash_color,
                flavor: self.flavor,
                intensity: self.intensity,
                clarity: self.clarity,
            },
        )
    }
}

/// Outcome of an example strain import
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
