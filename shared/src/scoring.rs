//! Composite review score calculation
//!
//! A fixed linear model over THC %, terpene % and eight 1-10 sub-ratings,
//! scaled onto a 0-100 range. The coefficients are published and stored
//! scores depend on them, so the evaluation order below is part of the
//! contract: changing it changes the last bit of historical results.

use serde::{Deserialize, Serialize};

/// Intercept of the raw linear model
pub const INTERCEPT: f64 = 0.598;

/// Weight applied to terpene percentage
pub const TERPENE_WEIGHT: f64 = 5.046;
/// Weight applied to THC percentage
pub const THC_WEIGHT: f64 = 0.994;
pub const CLARITY_WEIGHT: f64 = 0.937;
pub const INTENSITY_WEIGHT: f64 = 1.057;
pub const TRICHOME_DENSITY_WEIGHT: f64 = 1.002;
pub const FLOWER_STRUCTURE_WEIGHT: f64 = 0.906;
pub const TRIM_WEIGHT: f64 = 1.037;
pub const FLAVOR_WEIGHT: f64 = 1.021;
pub const BURN_WEIGHT: f64 = 1.033;
pub const ASH_COLOR_WEIGHT: f64 = 0.945;

/// Slope of the raw-to-100 scaling
pub const SCALE_FACTOR: f64 = 0.702;
/// Offset of the raw-to-100 scaling
pub const SCALE_OFFSET: f64 = 0.00006;

/// Upper bound of a composite score. There is no lower bound.
pub const MAX_SCORE: f64 = 100.0;

/// Neutral value substituted for a missing or unparseable sub-rating
pub const DEFAULT_RATING: i32 = 5;
/// Neutral value substituted for a missing or unparseable percentage
pub const DEFAULT_PERCENTAGE: f64 = 0.0;

/// The eight 1-10 quality dimensions of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubRatings {
    pub flower_structure: i32,
    pub trichome_density: i32,
    pub trim: i32,
    pub burn: i32,
    pub ash_color: i32,
    pub flavor: i32,
    pub intensity: i32,
    pub clarity: i32,
}

impl SubRatings {
    /// All eight dimensions set to the same value
    pub fn uniform(value: i32) -> Self {
        Self {
            flower_structure: value,
            trichome_density: value,
            trim: value,
            burn: value,
            ash_color: value,
            flavor: value,
            intensity: value,
            clarity: value,
        }
    }

    /// Field name and value pairs, in declaration order
    pub fn named(&self) -> [(&'static str, i32); 8] {
        [
            ("flower_structure", self.flower_structure),
            ("trichome_density", self.trichome_density),
            ("trim", self.trim),
            ("burn", self.burn),
            ("ash_color", self.ash_color),
            ("flavor", self.flavor),
            ("intensity", self.intensity),
            ("clarity", self.clarity),
        ]
    }
}

impl Default for SubRatings {
    fn default() -> Self {
        Self::uniform(DEFAULT_RATING)
    }
}

/// Typed inputs of the score calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub thc_percentage: f64,
    pub terpene_percentage: f64,
    pub ratings: SubRatings,
}

impl ReviewInput {
    pub fn new(thc_percentage: f64, terpene_percentage: f64, ratings: SubRatings) -> Self {
        Self {
            thc_percentage,
            terpene_percentage,
            ratings,
        }
    }
}

impl Default for ReviewInput {
    fn default() -> Self {
        Self::new(DEFAULT_PERCENTAGE, DEFAULT_PERCENTAGE, SubRatings::default())
    }
}

/// A composite score: rounded to two decimals, at most 100
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeScore(f64);

impl CompositeScore {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn grade(self) -> crate::grading::Grade {
        crate::grading::score_to_grade(self.0)
    }
}

impl From<CompositeScore> for f64 {
    fn from(score: CompositeScore) -> Self {
        score.0
    }
}

impl std::fmt::Display for CompositeScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Round half toward positive infinity.
///
/// This is the rounding primitive historical scores were produced with:
/// `2.5 -> 3`, `-2.5 -> -2`.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round to two decimal places via `round_half_up(x * 100) / 100`
pub fn round_to_hundredths(x: f64) -> f64 {
    round_half_up(x * 100.0) / 100.0
}

/// Raw (unscaled) value of the linear model
pub fn raw_score(input: &ReviewInput) -> f64 {
    let r = &input.ratings;
    INTERCEPT
        + TERPENE_WEIGHT * input.terpene_percentage
        + THC_WEIGHT * input.thc_percentage
        + CLARITY_WEIGHT * f64::from(r.clarity)
        + INTENSITY_WEIGHT * f64::from(r.intensity)
        + TRICHOME_DENSITY_WEIGHT * f64::from(r.trichome_density)
        + FLOWER_STRUCTURE_WEIGHT * f64::from(r.flower_structure)
        + TRIM_WEIGHT * f64::from(r.trim)
        + FLAVOR_WEIGHT * f64::from(r.flavor)
        + BURN_WEIGHT * f64::from(r.burn)
        + ASH_COLOR_WEIGHT * f64::from(r.ash_color)
}

/// Map a raw model value onto the 0-100 scale (unrounded, unclamped)
pub fn scale_raw(raw: f64) -> f64 {
    SCALE_FACTOR * raw - SCALE_OFFSET
}

/// Compute the composite score of a review
pub fn compute_score(input: &ReviewInput) -> CompositeScore {
    let scaled = scale_raw(raw_score(input));
    CompositeScore(round_to_hundredths(scaled).min(MAX_SCORE))
}

/// One weighted term of the linear model
#[derive(Debug, Clone, Serialize)]
pub struct ScoreContribution {
    pub factor: &'static str,
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Per-term view of a score calculation, for display
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<ScoreContribution>,
    pub raw: f64,
    pub scaled: f64,
    pub total: CompositeScore,
}

impl ScoreBreakdown {
    pub fn for_input(input: &ReviewInput) -> Self {
        let r = &input.ratings;
        let terms = [
            ("terpene_percentage", input.terpene_percentage, TERPENE_WEIGHT),
            ("thc_percentage", input.thc_percentage, THC_WEIGHT),
            ("clarity", f64::from(r.clarity), CLARITY_WEIGHT),
            ("intensity", f64::from(r.intensity), INTENSITY_WEIGHT),
            ("trichome_density", f64::from(r.trichome_density), TRICHOME_DENSITY_WEIGHT),
            ("flower_structure", f64::from(r.flower_structure), FLOWER_STRUCTURE_WEIGHT),
            ("trim", f64::from(r.trim), TRIM_WEIGHT),
            ("flavor", f64::from(r.flavor), FLAVOR_WEIGHT),
            ("burn", f64::from(r.burn), BURN_WEIGHT),
            ("ash_color", f64::from(r.ash_color), ASH_COLOR_WEIGHT),
        ];

        let contributions = terms
            .into_iter()
            .map(|(factor, value, weight)| ScoreContribution {
                factor,
                value,
                weight,
                contribution: weight * value,
            })
            .collect();

        let raw = raw_score(input);
        Self {
            contributions,
            raw,
            scaled: scale_raw(raw),
            total: compute_score(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(thc: f64, terpene: f64, rating: i32) -> ReviewInput {
        ReviewInput::new(thc, terpene, SubRatings::uniform(rating))
    }

    #[test]
    fn test_reference_vector() {
        assert_eq!(compute_score(&input(20.0, 2.0, 5)).value(), 49.32);
    }

    #[test]
    fn test_neutral_defaults() {
        assert_eq!(compute_score(&ReviewInput::default()).value(), 28.28);
    }

    #[test]
    fn test_mixed_ratings() {
        let ratings = SubRatings {
            flower_structure: 7,
            trichome_density: 6,
            trim: 8,
            burn: 9,
            ash_color: 7,
            flavor: 8,
            intensity: 6,
            clarity: 7,
        };
        let score = compute_score(&ReviewInput::new(18.5, 1.2, ratings));
        assert_eq!(score.value(), 58.04);
    }

    #[test]
    fn test_clamped_at_max() {
        assert_eq!(compute_score(&input(40.0, 15.0, 10)).value(), 100.0);
    }

    #[test]
    fn test_negative_not_floored() {
        assert_eq!(compute_score(&input(-40.0, 0.0, 1)).value(), -21.92);
    }

    #[test]
    fn test_round_half_up_tie_break() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn test_round_to_hundredths_binary_representation() {
        // 1.005 * 100 == 100.49999999999999
        assert_eq!(round_to_hundredths(1.005), 1.0);
        assert_eq!(round_to_hundredths(49.32246), 49.32);
    }

    #[test]
    fn test_breakdown_matches_score() {
        let review = input(20.0, 2.0, 5);
        let breakdown = ScoreBreakdown::for_input(&review);

        assert_eq!(breakdown.contributions.len(), 10);
        assert_eq!(breakdown.total, compute_score(&review));
        assert_eq!(breakdown.raw, raw_score(&review));

        let thc = breakdown
            .contributions
            .iter()
            .find(|c| c.factor == "thc_percentage")
            .unwrap();
        assert!((thc.contribution - 19.88).abs() < 1e-9);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(compute_score(&input(0.0, 0.0, 1)).to_string(), "5.99");
    }
}
