//! Grade and rank classification
//!
//! Scores map to one of fourteen letter grades and review counts map to one
//! of six reviewer ranks. Both tables are left-closed step functions
//! evaluated from the highest threshold down.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Letter grade of a composite score, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "BB")]
    BB,
    #[serde(rename = "BB+")]
    BBPlus,
    #[serde(rename = "BBB")]
    BBB,
    #[serde(rename = "BBB+")]
    BBBPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "AA")]
    AA,
    #[serde(rename = "AA+")]
    AAPlus,
    #[serde(rename = "AAA")]
    AAA,
    #[serde(rename = "AAA+")]
    AAAPlus,
    #[serde(rename = "AAAA")]
    AAAA,
    #[serde(rename = "AAAA+")]
    AAAAPlus,
}

/// Inclusive lower bounds, highest first
const GRADE_THRESHOLDS: [(f64, Grade); 13] = [
    (95.0, Grade::AAAAPlus),
    (90.0, Grade::AAAA),
    (85.0, Grade::AAAPlus),
    (80.0, Grade::AAA),
    (75.0, Grade::AAPlus),
    (70.0, Grade::AA),
    (65.0, Grade::APlus),
    (60.0, Grade::A),
    (55.0, Grade::BBBPlus),
    (50.0, Grade::BBB),
    (45.0, Grade::BBPlus),
    (40.0, Grade::BB),
    (35.0, Grade::BPlus),
];

impl Grade {
    /// Every grade, lowest first
    pub const ALL: [Grade; 14] = [
        Grade::B,
        Grade::BPlus,
        Grade::BB,
        Grade::BBPlus,
        Grade::BBB,
        Grade::BBBPlus,
        Grade::A,
        Grade::APlus,
        Grade::AA,
        Grade::AAPlus,
        Grade::AAA,
        Grade::AAAPlus,
        Grade::AAAA,
        Grade::AAAAPlus,
    ];

    pub fn from_score(score: f64) -> Self {
        score_to_grade(score)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::B => "B",
            Grade::BPlus => "B+",
            Grade::BB => "BB",
            Grade::BBPlus => "BB+",
            Grade::BBB => "BBB",
            Grade::BBBPlus => "BBB+",
            Grade::A => "A",
            Grade::APlus => "A+",
            Grade::AA => "AA",
            Grade::AAPlus => "AA+",
            Grade::AAA => "AAA",
            Grade::AAAPlus => "AAA+",
            Grade::AAAA => "AAAA",
            Grade::AAAAPlus => "AAAA+",
        }
    }

    /// Letter part of the grade, without the plus: "AA+" -> "AA"
    pub fn family(&self) -> &'static str {
        self.as_str().trim_end_matches('+')
    }

    /// Lowest score that earns this grade, `None` for the bottom grade
    pub fn min_score(&self) -> Option<f64> {
        GRADE_THRESHOLDS
            .iter()
            .find(|(_, grade)| grade == self)
            .map(|(threshold, _)| *threshold)
    }

    pub fn color(&self) -> DisplayColor {
        grade_to_display_color(self.as_str())
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grade: {0}")]
pub struct ParseGradeError(pub String);

impl std::str::FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_uppercase();
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str() == label)
            .ok_or_else(|| ParseGradeError(s.to_string()))
    }
}

/// Map a composite score to its grade.
///
/// Total over f64: scores above 100 are AAAA+, negative scores and NaN are B.
pub fn score_to_grade(score: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::B)
}

/// Display colour tag used for grade and rank badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayColor {
    Purple,
    Green,
    Emerald,
    Blue,
    Amber,
    Orange,
    Red,
    Gray,
}

impl DisplayColor {
    /// Text utility class used by the web front end
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayColor::Purple => "text-purple-600",
            DisplayColor::Green => "text-green-600",
            DisplayColor::Emerald => "text-emerald-600",
            DisplayColor::Blue => "text-blue-600",
            DisplayColor::Amber => "text-amber-600",
            DisplayColor::Orange => "text-orange-600",
            DisplayColor::Red => "text-red-600",
            DisplayColor::Gray => "text-gray-600",
        }
    }
}

impl std::fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// Colour of a grade label, by prefix. Longer prefixes are checked first so
/// that "AAAA+" is not taken for "AAA".
pub fn grade_to_display_color(grade: &str) -> DisplayColor {
    const PREFIXES: [(&str, DisplayColor); 6] = [
        ("AAAA", DisplayColor::Purple),
        ("AAA", DisplayColor::Green),
        ("AA", DisplayColor::Emerald),
        ("A", DisplayColor::Blue),
        ("BBB", DisplayColor::Amber),
        ("BB", DisplayColor::Orange),
    ];

    PREFIXES
        .iter()
        .find(|(prefix, _)| grade.starts_with(*prefix))
        .map(|(_, color)| *color)
        .unwrap_or(DisplayColor::Red)
}

/// Reviewer rank earned by cumulative review count, ordered lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UserRank {
    #[serde(rename = "Seedling")]
    Seedling,
    #[serde(rename = "Enthusiast")]
    Enthusiast,
    #[serde(rename = "Budtender")]
    Budtender,
    #[serde(rename = "Cannabis Connoisseur")]
    CannabisConnoisseur,
    #[serde(rename = "Head Cultivator")]
    HeadCultivator,
    #[serde(rename = "Master Grower")]
    MasterGrower,
}

const RANK_THRESHOLDS: [(i64, UserRank); 5] = [
    (100, UserRank::MasterGrower),
    (75, UserRank::HeadCultivator),
    (50, UserRank::CannabisConnoisseur),
    (25, UserRank::Budtender),
    (10, UserRank::Enthusiast),
];

impl UserRank {
    pub const ALL: [UserRank; 6] = [
        UserRank::Seedling,
        UserRank::Enthusiast,
        UserRank::Budtender,
        UserRank::CannabisConnoisseur,
        UserRank::HeadCultivator,
        UserRank::MasterGrower,
    ];

    pub fn from_review_count(count: i64) -> Self {
        review_count_to_rank(count)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRank::Seedling => "Seedling",
            UserRank::Enthusiast => "Enthusiast",
            UserRank::Budtender => "Budtender",
            UserRank::CannabisConnoisseur => "Cannabis Connoisseur",
            UserRank::HeadCultivator => "Head Cultivator",
            UserRank::MasterGrower => "Master Grower",
        }
    }

    /// Review count at which this rank is reached
    pub fn min_reviews(&self) -> i64 {
        RANK_THRESHOLDS
            .iter()
            .find(|(_, rank)| rank == self)
            .map(|(threshold, _)| *threshold)
            .unwrap_or(0)
    }

    pub fn next(&self) -> Option<UserRank> {
        UserRank::ALL
            .iter()
            .position(|rank| rank == self)
            .and_then(|idx| UserRank::ALL.get(idx + 1))
            .copied()
    }

    pub fn color(&self) -> DisplayColor {
        rank_to_display_color(self.as_str())
    }
}

impl std::fmt::Display for UserRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a review count to a reviewer rank. Negative counts are Seedling.
pub fn review_count_to_rank(count: i64) -> UserRank {
    RANK_THRESHOLDS
        .iter()
        .find(|(threshold, _)| count >= *threshold)
        .map(|(_, rank)| *rank)
        .unwrap_or(UserRank::Seedling)
}

/// Colour of a rank label, by exact name
pub fn rank_to_display_color(rank: &str) -> DisplayColor {
    match rank {
        "Master Grower" => DisplayColor::Purple,
        "Head Cultivator" => DisplayColor::Green,
        "Cannabis Connoisseur" => DisplayColor::Emerald,
        "Budtender" => DisplayColor::Blue,
        "Enthusiast" => DisplayColor::Amber,
        _ => DisplayColor::Gray,
    }
}

/// Progress of a reviewer towards the next rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankProgress {
    pub rank: UserRank,
    pub review_count: i64,
    /// `None` once the top rank is reached
    pub next_rank: Option<UserRank>,
    pub next_rank_at: Option<i64>,
    /// 0-100
    pub percent: f64,
}

impl RankProgress {
    pub fn for_count(review_count: i64) -> Self {
        let rank = review_count_to_rank(review_count);
        let next_rank = rank.next();
        let next_rank_at = next_rank.map(|r| r.min_reviews());

        let percent = match next_rank_at {
            Some(target) => (review_count.max(0) as f64 / target as f64 * 100.0).min(100.0),
            None => 100.0,
        };

        Self {
            rank,
            review_count,
            next_rank,
            next_rank_at,
            percent,
        }
    }
}

/// Descriptive verdict shown next to a score on the review detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreVerdict {
    #[serde(rename = "Exceptional")]
    Exceptional,
    #[serde(rename = "Outstanding")]
    Outstanding,
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Average")]
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
}

impl ScoreVerdict {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            ScoreVerdict::Exceptional
        } else if score >= 90.0 {
            ScoreVerdict::Outstanding
        } else if score >= 85.0 {
            ScoreVerdict::Excellent
        } else if score >= 80.0 {
            ScoreVerdict::VeryGood
        } else if score >= 70.0 {
            ScoreVerdict::Good
        } else if score >= 60.0 {
            ScoreVerdict::AboveAverage
        } else if score >= 50.0 {
            ScoreVerdict::Average
        } else {
            ScoreVerdict::BelowAverage
        }
    }
}

impl std::fmt::Display for ScoreVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreVerdict::Exceptional => write!(f, "Exceptional"),
            ScoreVerdict::Outstanding => write!(f, "Outstanding"),
            ScoreVerdict::Excellent => write!(f, "Excellent"),
            ScoreVerdict::VeryGood => write!(f, "Very Good"),
            ScoreVerdict::Good => write!(f, "Good"),
            ScoreVerdict::AboveAverage => write!(f, "Above Average"),
            ScoreVerdict::Average => write!(f, "Average"),
            ScoreVerdict::BelowAverage => write!(f, "Below Average"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(score_to_grade(95.0), Grade::AAAAPlus);
        assert_eq!(score_to_grade(94.99), Grade::AAAA);
        assert_eq!(score_to_grade(35.0), Grade::BPlus);
        assert_eq!(score_to_grade(34.99), Grade::B);
    }

    #[test]
    fn test_every_threshold_is_left_closed() {
        for (threshold, grade) in GRADE_THRESHOLDS {
            assert_eq!(score_to_grade(threshold), grade);
            assert!(score_to_grade(threshold - 0.01) < grade);
        }
    }

    #[test]
    fn test_grade_out_of_range() {
        assert_eq!(score_to_grade(150.0), Grade::AAAAPlus);
        assert_eq!(score_to_grade(-20.0), Grade::B);
        assert_eq!(score_to_grade(f64::NAN), Grade::B);
    }

    #[test]
    fn test_grade_labels_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }
        assert_eq!("aaa+".parse::<Grade>(), Ok(Grade::AAAPlus));
        assert!("C".parse::<Grade>().is_err());
    }

    #[test]
    fn test_grade_family() {
        assert_eq!(Grade::AAPlus.family(), "AA");
        assert_eq!(Grade::AA.family(), "AA");
        assert_eq!(Grade::BPlus.family(), "B");
    }

    #[test]
    fn test_grade_min_score() {
        assert_eq!(Grade::AAAAPlus.min_score(), Some(95.0));
        assert_eq!(Grade::BPlus.min_score(), Some(35.0));
        assert_eq!(Grade::B.min_score(), None);
    }

    #[test]
    fn test_grade_color_prefix_precedence() {
        assert_eq!(grade_to_display_color("AAAA+"), DisplayColor::Purple);
        assert_eq!(grade_to_display_color("AAAA"), DisplayColor::Purple);
        assert_eq!(grade_to_display_color("AAA"), DisplayColor::Green);
        assert_ne!(grade_to_display_color("AAAA"), grade_to_display_color("AAA"));
        assert_eq!(grade_to_display_color("AA+"), DisplayColor::Emerald);
        assert_eq!(grade_to_display_color("A+"), DisplayColor::Blue);
        assert_eq!(grade_to_display_color("BBB+"), DisplayColor::Amber);
        assert_eq!(grade_to_display_color("BB"), DisplayColor::Orange);
        assert_eq!(grade_to_display_color("B+"), DisplayColor::Red);
        assert_eq!(grade_to_display_color("B"), DisplayColor::Red);
    }

    #[test]
    fn test_grade_serializes_as_label() {
        let json = serde_json::to_string(&Grade::AAAPlus).unwrap();
        assert_eq!(json, "\"AAA+\"");
    }

    #[test]
    fn test_rank_boundaries() {
        assert_eq!(review_count_to_rank(100), UserRank::MasterGrower);
        assert_eq!(review_count_to_rank(99), UserRank::HeadCultivator);
        assert_eq!(review_count_to_rank(75), UserRank::HeadCultivator);
        assert_eq!(review_count_to_rank(50), UserRank::CannabisConnoisseur);
        assert_eq!(review_count_to_rank(25), UserRank::Budtender);
        assert_eq!(review_count_to_rank(10), UserRank::Enthusiast);
        assert_eq!(review_count_to_rank(9), UserRank::Seedling);
        assert_eq!(review_count_to_rank(-3), UserRank::Seedling);
    }

    #[test]
    fn test_rank_color_exact_match() {
        assert_eq!(rank_to_display_color("Master Grower"), DisplayColor::Purple);
        assert_eq!(rank_to_display_color("Enthusiast"), DisplayColor::Amber);
        assert_eq!(rank_to_display_color("Seedling"), DisplayColor::Gray);
        assert_eq!(rank_to_display_color("Master"), DisplayColor::Gray);
    }

    #[test]
    fn test_rank_progress() {
        let progress = RankProgress::for_count(30);
        assert_eq!(progress.rank, UserRank::Budtender);
        assert_eq!(progress.next_rank, Some(UserRank::CannabisConnoisseur));
        assert_eq!(progress.next_rank_at, Some(50));
        assert!((progress.percent - 60.0).abs() < 1e-9);

        let seedling = RankProgress::for_count(0);
        assert_eq!(seedling.next_rank_at, Some(10));
        assert_eq!(seedling.percent, 0.0);

        let top = RankProgress::for_count(240);
        assert_eq!(top.next_rank, None);
        assert_eq!(top.percent, 100.0);
    }

    #[test]
    fn test_score_verdict() {
        assert_eq!(ScoreVerdict::from_score(95.0), ScoreVerdict::Exceptional);
        assert_eq!(ScoreVerdict::from_score(79.99), ScoreVerdict::Good);
        assert_eq!(ScoreVerdict::from_score(49.32).to_string(), "Below Average");
    }
}
