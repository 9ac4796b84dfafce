//! Dashboard statistics

use std::collections::BTreeMap;

use serde::Serialize;

use crate::grading::Grade;
use crate::scoring::round_to_hundredths;

/// Number of scores falling into each grade; grades with no scores are omitted
pub type GradeDistribution = BTreeMap<Grade, u64>;

pub fn grade_distribution(scores: &[f64]) -> GradeDistribution {
    let mut distribution = GradeDistribution::new();
    for score in scores {
        *distribution.entry(Grade::from_score(*score)).or_insert(0) += 1;
    }
    distribution
}

/// Mean of the scores rounded to two decimals, `None` when empty
pub fn average_score(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().sum();
    Some(round_to_hundredths(sum / scores.len() as f64))
}

/// Highest-scored strain in the catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TopStrain {
    pub strain_name: String,
    pub total_score: f64,
    pub grade: Grade,
}

/// Home page statistics
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub review_count: i64,
    pub average_score: Option<f64>,
    pub average_grade: Option<Grade>,
    pub top_strain: Option<TopStrain>,
    pub grade_distribution: GradeDistribution,
}

impl DashboardStats {
    /// Build statistics from every stored score and the best strain
    pub fn new(scores: &[f64], top: Option<(String, f64)>) -> Self {
        let average_score = average_score(scores);
        Self {
            review_count: scores.len() as i64,
            average_score,
            average_grade: average_score.map(Grade::from_score),
            top_strain: top.map(|(strain_name, total_score)| TopStrain {
                strain_name,
                total_score,
                grade: Grade::from_score(total_score),
            }),
            grade_distribution: grade_distribution(scores),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_score() {
        assert_eq!(average_score(&[]), None);
        assert_eq!(average_score(&[80.0, 90.0]), Some(85.0));
        assert_eq!(average_score(&[10.0, 10.0, 10.01]), Some(10.0));
    }

    #[test]
    fn test_grade_distribution() {
        let distribution = grade_distribution(&[95.0, 96.5, 49.32, 12.0]);
        assert_eq!(distribution.get(&Grade::AAAAPlus), Some(&2));
        assert_eq!(distribution.get(&Grade::BBPlus), Some(&1));
        assert_eq!(distribution.get(&Grade::B), Some(&1));
        assert_eq!(distribution.get(&Grade::A), None);
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = DashboardStats::new(&[70.0, 80.0], Some(("OG Kush".to_string(), 80.0)));
        assert_eq!(stats.review_count, 2);
        assert_eq!(stats.average_score, Some(75.0));
        assert_eq!(stats.average_grade, Some(Grade::AAPlus));
        assert_eq!(stats.top_strain.unwrap().grade, Grade::AAA);

        let json = serde_json::to_value(&DashboardStats::new(&[70.0], None)).unwrap();
        assert_eq!(json["grade_distribution"]["AA"], 1);
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = DashboardStats::new(&[], None);
        assert_eq!(stats.review_count, 0);
        assert!(stats.average_grade.is_none());
        assert!(stats.grade_distribution.is_empty());
    }
}
