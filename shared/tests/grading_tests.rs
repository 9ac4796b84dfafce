//! Grade and rank classification tests

use proptest::prelude::*;

use shared::{
    grade_distribution, grade_to_display_color, rank_to_display_color, review_count_to_rank,
    score_to_grade, DisplayColor, Grade, RankProgress, UserRank,
};

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_every_threshold_is_left_closed() {
        for grade in Grade::ALL {
            if let Some(min) = grade.min_score() {
                assert_eq!(score_to_grade(min), grade, "at {}", min);
                assert!(score_to_grade(min - 0.01) < grade, "below {}", min);
            }
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(score_to_grade(100.0), Grade::AAAAPlus);
        assert_eq!(score_to_grade(-21.92), Grade::B);
        assert_eq!(score_to_grade(0.0), Grade::B);
        assert_eq!(score_to_grade(f64::NAN), Grade::B);
    }

    #[test]
    fn test_grade_colors_follow_tier_prefix() {
        assert_eq!(grade_to_display_color("AAAA+"), DisplayColor::Purple);
        assert_eq!(grade_to_display_color("AAA"), DisplayColor::Green);
        assert_eq!(grade_to_display_color("AA+"), DisplayColor::Emerald);
        assert_eq!(grade_to_display_color("A"), DisplayColor::Blue);
        assert_eq!(grade_to_display_color("BBB+"), DisplayColor::Amber);
        assert_eq!(grade_to_display_color("BB"), DisplayColor::Orange);
        assert_eq!(grade_to_display_color("B+"), DisplayColor::Red);
        assert_eq!(grade_to_display_color(""), DisplayColor::Red);
    }

    #[test]
    fn test_rank_table() {
        let cases = [
            (0, UserRank::Seedling),
            (9, UserRank::Seedling),
            (10, UserRank::Enthusiast),
            (24, UserRank::Enthusiast),
            (25, UserRank::Budtender),
            (50, UserRank::CannabisConnoisseur),
            (75, UserRank::HeadCultivator),
            (99, UserRank::HeadCultivator),
            (100, UserRank::MasterGrower),
            (5000, UserRank::MasterGrower),
        ];
        for (count, rank) in cases {
            assert_eq!(review_count_to_rank(count), rank, "count {}", count);
        }
    }

    #[test]
    fn test_rank_colors() {
        assert_eq!(rank_to_display_color("Master Grower").css_class(), "text-purple-600");
        assert_eq!(rank_to_display_color("Seedling").css_class(), "text-gray-600");
        assert_eq!(rank_to_display_color("Wizard").css_class(), "text-gray-600");
    }

    #[test]
    fn test_progress_toward_next_rank() {
        let progress = RankProgress::for_count(30);
        assert_eq!(progress.rank, UserRank::Budtender);
        assert_eq!(progress.next_rank, Some(UserRank::CannabisConnoisseur));
        assert_eq!(progress.next_rank_at, Some(50));
        assert_eq!(progress.percent, 60.0);

        let top = RankProgress::for_count(150);
        assert_eq!(top.next_rank, None);
        assert_eq!(top.percent, 100.0);
    }
}

fn tier_index(color: DisplayColor) -> usize {
    match color {
        DisplayColor::Red => 0,
        DisplayColor::Orange => 1,
        DisplayColor::Amber => 2,
        DisplayColor::Blue => 3,
        DisplayColor::Emerald => 4,
        DisplayColor::Green => 5,
        DisplayColor::Purple => 6,
        DisplayColor::Gray => 0,
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// A higher score never earns a lower grade
        #[test]
        fn prop_grade_monotonic(a in -50.0f64..150.0, b in -50.0f64..150.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(score_to_grade(lo) <= score_to_grade(hi));
        }

        /// Colour tier never decreases with score
        #[test]
        fn prop_color_monotonic(a in -50.0f64..150.0, b in -50.0f64..150.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_color = grade_to_display_color(score_to_grade(lo).as_str());
            let hi_color = grade_to_display_color(score_to_grade(hi).as_str());
            prop_assert!(tier_index(lo_color) <= tier_index(hi_color));
        }

        /// Grade labels round-trip through parsing
        #[test]
        fn prop_grade_label_parses(score in -50.0f64..150.0) {
            let grade = score_to_grade(score);
            prop_assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }

        /// More reviews never lowers a rank
        #[test]
        fn prop_rank_monotonic(a in 0i64..10_000, b in 0i64..10_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(review_count_to_rank(lo) <= review_count_to_rank(hi));
        }

        /// Progress is always a percentage
        #[test]
        fn prop_progress_bounded(count in 0i64..10_000) {
            let progress = RankProgress::for_count(count);
            prop_assert!((0.0..=100.0).contains(&progress.percent));
        }

        /// Every score lands in exactly one bucket of the distribution
        #[test]
        fn prop_distribution_counts_every_score(scores in prop::collection::vec(-30.0f64..100.0, 0..60)) {
            let distribution = grade_distribution(&scores);
            let total: u64 = distribution.values().sum();
            prop_assert_eq!(total, scores.len() as u64);
        }
    }
}
