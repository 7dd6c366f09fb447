//! Star rating ↔ score conversion.
//!
//! The table is ordered from the highest tier down so that a scan for the
//! first threshold `<= score` always lands on the highest qualifying tier.

use crate::domain::model::RatingTier;

pub const MIN_STARS: i64 = 1;
pub const MAX_STARS: i64 = 5;

/// Score returned for a tier outside 1..=5.
pub const UNKNOWN_TIER_SCORE: i64 = 0;

pub const RATING_TIERS: [RatingTier; 5] = [
    RatingTier { tier: 5, score: 95, label: "Excellent" },
    RatingTier { tier: 4, score: 85, label: "Good" },
    RatingTier { tier: 3, score: 75, label: "Average" },
    RatingTier { tier: 2, score: 65, label: "Needs Improvement" },
    RatingTier { tier: 1, score: 50, label: "Unsatisfactory" },
];

pub fn tier_for(tier: i64) -> Option<&'static RatingTier> {
    RATING_TIERS.iter().find(|row| row.tier == tier)
}

/// 星等轉分數，未知星等回傳 0
pub fn star_to_score(tier: i64) -> i64 {
    tier_for(tier).map_or(UNKNOWN_TIER_SCORE, |row| row.score)
}

/// 分數轉星等，低於最低門檻時回傳 1 星
pub fn score_to_stars(score: i64) -> i64 {
    describe_score(score).tier
}

pub fn star_label(tier: i64) -> Option<&'static str> {
    tier_for(tier).map(|row| row.label)
}

/// Full table row for a score; scores below every threshold get the lowest tier.
pub fn describe_score(score: i64) -> RatingTier {
    RATING_TIERS
        .iter()
        .find(|row| score >= row.score)
        .copied()
        .unwrap_or(RATING_TIERS[RATING_TIERS.len() - 1])
}

/// Text rendering of the star widget, e.g. `★★★☆☆` for 3.
pub fn render_stars(tier: i64) -> String {
    let filled = tier.clamp(0, MAX_STARS) as usize;
    let empty = MAX_STARS as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_descending_and_complete() {
        let tiers: Vec<i64> = RATING_TIERS.iter().map(|row| row.tier).collect();
        assert_eq!(tiers, vec![5, 4, 3, 2, 1]);
        assert!(RATING_TIERS.windows(2).all(|w| w[0].score > w[1].score));
    }

    #[test]
    fn test_star_to_score() {
        assert_eq!(star_to_score(5), 95);
        assert_eq!(star_to_score(4), 85);
        assert_eq!(star_to_score(3), 75);
        assert_eq!(star_to_score(2), 65);
        assert_eq!(star_to_score(1), 50);
        assert_eq!(star_to_score(0), 0);
        assert_eq!(star_to_score(6), 0);
        assert_eq!(star_to_score(-3), 0);
    }

    #[test]
    fn test_score_to_stars_thresholds() {
        assert_eq!(score_to_stars(100), 5);
        assert_eq!(score_to_stars(95), 5);
        assert_eq!(score_to_stars(94), 4);
        assert_eq!(score_to_stars(85), 4);
        assert_eq!(score_to_stars(84), 3);
        assert_eq!(score_to_stars(75), 3);
        assert_eq!(score_to_stars(65), 2);
        assert_eq!(score_to_stars(64), 1);
        assert_eq!(score_to_stars(50), 1);
        assert_eq!(score_to_stars(0), 1);
    }

    #[test]
    fn test_star_label() {
        assert_eq!(star_label(5), Some("Excellent"));
        assert_eq!(star_label(2), Some("Needs Improvement"));
        assert_eq!(star_label(1), Some("Unsatisfactory"));
        assert_eq!(star_label(0), None);
        assert_eq!(star_label(9), None);
    }

    #[test]
    fn test_describe_score() {
        let row = describe_score(88);
        assert_eq!(row.tier, 4);
        assert_eq!(row.label, "Good");
        assert_eq!(describe_score(-10).tier, 1);
    }

    #[test]
    fn test_render_stars() {
        assert_eq!(render_stars(3), "★★★☆☆");
        assert_eq!(render_stars(5), "★★★★★");
        assert_eq!(render_stars(0), "☆☆☆☆☆");
        assert_eq!(render_stars(-1), "☆☆☆☆☆");
        assert_eq!(render_stars(12), "★★★★★");
    }
}
