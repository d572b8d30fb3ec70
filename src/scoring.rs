use rand::Rng;
use serde::{Deserialize, Serialize};

pub const HOT_THRESHOLD: i64 = 80;
pub const WARM_THRESHOLD: i64 = 50;

/// Placeholder scores are drawn from `[MIN_RANDOM_SCORE, MAX_RANDOM_SCORE)`.
pub const MIN_RANDOM_SCORE: i64 = 40;
pub const MAX_RANDOM_SCORE: i64 = 100;

pub const HOT_LABEL: &str = "Hot Lead";
pub const WARM_LABEL: &str = "Warm";
pub const COLD_LABEL: &str = "Cold";

/// Display color paired with a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Green,
    Amber,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreLabel {
    pub label: &'static str,
    pub color: ColorToken,
}

/// Maps a lead score to its tier.
pub fn score_label(score: i64) -> ScoreLabel {
    if score >= HOT_THRESHOLD {
        ScoreLabel {
            label: HOT_LABEL,
            color: ColorToken::Green,
        }
    } else if score >= WARM_THRESHOLD {
        ScoreLabel {
            label: WARM_LABEL,
            color: ColorToken::Amber,
        }
    } else {
        ScoreLabel {
            label: COLD_LABEL,
            color: ColorToken::Red,
        }
    }
}

/// Stand-in for a real scoring model.
pub fn random_score() -> i64 {
    rand::rng().random_range(MIN_RANDOM_SCORE..MAX_RANDOM_SCORE)
}

/// Color for a label string, if it is one of the known tiers.
pub fn color_for_label(label: &str) -> Option<ColorToken> {
    match label {
        HOT_LABEL => Some(ColorToken::Green),
        WARM_LABEL => Some(ColorToken::Amber),
        COLD_LABEL => Some(ColorToken::Red),
        _ => None,
    }
}
