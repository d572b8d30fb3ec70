/// Property-based tests using proptest
/// Tests invariants of the scoring rule and label reconciliation
use market_ai_suite::core::leads::reconcile;
use market_ai_suite::core::models::Lead;
use market_ai_suite::core::scoring::{score_label, ColorToken};
use proptest::prelude::*;

fn unlabeled(score: i64) -> Lead {
    Lead {
        name: "n".to_string(),
        company: "c".to_string(),
        budget: None,
        history: None,
        score,
        label: None,
        extra: Default::default(),
    }
}

// Property: tiers partition the whole score range
proptest! {
    #[test]
    fn hot_iff_at_least_80(score in -1_000i64..1_000) {
        prop_assert_eq!(score_label(score).label == "Hot Lead", score >= 80);
    }

    #[test]
    fn warm_iff_between_50_and_80(score in -1_000i64..1_000) {
        prop_assert_eq!(score_label(score).label == "Warm", (50..80).contains(&score));
    }

    #[test]
    fn cold_iff_below_50(score in -1_000i64..1_000) {
        prop_assert_eq!(score_label(score).label == "Cold", score < 50);
    }

    #[test]
    fn color_tracks_label(score in 0i64..=100) {
        let tier = score_label(score);
        let expected = match tier.label {
            "Hot Lead" => ColorToken::Green,
            "Warm" => ColorToken::Amber,
            _ => ColorToken::Red,
        };
        prop_assert_eq!(tier.color, expected);
    }
}

// Property: read-time backfill always agrees with the scoring rule
proptest! {
    #[test]
    fn reconcile_backfill_matches_rule(score in 0i64..=100) {
        let scored = reconcile(unlabeled(score));
        prop_assert_eq!(scored.lead.label.as_deref(), Some(score_label(score).label));
        prop_assert_eq!(scored.color, score_label(score).color);
    }

    #[test]
    fn reconcile_keeps_stored_labels(score in 0i64..=100, label in "[A-Za-z ]{1,20}") {
        prop_assume!(!label.trim().is_empty());
        let mut lead = unlabeled(score);
        lead.label = Some(label.clone());
        prop_assert_eq!(reconcile(lead).lead.label, Some(label));
    }
}
