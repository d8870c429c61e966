use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use lead_scorer::leads::{Activity, LeadIntake};
use lead_scorer::scoring::{ActivityType, ScoringEngine, Timeline};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn label_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Referral".to_string())),
        Just(Some("Walk-in".to_string())),
        Just(Some("Billboard".to_string())),
        "[a-zA-Z -]{0,12}".prop_map(Some),
    ]
}

fn timeline_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (0..Timeline::ALL.len()).prop_map(|i| Some(Timeline::ALL[i].label().to_string())),
        "[a-z ]{0,10}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn test_initial_score_in_range(
        source in label_strategy(),
        budget in prop::option::of(-1_000.0f64..5_000_000.0),
        timeline in timeline_strategy(),
        has_email in any::<bool>(),
        has_phone in any::<bool>(),
        has_address in any::<bool>(),
        preferred in prop::option::of("[a-z]{1,6}"),
        interests in prop::collection::vec("[a-z]{1,5}", 0..8),
    ) {
        let engine = ScoringEngine::default();
        let intake = LeadIntake {
            id: None,
            source,
            budget,
            timeline,
            has_email,
            has_phone,
            has_address,
            preferred_contact: preferred,
            property_interest: interests,
        };
        prop_assert!(engine.initial_score(&intake) <= 100);
    }

    #[test]
    fn test_budget_points_monotonic(a in 0.0f64..2_000_000.0, b in 0.0f64..2_000_000.0) {
        let engine = ScoringEngine::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(engine.budget_points(Some(low)) <= engine.budget_points(Some(high)));
    }

    #[test]
    fn test_decay_respects_floor(score in 0u32..=100, idle_days in 0i64..2_000) {
        let engine = ScoringEngine::default();
        let decayed = engine.decayed_score(score, now() - Duration::days(idle_days), now());
        if idle_days > 7 {
            prop_assert!(decayed >= 10);
        } else {
            prop_assert_eq!(decayed, score);
        }
        if score >= 10 {
            prop_assert!(decayed <= score);
        }
    }

    #[test]
    fn test_decay_non_increasing_in_idle_time(score in 10u32..=100, d1 in 0i64..500, d2 in 0i64..500) {
        let engine = ScoringEngine::default();
        let (short, long) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
        let recent = engine.decayed_score(score, now() - Duration::days(short), now());
        let older = engine.decayed_score(score, now() - Duration::days(long), now());
        prop_assert!(older <= recent);
    }

    #[test]
    fn test_engagement_capped(
        entries in prop::collection::vec((0..ActivityType::ALL.len(), -5i64..90), 0..60)
    ) {
        let engine = ScoringEngine::default();
        let activities: Vec<Activity> = entries
            .into_iter()
            .map(|(i, age)| Activity::new(ActivityType::ALL[i].key(), now() - Duration::days(age)))
            .collect();
        prop_assert!(engine.engagement_score(&activities, now()) <= 100);
    }

    #[test]
    fn test_classify_bands_ordered(a in 0u32..=100, b in 0u32..=100) {
        let engine = ScoringEngine::default();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        // Hot < Warm < Cold in declaration order
        prop_assert!(engine.classify(high) <= engine.classify(low));
    }
}
