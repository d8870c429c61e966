use super::config::ScoringConfig;
use super::labels::{ActivityType, LeadStatus, Timeline};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Source labels
    for label in config.source_weights.keys() {
        if label.trim().is_empty() {
            errors.push("scoring.source_weights: source label must not be empty".to_string());
        }
    }

    // Budget ladder
    if config.budget_tiers.is_empty() {
        errors.push("scoring.budget_tiers: at least one tier is required".to_string());
    }
    let last_tier = config.budget_tiers.len().saturating_sub(1);
    let mut previous_bound: Option<u64> = None;
    for (i, tier) in config.budget_tiers.iter().enumerate() {
        match tier.below {
            Some(bound) => {
                if let Some(prev) = previous_bound {
                    if bound <= prev {
                        errors.push(format!(
                            "scoring.budget_tiers[{}].below: {} must be greater than previous bound {}",
                            i, bound, prev
                        ));
                    }
                }
                previous_bound = Some(bound);
            }
            None if i != last_tier => {
                errors.push(format!(
                    "scoring.budget_tiers[{}].below: only the last tier may omit an upper bound",
                    i
                ));
            }
            None => {}
        }
    }

    // Lookup tables must be total over their label sets
    for timeline in Timeline::ALL {
        if !config.timeline_weights.contains_key(&timeline) {
            errors.push(format!(
                "scoring.timeline_weights: missing entry for '{}'",
                timeline.key()
            ));
        }
    }
    for activity in ActivityType::ALL {
        if !config.activity_weights.contains_key(&activity) {
            errors.push(format!(
                "scoring.activity_weights: missing entry for '{}'",
                activity.key()
            ));
        }
    }
    for status in LeadStatus::ALL {
        if !config.status_weights.contains_key(&status) {
            errors.push(format!(
                "scoring.status_weights: missing entry for '{}'",
                status.key()
            ));
        }
    }

    // Recency buckets
    let buckets = &config.recency_modifiers;
    if buckets.is_empty() {
        errors.push("scoring.recency_modifiers: at least one bucket is required".to_string());
    } else {
        if !buckets.iter().any(|b| b.days.matches(0)) {
            errors.push("scoring.recency_modifiers: no bucket matches day 0 (today)".to_string());
        }
        if let Some(last) = buckets.last() {
            if !last.days.is_open_ended() {
                errors.push(format!(
                    "scoring.recency_modifiers[{}].days: last bucket must be open-ended (>N or >=N), got '{}'",
                    buckets.len() - 1,
                    last.days
                ));
            }
        }
    }
    for (i, bucket) in buckets.iter().enumerate() {
        if !bucket.multiplier.is_finite() || bucket.multiplier < 0.0 {
            errors.push(format!(
                "scoring.recency_modifiers[{}].multiplier: must be a non-negative number",
                i
            ));
        }
        if i > 0 && bucket.multiplier > buckets[i - 1].multiplier {
            errors.push(format!(
                "scoring.recency_modifiers[{}].multiplier: {} exceeds the previous bucket's {}; multipliers must not increase with age",
                i,
                bucket.multiplier,
                buckets[i - 1].multiplier
            ));
        }
    }

    // Decay
    let rate = config.decay.daily_decay_rate;
    if !(rate > 0.0 && rate < 1.0) {
        errors.push(format!(
            "scoring.decay.daily_decay_rate: {} must be strictly between 0 and 1",
            rate
        ));
    }
    if config.decay.minimum_score > 100 {
        errors.push("scoring.decay.minimum_score: must be at most 100".to_string());
    }

    // Temperature bands
    let thresholds = &config.temperature;
    if thresholds.hot <= thresholds.warm {
        errors.push(format!(
            "scoring.temperature: hot ({}) must be greater than warm ({})",
            thresholds.hot, thresholds.warm
        ));
    }
    if thresholds.hot > 100 {
        errors.push("scoring.temperature.hot: must be at most 100".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
