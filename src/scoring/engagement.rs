use chrono::{DateTime, Utc};
use tracing::debug;

use super::engine::ScoringEngine;
use super::labels::ActivityType;
use crate::leads::{days_since, Activity};

/// Engagement is capped on the total, not per activity.
pub const MAX_ENGAGEMENT_SCORE: u32 = 100;

impl ScoringEngine {
    /// Recency-weighted engagement over a lead's activity history, in `[0, 100]`.
    ///
    /// Each activity contributes its base weight times the recency multiplier
    /// for its age in whole days. The rounded sum is capped at 100, so many
    /// moderate activities can reach the cap through volume alone.
    pub fn engagement_score(&self, activities: &[Activity], now: DateTime<Utc>) -> u32 {
        let total: f64 = activities
            .iter()
            .map(|activity| self.activity_contribution(activity, now))
            .sum();
        (total.round().max(0.0) as u32).min(MAX_ENGAGEMENT_SCORE)
    }

    /// Unrounded contribution of a single activity at `now`.
    pub fn activity_contribution(&self, activity: &Activity, now: DateTime<Utc>) -> f64 {
        let Some(kind) = ActivityType::from_label(&activity.activity_type) else {
            debug!(activity = %activity.activity_type, "unknown activity type contributes 0");
            return 0.0;
        };
        let base = self
            .config()
            .activity_weights
            .get(&kind)
            .copied()
            .unwrap_or(0);
        let days = days_since(activity.timestamp, now);
        f64::from(base) * self.recency_multiplier(days)
    }
}
