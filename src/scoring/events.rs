//! Score deltas for logged events.
//!
//! Both operations return a signed delta. Applying it and clamping the result
//! to `[0, 100]` is up to the caller (see [`LeadScoreState::apply_delta`]).
//!
//! [`LeadScoreState::apply_delta`]: super::state::LeadScoreState::apply_delta

use tracing::debug;

use super::engine::ScoringEngine;
use super::labels::{ActivityType, LeadStatus};

impl ScoringEngine {
    /// Delta for an activity logged as it happens, so always scored with the
    /// "today" recency multiplier.
    pub fn activity_delta(&self, activity: ActivityType) -> i32 {
        let base = self
            .config()
            .activity_weights
            .get(&activity)
            .copied()
            .unwrap_or(0);
        (f64::from(base) * self.today_multiplier()).round() as i32
    }

    /// Same as [`activity_delta`](Self::activity_delta) for a free-text label.
    /// Unknown activity types score 0.
    pub fn activity_delta_for_label(&self, label: &str) -> i32 {
        match ActivityType::from_label(label) {
            Some(activity) => self.activity_delta(activity),
            None => {
                debug!(activity = label, "unknown activity type scores 0");
                0
            }
        }
    }

    /// `weight(to) - weight(from)`; may be negative.
    pub fn status_delta(&self, from: LeadStatus, to: LeadStatus) -> i32 {
        self.status_weight(Some(to)) - self.status_weight(Some(from))
    }

    /// Status delta for free-text labels. Unknown labels weigh 0.
    pub fn status_delta_for_labels(&self, from: &str, to: &str) -> i32 {
        let from_status = LeadStatus::from_label(from);
        let to_status = LeadStatus::from_label(to);
        if from_status.is_none() {
            debug!(status = from, "unknown lead status weighs 0");
        }
        if to_status.is_none() {
            debug!(status = to, "unknown lead status weighs 0");
        }
        self.status_weight(to_status) - self.status_weight(from_status)
    }

    fn status_weight(&self, status: Option<LeadStatus>) -> i32 {
        status
            .and_then(|s| self.config().status_weights.get(&s).copied())
            .unwrap_or(0)
    }
}
