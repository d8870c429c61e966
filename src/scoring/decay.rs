//! Inactivity decay.
//!
//! Decay is applied to whatever score is currently stored, so repeated
//! scheduled runs without a fresh activity compound on the already-decayed
//! value. There is no separately tracked baseline.

use chrono::{DateTime, Utc};
use tracing::warn;

use super::engine::ScoringEngine;
use super::error::ScoringError;
use crate::leads::days_since;

impl ScoringEngine {
    /// Decayed score for a lead inactive since `last_activity`.
    ///
    /// Inside the grace period the score is returned unchanged. Past it the
    /// score loses `daily_decay_rate` per day, geometrically, and is floored at
    /// `minimum_score`, so a stored score below the floor is lifted to it once
    /// the grace period has passed. Out-of-range input is logged and returned
    /// unchanged.
    pub fn decayed_score(
        &self,
        current: u32,
        last_activity: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> u32 {
        match self.try_decayed_score(i64::from(current), last_activity, now, None) {
            Ok(score) => score,
            Err(e) => {
                warn!(operation = "decay", error = %e, "leaving score unchanged");
                current
            }
        }
    }

    /// Strict variant: rejects stored scores outside `[0, 100]`.
    pub fn try_decayed_score(
        &self,
        current: i64,
        last_activity: DateTime<Utc>,
        now: DateTime<Utc>,
        lead_id: Option<&str>,
    ) -> Result<u32, ScoringError> {
        let current = checked_score(current, "decay", lead_id)?;
        let decay = &self.config().decay;

        let days = days_since(last_activity, now);
        let grace = u64::from(decay.start_after_days);
        if days <= grace {
            return Ok(current);
        }

        let multiplier = (1.0 - decay.daily_decay_rate).powf((days - grace) as f64);
        let decayed = (f64::from(current) * multiplier).round() as u32;
        Ok(decayed.max(decay.minimum_score))
    }
}

/// Stored scores must already sit in `[0, 100]`.
pub(crate) fn checked_score(
    score: i64,
    operation: &'static str,
    lead_id: Option<&str>,
) -> Result<u32, ScoringError> {
    if (0..=100).contains(&score) {
        Ok(score as u32)
    } else {
        Err(ScoringError::input(
            operation,
            lead_id,
            format!("score {} is outside 0..=100", score),
        ))
    }
}
