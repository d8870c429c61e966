use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::ScoringEngine;
use super::labels::{ActivityType, LeadStatus, Temperature};
use crate::leads::LeadIntake;

/// Score fields carried on a lead record.
///
/// The engine never stores these; the owning service keeps them and uses the
/// helpers below so deltas are clamped and the band stays in sync.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadScoreState {
    pub score: u32,
    pub last_activity_date: DateTime<Utc>,
    pub temperature: Temperature,
}

impl LeadScoreState {
    pub fn new(score: u32, last_activity_date: DateTime<Utc>, engine: &ScoringEngine) -> Self {
        let score = score.min(100);
        Self {
            score,
            last_activity_date,
            temperature: engine.classify(score),
        }
    }

    /// State for a lead created at `at`.
    pub fn from_intake(intake: &LeadIntake, at: DateTime<Utc>, engine: &ScoringEngine) -> Self {
        Self::new(engine.initial_score(intake), at, engine)
    }

    /// Add a signed delta, clamp to `[0, 100]`, re-derive the band.
    pub fn apply_delta(&mut self, delta: i32, engine: &ScoringEngine) -> u32 {
        self.score = (i64::from(self.score) + i64::from(delta)).clamp(0, 100) as u32;
        self.temperature = engine.classify(self.score);
        self.score
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_activity_date = at;
    }

    /// Score an activity that just happened and reset the inactivity clock.
    pub fn record_activity(
        &mut self,
        activity: ActivityType,
        at: DateTime<Utc>,
        engine: &ScoringEngine,
    ) -> u32 {
        self.touch(at);
        self.apply_delta(engine.activity_delta(activity), engine)
    }

    pub fn record_status_change(
        &mut self,
        from: LeadStatus,
        to: LeadStatus,
        engine: &ScoringEngine,
    ) -> u32 {
        self.apply_delta(engine.status_delta(from, to), engine)
    }

    /// Apply the inactivity decay as of `now`.
    pub fn decay(&mut self, now: DateTime<Utc>, engine: &ScoringEngine) -> u32 {
        self.score = engine.decayed_score(self.score, self.last_activity_date, now);
        self.temperature = engine.classify(self.score);
        self.score
    }
}
