//! Scheduled decay pass over many leads.
//!
//! Produces an update plan only; persisting it is the caller's job. Each lead
//! is independent, so a malformed record is skipped and reported without
//! affecting the rest of the batch.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::engine::ScoringEngine;
use super::error::ScoringError;
use super::labels::Temperature;
use crate::leads::LeadRecord;

/// A score that changed during recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub lead_id: String,
    pub old_score: u32,
    pub new_score: u32,
    pub temperature: Temperature,
}

/// A lead that could not be recalculated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLead {
    pub lead_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecalcReport {
    /// Leads examined, including skipped ones
    pub total: usize,
    pub updates: Vec<ScoreUpdate>,
    pub skipped: Vec<SkippedLead>,
}

impl RecalcReport {
    fn from_outcomes(outcomes: Vec<Result<Option<ScoreUpdate>, SkippedLead>>) -> Self {
        let mut report = RecalcReport {
            total: outcomes.len(),
            ..RecalcReport::default()
        };
        for outcome in outcomes {
            match outcome {
                Ok(Some(update)) => report.updates.push(update),
                Ok(None) => {}
                Err(skipped) => report.skipped.push(skipped),
            }
        }
        report
    }

    /// Fold leads rejected before recalculation (e.g. undecodable rows) into
    /// the report.
    pub fn with_skipped(mut self, skipped: Vec<SkippedLead>) -> Self {
        self.total += skipped.len();
        self.skipped.extend(skipped);
        self
    }
}

impl ScoringEngine {
    /// Decay every lead against `now` and return only the changed scores.
    pub fn recalculate(&self, leads: &[LeadRecord], now: DateTime<Utc>) -> RecalcReport {
        let outcomes = leads
            .iter()
            .map(|lead| self.recalculate_one(lead, now))
            .collect();
        self.finish_batch(RecalcReport::from_outcomes(outcomes))
    }

    /// Parallel [`recalculate`](Self::recalculate). Output order matches input order.
    pub fn recalculate_par(&self, leads: &[LeadRecord], now: DateTime<Utc>) -> RecalcReport {
        let outcomes = leads
            .par_iter()
            .map(|lead| self.recalculate_one(lead, now))
            .collect();
        self.finish_batch(RecalcReport::from_outcomes(outcomes))
    }

    fn recalculate_one(
        &self,
        lead: &LeadRecord,
        now: DateTime<Utc>,
    ) -> Result<Option<ScoreUpdate>, SkippedLead> {
        self.try_recalculate_one(lead, now).map_err(|e| {
            warn!(operation = "recalculate", lead_id = %lead.id, error = %e, "skipping lead");
            SkippedLead {
                lead_id: lead.id.clone(),
                reason: match e {
                    ScoringError::Input { reason, .. } => reason,
                    other => other.to_string(),
                },
            }
        })
    }

    fn try_recalculate_one(
        &self,
        lead: &LeadRecord,
        now: DateTime<Utc>,
    ) -> Result<Option<ScoreUpdate>, ScoringError> {
        let score = lead.score.ok_or_else(|| {
            ScoringError::input("recalculate", Some(&lead.id), "missing score")
        })?;
        let reference = lead.reference_date().ok_or_else(|| {
            ScoringError::input(
                "recalculate",
                Some(&lead.id),
                "missing both lastActivityDate and createdAt",
            )
        })?;

        let new_score = self.try_decayed_score(score, reference, now, Some(&lead.id))?;
        // try_decayed_score has range-checked `score`
        let old_score = score as u32;
        if new_score == old_score {
            return Ok(None);
        }

        Ok(Some(ScoreUpdate {
            lead_id: lead.id.clone(),
            old_score,
            new_score,
            temperature: self.classify(new_score),
        }))
    }

    fn finish_batch(&self, report: RecalcReport) -> RecalcReport {
        info!(
            total_leads = report.total,
            updated_count = report.updates.len(),
            skipped_count = report.skipped.len(),
            "bulk score recalculation completed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn sample_lead(id: &str, score: i64, inactive_days: i64) -> LeadRecord {
        LeadRecord {
            id: id.to_string(),
            score: Some(score),
            last_activity_date: Some(now() - Duration::days(inactive_days)),
            created_at: Some(now() - Duration::days(365)),
        }
    }

    #[test]
    fn test_no_updates_inside_grace_period() {
        let engine = ScoringEngine::default();
        let leads = vec![sample_lead("a", 90, 0), sample_lead("b", 50, 3), sample_lead("c", 20, 7)];
        let report = engine.recalculate(&leads, now());
        assert_eq!(report.total, 3);
        assert!(report.updates.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_only_changed_scores_reported() {
        let engine = ScoringEngine::default();
        let leads = vec![
            sample_lead("fresh", 90, 1),
            sample_lead("stale", 100, 8),
            sample_lead("floor", 10, 60),
        ];
        let report = engine.recalculate(&leads, now());
        assert_eq!(
            report.updates,
            vec![ScoreUpdate {
                lead_id: "stale".to_string(),
                old_score: 100,
                new_score: 98,
                temperature: Temperature::Hot,
            }]
        );
    }

    #[test]
    fn test_temperature_reflects_new_score() {
        let engine = ScoringEngine::default();
        // 72 * 0.98^10 = 58.8
        let report = engine.recalculate(&[sample_lead("cooling", 72, 17)], now());
        assert_eq!(report.updates[0].new_score, 59);
        assert_eq!(report.updates[0].temperature, Temperature::Warm);
    }

    #[test]
    fn test_falls_back_to_created_at() {
        let engine = ScoringEngine::default();
        let lead = LeadRecord {
            id: "new-ish".to_string(),
            score: Some(100),
            last_activity_date: None,
            created_at: Some(now() - Duration::days(8)),
        };
        let report = engine.recalculate(&[lead], now());
        assert_eq!(report.updates[0].new_score, 98);
    }

    #[test]
    fn test_malformed_leads_skipped_not_fatal() {
        let engine = ScoringEngine::default();
        let leads = vec![
            LeadRecord {
                id: "no-score".to_string(),
                score: None,
                last_activity_date: Some(now()),
                created_at: None,
            },
            LeadRecord {
                id: "no-dates".to_string(),
                score: Some(50),
                last_activity_date: None,
                created_at: None,
            },
            sample_lead("too-high", 140, 30),
            sample_lead("ok", 100, 8),
        ];
        let report = engine.recalculate(&leads, now());

        assert_eq!(report.total, 4);
        assert_eq!(report.updates.len(), 1);
        assert_eq!(report.updates[0].lead_id, "ok");

        let skipped: Vec<_> = report.skipped.iter().map(|s| s.lead_id.as_str()).collect();
        assert_eq!(skipped, vec!["no-score", "no-dates", "too-high"]);
        assert_eq!(report.skipped[0].reason, "missing score");
        assert!(report.skipped[2].reason.contains("140"));
    }

    #[test]
    fn test_below_floor_score_lifted_past_grace() {
        let engine = ScoringEngine::default();
        let leads = vec![sample_lead("low", 4, 60), sample_lead("low-recent", 4, 5)];
        let report = engine.recalculate(&leads, now());
        assert_eq!(
            report.updates,
            vec![ScoreUpdate {
                lead_id: "low".to_string(),
                old_score: 4,
                new_score: 10,
                temperature: Temperature::Cold,
            }]
        );

        let value = serde_json::to_value(&report.updates[0]).unwrap();
        assert_eq!(value["oldScore"], 4);
        assert_eq!(value["newScore"], 10);
    }

    #[test]
    fn test_decay_fault_isolated_to_one_lead() {
        let engine = ScoringEngine::default();
        let leads = vec![
            sample_lead("before", 100, 8),
            sample_lead("negative", -5, 30),
            sample_lead("after", 60, 37),
        ];
        let report = engine.recalculate(&leads, now());

        assert_eq!(report.total, 3);
        let updated: Vec<_> = report.updates.iter().map(|u| u.lead_id.as_str()).collect();
        assert_eq!(updated, vec!["before", "after"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].lead_id, "negative");
        assert!(report.skipped[0].reason.contains("-5"));

        assert_eq!(engine.recalculate_par(&leads, now()), report);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let engine = ScoringEngine::default();
        let leads: Vec<_> = (0..200)
            .map(|i| sample_lead(&format!("L-{}", i), (i % 101) as i64, (i % 45) as i64))
            .collect();
        assert_eq!(engine.recalculate(&leads, now()), engine.recalculate_par(&leads, now()));
    }

    #[test]
    fn test_with_skipped_counts_toward_total() {
        let report = RecalcReport::default().with_skipped(vec![SkippedLead {
            lead_id: "#0".to_string(),
            reason: "undecodable record".to_string(),
        }]);
        assert_eq!(report.total, 1);
        assert_eq!(report.skipped.len(), 1);
    }
}
