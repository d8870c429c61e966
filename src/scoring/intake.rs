//! Initial score at lead intake.
//!
//! Sum of source, budget, timeline, contact-completeness and property-interest
//! points, clamped to `[0, 100]`. Malformed intake never blocks lead creation:
//! the fail-soft entry points log the problem and return
//! [`DEFAULT_INITIAL_SCORE`].

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::engine::ScoringEngine;
use super::error::ScoringError;
use super::labels::{labels_match, normalize_label, Timeline};
use crate::leads::{row_id, LeadIntake};

/// Score assigned when an intake record cannot be scored.
pub const DEFAULT_INITIAL_SCORE: u32 = 25;

const POINTS_PER_INTEREST: u32 = 5;
const MAX_COUNTED_INTERESTS: usize = 3;
const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Source", "Budget", "Timeline"
    pub description: String, // e.g. "Referral", "600000 (< 750000)"
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialScore {
    pub score: u32,
    /// True when the intake was malformed and the default score was used
    pub fallback: bool,
    pub factors: Vec<FactorContribution>,
}

impl InitialScore {
    fn fallback() -> Self {
        Self {
            score: DEFAULT_INITIAL_SCORE,
            fallback: true,
            factors: Vec::new(),
        }
    }
}

impl ScoringEngine {
    /// Starting score for a new lead. Never fails.
    pub fn initial_score(&self, intake: &LeadIntake) -> u32 {
        self.initial_score_breakdown(intake).score
    }

    /// Starting score plus the per-factor breakdown. Never fails.
    pub fn initial_score_breakdown(&self, intake: &LeadIntake) -> InitialScore {
        match self.try_initial_score(intake) {
            Ok(result) => {
                info!(
                    lead_id = intake.id.as_deref().unwrap_or("-"),
                    score = result.score,
                    source = intake.source.as_deref().unwrap_or("-"),
                    budget = ?intake.budget,
                    timeline = intake.timeline.as_deref().unwrap_or("-"),
                    has_contact_info = intake.has_email || intake.has_phone,
                    "calculated initial lead score"
                );
                result
            }
            Err(e) => {
                warn!(
                    operation = "initial_score",
                    lead_id = intake.id.as_deref().unwrap_or("-"),
                    error = %e,
                    "using default initial score"
                );
                InitialScore::fallback()
            }
        }
    }

    /// Score one raw intake row as exported by the intake service. A row that
    /// does not decode gets the default score, like any other malformed intake.
    /// Returns the row's lead id alongside the result.
    pub fn initial_score_for_row(&self, row: Value) -> (Option<String>, InitialScore) {
        let lead_id = row_id(&row);
        match serde_json::from_value::<LeadIntake>(row) {
            Ok(intake) => (lead_id, self.initial_score_breakdown(&intake)),
            Err(e) => {
                warn!(
                    operation = "initial_score",
                    lead_id = lead_id.as_deref().unwrap_or("-"),
                    error = %e,
                    "undecodable intake, using default initial score"
                );
                (lead_id, InitialScore::fallback())
            }
        }
    }

    /// Strict variant: returns `ScoringError::Input` for malformed intake.
    pub fn try_initial_score(&self, intake: &LeadIntake) -> Result<InitialScore, ScoringError> {
        if let Some(budget) = intake.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(ScoringError::input(
                    "initial_score",
                    intake.id.as_deref(),
                    format!("budget {} is not a non-negative amount", budget),
                ));
            }
        }

        let mut factors = Vec::new();

        let source = self.source_points(intake.source.as_deref());
        if source > 0 {
            factors.push(FactorContribution {
                label: "Source".to_string(),
                description: intake.source.clone().unwrap_or_default(),
                points: source,
            });
        }

        let budget = self.budget_points(intake.budget);
        if budget > 0 {
            factors.push(FactorContribution {
                label: "Budget".to_string(),
                description: format!("{:.0}", intake.budget.unwrap_or_default()),
                points: budget,
            });
        }

        let timeline = self.timeline_points(intake.timeline.as_deref());
        if timeline > 0 {
            let description = match intake.timeline.as_deref().and_then(Timeline::from_label) {
                Some(t) => t.label().to_string(),
                None => "unspecified (fallback)".to_string(),
            };
            factors.push(FactorContribution {
                label: "Timeline".to_string(),
                description,
                points: timeline,
            });
        }

        let bonuses = &self.config().contact_bonuses;
        let has_preferred_contact = intake
            .preferred_contact
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty());
        let mut contact = 0;
        let mut present = Vec::new();
        for (flag, points, name) in [
            (intake.has_email, bonuses.email, "email"),
            (intake.has_phone, bonuses.phone, "phone"),
            (intake.has_address, bonuses.address, "address"),
            (has_preferred_contact, bonuses.preferred_contact, "preferred contact"),
        ] {
            if flag {
                contact += points;
                present.push(name);
            }
        }
        if contact > 0 {
            factors.push(FactorContribution {
                label: "Contact".to_string(),
                description: present.join(", "),
                points: contact,
            });
        }

        let interests = distinct_interests(&intake.property_interest);
        let interest = POINTS_PER_INTEREST * interests.min(MAX_COUNTED_INTERESTS) as u32;
        if interest > 0 {
            factors.push(FactorContribution {
                label: "Property interest".to_string(),
                description: format!("{} distinct", interests),
                points: interest,
            });
        }

        let total = source
            .saturating_add(budget)
            .saturating_add(timeline)
            .saturating_add(contact)
            .saturating_add(interest);

        Ok(InitialScore {
            score: total.min(MAX_SCORE),
            fallback: false,
            factors,
        })
    }

    /// Points for a lead source; 0 when the source is missing or unlisted.
    pub fn source_points(&self, source: Option<&str>) -> u32 {
        let Some(source) = source else {
            return 0;
        };
        let weights = &self.config().source_weights;
        if let Some(&points) = weights.get(source) {
            return points;
        }
        match weights.iter().find(|(label, _)| labels_match(label, source)) {
            Some((_, &points)) => points,
            None => {
                debug!(source, "unlisted lead source scores 0");
                0
            }
        }
    }

    /// Strict less-than ladder. Missing or zero budget scores 0; anything at
    /// or above the highest bound gets the top tier.
    pub fn budget_points(&self, budget: Option<f64>) -> u32 {
        let Some(budget) = budget.filter(|b| *b > 0.0) else {
            return 0;
        };
        let tiers = &self.config().budget_tiers;
        for tier in tiers {
            match tier.below {
                Some(limit) if budget < limit as f64 => return tier.points,
                None => return tier.points,
                Some(_) => {}
            }
        }
        tiers.last().map(|t| t.points).unwrap_or(0)
    }

    /// Points for a timeline label; missing or unknown labels get the
    /// configured fallback.
    pub fn timeline_points(&self, timeline: Option<&str>) -> u32 {
        let config = self.config();
        timeline
            .and_then(Timeline::from_label)
            .and_then(|t| config.timeline_weights.get(&t).copied())
            .unwrap_or(config.timeline_fallback)
    }
}

fn distinct_interests(interests: &[String]) -> usize {
    interests
        .iter()
        .map(|i| normalize_label(i))
        .filter(|i| !i.is_empty())
        .collect::<BTreeSet<_>>()
        .len()
}
