use chrono::{DateTime, Utc};
use serde::Serialize;

use super::engine::ScoringEngine;
use super::labels::{labels_match, LeadStatus, Temperature, Timeline};
use crate::leads::{days_since, LeadSnapshot};

const HIGH_QUALITY_SOURCES: [&str; 2] = ["Referral", "Walk-in"];
const HIGH_BUDGET: f64 = 500_000.0;
const INACTIVITY_DAYS: u64 = 7;

/// Human-readable qualification summary for one lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    pub current_score: u32,
    pub temperature: Temperature,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ScoringEngine {
    /// Evaluate independent quality rules against a lead snapshot.
    /// Pure; the snapshot is never modified.
    pub fn analyze(&self, lead: &LeadSnapshot, now: DateTime<Utc>) -> QualityReport {
        let current_score = lead.score.unwrap_or(0).min(100);
        let temperature = self.classify(current_score);
        let timeline = lead.timeline.as_deref().and_then(Timeline::from_label);

        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let mut recommendations = Vec::new();

        // Strengths
        if let Some(source) = lead.source.as_deref() {
            if HIGH_QUALITY_SOURCES.iter().any(|s| labels_match(s, source)) {
                strengths.push("High-quality lead source".to_string());
            }
        }
        if lead.budget.is_some_and(|b| b > HIGH_BUDGET) {
            strengths.push("High budget range".to_string());
        }
        if matches!(timeline, Some(Timeline::Immediate | Timeline::WithinOneMonth)) {
            strengths.push("Urgent timeline".to_string());
        }
        if lead.has_email() && lead.has_phone() {
            strengths.push("Complete contact information".to_string());
        }

        // Weaknesses
        if !lead.has_phone() {
            weaknesses.push("Missing phone number".to_string());
            recommendations.push("Try to obtain phone number for better engagement".to_string());
        }
        if matches!(timeline, Some(Timeline::JustLooking | Timeline::OverOneYear)) {
            weaknesses.push("Long timeline".to_string());
            recommendations.push("Add to long-term nurture campaign".to_string());
        }
        if lead.property_interests.iter().all(|i| i.trim().is_empty()) {
            weaknesses.push("No specific property interests".to_string());
            recommendations.push("Gather property preferences and requirements".to_string());
        }

        // Activity
        let inactive = lead
            .last_activity_date
            .map(|last| days_since(last, now) > INACTIVITY_DAYS)
            .unwrap_or(true);
        if inactive {
            recommendations.push("Re-engage lead - no recent activity".to_string());
        }

        let negotiating = lead
            .status
            .as_deref()
            .and_then(LeadStatus::from_label)
            == Some(LeadStatus::Negotiating);
        if temperature == Temperature::Hot && !negotiating {
            recommendations
                .push("High-scoring lead - prioritize immediate follow-up".to_string());
        }

        QualityReport {
            lead_id: lead.id.clone(),
            current_score,
            temperature,
            strengths,
            weaknesses,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn sample_lead() -> LeadSnapshot {
        LeadSnapshot {
            id: Some("L-42".to_string()),
            score: Some(85),
            status: Some("Qualified".to_string()),
            source: Some("Referral".to_string()),
            budget: Some(750_000.0),
            timeline: Some("Within 1 month".to_string()),
            email: Some("buyer@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            property_interests: vec!["single family".to_string()],
            last_activity_date: Some(now() - Duration::days(2)),
        }
    }

    #[test]
    fn test_strong_lead() {
        let engine = ScoringEngine::default();
        let report = engine.analyze(&sample_lead(), now());

        assert_eq!(report.lead_id.as_deref(), Some("L-42"));
        assert_eq!(report.current_score, 85);
        assert_eq!(report.temperature, Temperature::Hot);
        assert_eq!(
            report.strengths,
            vec![
                "High-quality lead source",
                "High budget range",
                "Urgent timeline",
                "Complete contact information",
            ]
        );
        assert!(report.weaknesses.is_empty());
        assert_eq!(
            report.recommendations,
            vec!["High-scoring lead - prioritize immediate follow-up"]
        );
    }

    #[test]
    fn test_hot_lead_in_negotiation_not_flagged() {
        let engine = ScoringEngine::default();
        let lead = LeadSnapshot {
            status: Some("Negotiating".to_string()),
            ..sample_lead()
        };
        let report = engine.analyze(&lead, now());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_weak_lead() {
        let engine = ScoringEngine::default();
        let lead = LeadSnapshot {
            id: None,
            score: Some(20),
            source: Some("Advertisement".to_string()),
            timeline: Some("Just looking".to_string()),
            email: Some("x@example.com".to_string()),
            last_activity_date: Some(now() - Duration::days(10)),
            ..LeadSnapshot::default()
        };
        let report = engine.analyze(&lead, now());

        assert_eq!(report.temperature, Temperature::Cold);
        assert!(report.strengths.is_empty());
        assert_eq!(
            report.weaknesses,
            vec![
                "Missing phone number",
                "Long timeline",
                "No specific property interests",
            ]
        );
        assert_eq!(report.recommendations.len(), 4);
        assert!(report
            .recommendations
            .contains(&"Re-engage lead - no recent activity".to_string()));
    }

    #[test]
    fn test_budget_threshold_is_exclusive() {
        let engine = ScoringEngine::default();
        let lead = LeadSnapshot {
            budget: Some(500_000.0),
            ..sample_lead()
        };
        let report = engine.analyze(&lead, now());
        assert!(!report.strengths.contains(&"High budget range".to_string()));
    }

    #[test]
    fn test_missing_activity_date_counts_as_inactive() {
        let engine = ScoringEngine::default();
        let lead = LeadSnapshot {
            last_activity_date: None,
            ..sample_lead()
        };
        let report = engine.analyze(&lead, now());
        assert!(report
            .recommendations
            .contains(&"Re-engage lead - no recent activity".to_string()));
    }

    #[test]
    fn test_exactly_seven_days_is_not_inactive() {
        let engine = ScoringEngine::default();
        let lead = LeadSnapshot {
            last_activity_date: Some(now() - Duration::days(7)),
            ..sample_lead()
        };
        let report = engine.analyze(&lead, now());
        assert!(!report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Re-engage")));
    }

    #[test]
    fn test_walk_in_source_any_casing() {
        let engine = ScoringEngine::default();
        let lead = LeadSnapshot {
            source: Some("Walk-In".to_string()),
            ..sample_lead()
        };
        let report = engine.analyze(&lead, now());
        assert!(report.strengths.contains(&"High-quality lead source".to_string()));
    }

    #[test]
    fn test_analyze_does_not_modify_snapshot() {
        let engine = ScoringEngine::default();
        let lead = sample_lead();
        let before = lead.clone();
        let _ = engine.analyze(&lead, now());
        assert_eq!(lead, before);
    }
}
