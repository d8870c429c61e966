use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::factors::DayRange;
use super::labels::{ActivityType, LeadStatus, Timeline};

/// Main scoring configuration.
///
/// Every section is optional in YAML; a missing section takes its default.
/// A section that is present replaces the default section wholesale.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   source_weights:
///     Referral: 25
///     Website: 10
///   budget_tiers:
///     - { below: 250000, points: 10 }
///     - { points: 30 }
///   recency_modifiers:
///     - { days: "0", multiplier: 1.5 }
///     - { days: ">0", multiplier: 1.0 }
///   decay:
///     start_after_days: 7
///     daily_decay_rate: 0.02
///     minimum_score: 10
///   temperature:
///     hot: 70
///     warm: 40
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Points per lead source label (matched case-insensitively)
    pub source_weights: BTreeMap<String, u32>,

    /// Budget ladder, evaluated top to bottom with strict less-than
    pub budget_tiers: Vec<BudgetTier>,

    /// Points per declared purchase timeline
    pub timeline_weights: BTreeMap<Timeline, u32>,

    /// Points used when the timeline is missing or unrecognized
    pub timeline_fallback: u32,

    pub contact_bonuses: ContactBonuses,

    /// Base points per engagement activity
    pub activity_weights: BTreeMap<ActivityType, u32>,

    /// Absolute status values; transition delta is `to - from`
    pub status_weights: BTreeMap<LeadStatus, i32>,

    /// Recency buckets, first match wins. The bucket matching day 0 is "today".
    pub recency_modifiers: Vec<RecencyBucket>,

    pub decay: DecayConfig,

    pub temperature: TemperatureThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let source_weights = [
            ("Website", 10),
            ("Referral", 25),
            ("Social Media", 15),
            ("Email Campaign", 12),
            ("Phone", 20),
            ("Walk-in", 30),
            ("Partner", 22),
            ("Advertisement", 8),
            ("Other", 5),
        ]
        .into_iter()
        .map(|(label, points)| (label.to_string(), points))
        .collect();

        let budget_tiers = vec![
            BudgetTier { below: Some(100_000), points: 5 },
            BudgetTier { below: Some(250_000), points: 10 },
            BudgetTier { below: Some(500_000), points: 20 },
            BudgetTier { below: Some(750_000), points: 25 },
            BudgetTier { below: Some(1_000_000), points: 30 },
            BudgetTier { below: None, points: 35 },
        ];

        let timeline_weights = BTreeMap::from([
            (Timeline::Immediate, 30),
            (Timeline::WithinOneMonth, 25),
            (Timeline::OneToThreeMonths, 20),
            (Timeline::ThreeToSixMonths, 15),
            (Timeline::SixToTwelveMonths, 10),
            (Timeline::OverOneYear, 5),
            (Timeline::JustLooking, 2),
        ]);

        let activity_weights = BTreeMap::from([
            (ActivityType::PropertyView, 5),
            (ActivityType::ContactForm, 10),
            (ActivityType::PhoneCall, 15),
            (ActivityType::EmailOpen, 2),
            (ActivityType::EmailClick, 5),
            (ActivityType::MeetingScheduled, 20),
            (ActivityType::MeetingAttended, 25),
            (ActivityType::DocumentationProvided, 15),
            (ActivityType::PreApprovalStarted, 20),
            (ActivityType::PreApprovalCompleted, 30),
        ]);

        let status_weights = BTreeMap::from([
            (LeadStatus::New, 0),
            (LeadStatus::Contacted, 10),
            (LeadStatus::Qualified, 20),
            (LeadStatus::Interested, 25),
            (LeadStatus::Negotiating, 35),
            (LeadStatus::Converted, 50),
            (LeadStatus::Lost, -20),
            (LeadStatus::OnHold, -10),
        ]);

        let recency_modifiers = vec![
            RecencyBucket { days: DayRange::Equal(0), multiplier: 1.5 },
            RecencyBucket { days: DayRange::Between(1, 3), multiplier: 1.3 },
            RecencyBucket { days: DayRange::Between(4, 7), multiplier: 1.1 },
            RecencyBucket { days: DayRange::Between(8, 14), multiplier: 1.0 },
            RecencyBucket { days: DayRange::Between(15, 30), multiplier: 0.8 },
            RecencyBucket { days: DayRange::GreaterThan(30), multiplier: 0.5 },
        ];

        Self {
            source_weights,
            budget_tiers,
            timeline_weights,
            timeline_fallback: 2,
            contact_bonuses: ContactBonuses::default(),
            activity_weights,
            status_weights,
            recency_modifiers,
            decay: DecayConfig::default(),
            temperature: TemperatureThresholds::default(),
        }
    }
}

/// Budget ladder rung. `below` is an exclusive upper bound; only the last
/// tier may leave it open.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BudgetTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub below: Option<u64>,
    pub points: u32,
}

/// Contact-completeness bonuses, each added independently.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ContactBonuses {
    pub email: u32,
    pub phone: u32,
    pub address: u32,
    pub preferred_contact: u32,
}

impl Default for ContactBonuses {
    fn default() -> Self {
        Self {
            email: 5,
            phone: 10,
            address: 3,
            preferred_contact: 2,
        }
    }
}

/// Recency bucket: days since the event -> multiplier on the base weight.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RecencyBucket {
    pub days: DayRange,
    pub multiplier: f64,
}

/// Inactivity decay parameters.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DecayConfig {
    /// Grace period in whole days before decay starts
    pub start_after_days: u32,
    /// Fraction lost per day past the grace period, in (0, 1)
    pub daily_decay_rate: f64,
    /// Decay never takes a score below this
    pub minimum_score: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            start_after_days: 7,
            daily_decay_rate: 0.02,
            minimum_score: 10,
        }
    }
}

/// Lower bounds (inclusive) for the Hot and Warm bands.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TemperatureThresholds {
    pub hot: u32,
    pub warm: u32,
}

impl Default for TemperatureThresholds {
    fn default() -> Self {
        Self { hot: 70, warm: 40 }
    }
}
