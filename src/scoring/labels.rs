//! Closed label sets used by the weight tables.
//!
//! Config tables are keyed by these enums so a missing or misspelled entry is a
//! load-time error. Labels that arrive as free text from upstream records go
//! through `from_label`, which is case- and separator-insensitive and returns
//! `None` for anything unrecognized; callers resolve `None` to the table's
//! documented fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Engagement activity recorded against a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    PropertyView,
    ContactForm,
    PhoneCall,
    EmailOpen,
    EmailClick,
    MeetingScheduled,
    MeetingAttended,
    DocumentationProvided,
    PreApprovalStarted,
    PreApprovalCompleted,
}

impl ActivityType {
    pub const ALL: [ActivityType; 10] = [
        ActivityType::PropertyView,
        ActivityType::ContactForm,
        ActivityType::PhoneCall,
        ActivityType::EmailOpen,
        ActivityType::EmailClick,
        ActivityType::MeetingScheduled,
        ActivityType::MeetingAttended,
        ActivityType::DocumentationProvided,
        ActivityType::PreApprovalStarted,
        ActivityType::PreApprovalCompleted,
    ];

    /// Config key (snake_case).
    pub fn key(&self) -> &'static str {
        match self {
            ActivityType::PropertyView => "property_view",
            ActivityType::ContactForm => "contact_form",
            ActivityType::PhoneCall => "phone_call",
            ActivityType::EmailOpen => "email_open",
            ActivityType::EmailClick => "email_click",
            ActivityType::MeetingScheduled => "meeting_scheduled",
            ActivityType::MeetingAttended => "meeting_attended",
            ActivityType::DocumentationProvided => "documentation_provided",
            ActivityType::PreApprovalStarted => "pre_approval_started",
            ActivityType::PreApprovalCompleted => "pre_approval_completed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let norm = normalize_label(label);
        Self::ALL.into_iter().find(|a| a.key() == norm)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Pipeline status of a lead. Only the statuses that carry a scoring weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Interested,
    Negotiating,
    Converted,
    Lost,
    OnHold,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 8] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Interested,
        LeadStatus::Negotiating,
        LeadStatus::Converted,
        LeadStatus::Lost,
        LeadStatus::OnHold,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Interested => "interested",
            LeadStatus::Negotiating => "negotiating",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
            LeadStatus::OnHold => "on_hold",
        }
    }

    /// Label as shown in the CRM ("On Hold").
    pub fn label(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Interested => "Interested",
            LeadStatus::Negotiating => "Negotiating",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
            LeadStatus::OnHold => "On Hold",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let norm = normalize_label(label);
        Self::ALL.into_iter().find(|s| s.key() == norm)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Purchase timeline declared at intake, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    Immediate,
    WithinOneMonth,
    OneToThreeMonths,
    ThreeToSixMonths,
    SixToTwelveMonths,
    OverOneYear,
    JustLooking,
}

impl Timeline {
    pub const ALL: [Timeline; 7] = [
        Timeline::Immediate,
        Timeline::WithinOneMonth,
        Timeline::OneToThreeMonths,
        Timeline::ThreeToSixMonths,
        Timeline::SixToTwelveMonths,
        Timeline::OverOneYear,
        Timeline::JustLooking,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Timeline::Immediate => "immediate",
            Timeline::WithinOneMonth => "within_one_month",
            Timeline::OneToThreeMonths => "one_to_three_months",
            Timeline::ThreeToSixMonths => "three_to_six_months",
            Timeline::SixToTwelveMonths => "six_to_twelve_months",
            Timeline::OverOneYear => "over_one_year",
            Timeline::JustLooking => "just_looking",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeline::Immediate => "Immediate",
            Timeline::WithinOneMonth => "Within 1 month",
            Timeline::OneToThreeMonths => "1-3 months",
            Timeline::ThreeToSixMonths => "3-6 months",
            Timeline::SixToTwelveMonths => "6-12 months",
            Timeline::OverOneYear => "Over 1 year",
            Timeline::JustLooking => "Just looking",
        }
    }

    /// Accepts both the config key and the intake form label.
    pub fn from_label(label: &str) -> Option<Self> {
        let norm = normalize_label(label);
        Self::ALL
            .into_iter()
            .find(|t| t.key() == norm || normalize_label(t.label()) == norm)
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Priority band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Temperature {
    Hot,
    Warm,
    Cold,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Temperature::Hot => "Hot",
            Temperature::Warm => "Warm",
            Temperature::Cold => "Cold",
        };
        f.write_str(s)
    }
}

/// Lowercase, map separators to `_`, collapse runs.
/// "Within 1 month" -> "within_1_month", "Walk-In" -> "walk_in".
pub fn normalize_label(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/' | '.'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Label comparison that ignores case and separators.
pub fn labels_match(a: &str, b: &str) -> bool {
    normalize_label(a) == normalize_label(b)
}
