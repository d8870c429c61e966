use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::scoring::SkippedLead;

/// Lead data captured at intake, as exported by the lead-intake service.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadIntake {
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: Option<String>,
    pub budget: Option<f64>,
    pub timeline: Option<String>,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_address: bool,
    pub preferred_contact: Option<String>,
    #[serde(alias = "propertyInterests")]
    pub property_interest: Vec<String>,
}

/// One entry from a lead's activity log.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    pub fn new(activity_type: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            activity_type: activity_type.into(),
            timestamp,
        }
    }
}

/// Point-in-time view of a lead, used for quality reports.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadSnapshot {
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub score: Option<u32>,
    pub status: Option<String>,
    pub source: Option<String>,
    pub budget: Option<f64>,
    pub timeline: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "propertyInterest")]
    pub property_interests: Vec<String>,
    pub last_activity_date: Option<DateTime<Utc>>,
}

impl LeadSnapshot {
    pub fn has_email(&self) -> bool {
        is_present(&self.email)
    }

    pub fn has_phone(&self) -> bool {
        is_present(&self.phone)
    }
}

/// Stored score row fed to the scheduled decay pass.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub last_activity_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LeadRecord {
    /// Date decay is measured from: last activity, else creation.
    pub fn reference_date(&self) -> Option<DateTime<Utc>> {
        self.last_activity_date.or(self.created_at)
    }
}

/// Lead id of a raw JSON row, read from `id` or `_id` before decoding.
pub fn row_id(value: &Value) -> Option<String> {
    value
        .get("id")
        .or_else(|| value.get("_id"))
        .map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

/// Decode raw JSON lead rows one by one so a single bad row does not
/// reject the whole export.
pub fn decode_records(values: Vec<Value>) -> (Vec<LeadRecord>, Vec<SkippedLead>) {
    let mut records = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        let lead_id = row_id(&value);

        match serde_json::from_value::<LeadRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => skipped.push(SkippedLead {
                lead_id: lead_id.unwrap_or_else(|| format!("#{}", index)),
                reason: format!("undecodable record: {}", e),
            }),
        }
    }

    (records, skipped)
}

/// Whole days elapsed from `earlier` to `now`, rounded down.
/// Timestamps in the future count as zero days.
pub fn days_since(earlier: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - earlier).num_days().max(0) as u64
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_intake_parses_camel_case() {
        let intake: LeadIntake = serde_json::from_value(json!({
            "_id": "L-1",
            "source": "Referral",
            "budget": 600000,
            "timeline": "Immediate",
            "hasEmail": true,
            "hasPhone": true,
            "propertyInterest": ["condo", "townhouse"]
        }))
        .unwrap();

        assert_eq!(intake.id.as_deref(), Some("L-1"));
        assert_eq!(intake.budget, Some(600000.0));
        assert!(intake.has_email && intake.has_phone && !intake.has_address);
        assert_eq!(intake.property_interest.len(), 2);
    }

    #[test]
    fn test_empty_intake_parses_to_default() {
        let intake: LeadIntake = serde_json::from_str("{}").unwrap();
        assert_eq!(intake, LeadIntake::default());
    }

    #[test]
    fn test_activity_uses_type_key() {
        let activity: Activity = serde_json::from_value(json!({
            "type": "phone_call",
            "timestamp": "2025-03-01T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(activity.activity_type, "phone_call");
    }

    #[test]
    fn test_snapshot_contact_presence() {
        let snapshot = LeadSnapshot {
            email: Some("a@b.com".to_string()),
            phone: Some("   ".to_string()),
            ..LeadSnapshot::default()
        };
        assert!(snapshot.has_email());
        assert!(!snapshot.has_phone());
    }

    #[test]
    fn test_reference_date_prefers_last_activity() {
        let created = now() - Duration::days(30);
        let active = now() - Duration::days(2);
        let mut record = LeadRecord {
            id: "L-1".to_string(),
            score: Some(50),
            last_activity_date: Some(active),
            created_at: Some(created),
        };
        assert_eq!(record.reference_date(), Some(active));

        record.last_activity_date = None;
        assert_eq!(record.reference_date(), Some(created));
    }

    #[test]
    fn test_decode_records_isolates_bad_rows() {
        let values = vec![
            json!({"id": "L-1", "score": 50, "createdAt": "2025-02-01T00:00:00Z"}),
            json!({"id": "L-2", "score": 50, "lastActivityDate": "not a date"}),
            json!({"score": 10}),
        ];
        let (records, skipped) = decode_records(values);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "L-1");
        assert_eq!(skipped.len(), 2);
        assert_eq!(skipped[0].lead_id, "L-2");
        assert_eq!(skipped[1].lead_id, "#2");
    }

    #[test]
    fn test_days_since_floors() {
        assert_eq!(days_since(now(), now()), 0);
        assert_eq!(days_since(now() - Duration::hours(47), now()), 1);
        assert_eq!(days_since(now() - Duration::days(8), now()), 8);
        assert_eq!(days_since(now() + Duration::days(3), now()), 0);
    }
}
