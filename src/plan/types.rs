use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::RecalcReport;

pub const PLAN_VERSION: u32 = 1;

/// Versioned update plan handed to the persistence service after a
/// scheduled decay pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecalcPlan {
    pub version: u32,
    /// Reference time the scores were decayed against
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: RecalcReport,
}

impl RecalcPlan {
    pub fn new(generated_at: DateTime<Utc>, report: RecalcReport) -> Self {
        Self {
            version: PLAN_VERSION,
            generated_at,
            report,
        }
    }
}
