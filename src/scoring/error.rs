//! Error types for the scoring engine.
//!
//! `Configuration` is fatal and only comes out of `ScoringEngine::new`.
//! `Input` is produced by the fallible `try_*` operations; the public
//! fail-soft operations log it and substitute their fallback instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("invalid scoring configuration: {}", .0.join("; "))]
    Configuration(Vec<String>),

    #[error(
        "{operation}: malformed input for lead '{lead}': {reason}",
        lead = .lead_id.as_deref().unwrap_or("(unknown)")
    )]
    Input {
        operation: &'static str,
        lead_id: Option<String>,
        reason: String,
    },
}

impl ScoringError {
    pub(crate) fn input(
        operation: &'static str,
        lead_id: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        ScoringError::Input {
            operation,
            lead_id: lead_id.map(str::to_string),
            reason: reason.into(),
        }
    }
}
