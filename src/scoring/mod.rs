pub mod bulk;
pub mod config;
pub mod decay;
pub mod engagement;
pub mod engine;
pub mod error;
pub mod events;
pub mod factors;
pub mod intake;
pub mod labels;
pub mod quality;
pub mod state;
pub mod temperature;
pub mod validation;

pub use bulk::{RecalcReport, ScoreUpdate, SkippedLead};
pub use config::*;
pub use engagement::MAX_ENGAGEMENT_SCORE;
pub use engine::ScoringEngine;
pub use error::ScoringError;
pub use factors::DayRange;
pub use intake::{FactorContribution, InitialScore, DEFAULT_INITIAL_SCORE};
pub use labels::{ActivityType, LeadStatus, Temperature, Timeline};
pub use quality::QualityReport;
pub use state::LeadScoreState;
pub use validation::validate_scoring;
