use super::config::ScoringConfig;
use super::error::ScoringError;
use super::validation::validate_scoring;

/// Validated scoring tables.
///
/// The only way to build an engine from a custom config is `new`, which
/// rejects any config that fails `validate_scoring`. Every lookup after that
/// point is total. The engine is immutable and `Sync`, so one instance can be
/// shared by all callers for the life of the process.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        validate_scoring(&config).map_err(ScoringError::Configuration)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Multiplier for an event `days` old. First matching bucket wins; the last
    /// bucket covers anything past the table.
    pub fn recency_multiplier(&self, days: u64) -> f64 {
        let buckets = &self.config.recency_modifiers;
        buckets
            .iter()
            .find(|b| b.days.matches(days))
            .or_else(|| buckets.last())
            .map(|b| b.multiplier)
            .unwrap_or(1.0)
    }

    /// The "today" multiplier applied to events scored as they happen.
    pub fn today_multiplier(&self) -> f64 {
        self.recency_multiplier(0)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }
}
