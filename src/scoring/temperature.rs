use super::config::TemperatureThresholds;
use super::engine::ScoringEngine;
use super::labels::Temperature;

impl TemperatureThresholds {
    /// `>= hot` is Hot, `>= warm` is Warm, anything lower is Cold.
    pub fn classify(&self, score: u32) -> Temperature {
        if score >= self.hot {
            Temperature::Hot
        } else if score >= self.warm {
            Temperature::Warm
        } else {
            Temperature::Cold
        }
    }
}

impl ScoringEngine {
    pub fn classify(&self, score: u32) -> Temperature {
        self.config().temperature.classify(score)
    }
}
