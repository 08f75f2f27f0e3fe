use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::models::Timeframe;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaproomConfig {
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ViewConfig {
    pub default_timeframe: Timeframe,
    pub preview_limit: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_timeframe: Timeframe::Last24Hours,
            preview_limit: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    /// Simulated latency for the ad-hoc query panel, milliseconds.
    pub delay_ms: u64,
    /// Fixed response the simulated backend resolves with.
    pub canned_answer: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1200,
            canned_answer: "Analysis complete: no anomalies in the selected timeframe."
                .to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub sessions: usize,
    pub max_modules_per_session: usize,
    /// RNG seed for the mock feed; a fixed seed keeps demo output and
    /// tests reproducible.
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            sessions: 24,
            max_modules_per_session: 3,
            seed: 2024,
        }
    }
}

impl TaproomConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }
}
