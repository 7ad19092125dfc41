use serde::{Deserialize, Serialize};

use crate::models::{MarketRegime, RunParameters};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Engine
    pub engine_url: String,
    pub request_timeout_secs: u64,

    // Run defaults
    pub market: MarketRegime,
    pub timesteps: u32,
    pub seed: i64,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            market: MarketRegime::Trending,
            timesteps: 1000,
            seed: 42,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        Config {
            engine_url: lookup("SIMULATION_ENGINE_URL").unwrap_or(defaults.engine_url),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            market: lookup("MARKET")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.market),
            timesteps: lookup("TIMESTEPS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timesteps),
            seed: lookup("SEED")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.seed),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn run_parameters(&self) -> RunParameters {
        RunParameters {
            market: self.market,
            timesteps: self.timesteps,
            seed: self.seed,
        }
    }
}
