use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::{SimulationEngine, SimulationRequest};
use crate::error::{ClientError, ProtocolError};
use crate::models::SimulationResult;

const SIMULATE_PATH: &str = "/simulate";

/// Error envelope the engine answers with when it refuses a run.
#[derive(Debug, Deserialize)]
struct EngineErrorBody {
    error: String,
}

/// Talks to the engine over HTTP at `{engine_url}/simulate`.
pub struct HttpEngine {
    client: Client,
    endpoint: String,
}

impl HttpEngine {
    pub fn new(cfg: &Config) -> Result<Self, ClientError> {
        Self::with_timeout(&cfg.engine_url, Duration::from_secs(cfg.request_timeout_secs))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), SIMULATE_PATH);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport(&self, source: reqwest::Error) -> ClientError {
        ClientError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

#[async_trait]
impl SimulationEngine for HttpEngine {
    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, ClientError> {
        debug!(
            "POST {} market={} timesteps={} seed={}",
            self.endpoint, request.market, request.timesteps, request.seed
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport(e))?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<EngineErrorBody>(&body) {
                return Err(ProtocolError::Engine {
                    status,
                    message: envelope.error,
                }
                .into());
            }
            return Err(ProtocolError::Status { status, body }.into());
        }

        let result: SimulationResult =
            serde_json::from_str(&body).map_err(ProtocolError::from)?;

        info!(
            "Engine returned {} prices, {} trades",
            result.prices.len(),
            result.trades.len()
        );
        Ok(result)
    }
}
