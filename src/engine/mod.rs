pub mod http;
pub mod wire;

pub use http::HttpEngine;
pub use wire::{build_request, SimulationRequest, WireCondition, WireStrategy};

use async_trait::async_trait;

use crate::error::ClientError;
use crate::models::SimulationResult;

/// The remote simulation engine: one request, one response per run.
#[async_trait]
pub trait SimulationEngine: Send + Sync {
    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, ClientError>;
}
