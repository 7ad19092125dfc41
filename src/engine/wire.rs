use serde::{Deserialize, Serialize};

use crate::models::{
    Comparator, Condition, Indicator, MarketRegime, Rhs, RhsKind, RunParameters, Strategy,
};

/// Placeholder sent in `rhs_value` when the rhs is a signal.
pub const INACTIVE_RHS_VALUE: f64 = 0.0;
/// Placeholder sent in `rhs_signal` when the rhs is a constant.
pub const INACTIVE_RHS_SIGNAL: Indicator = Indicator::Price;

/// Body of `POST /simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub market: MarketRegime,
    pub timesteps: u32,
    pub seed: i64,
    pub strategy: WireStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireStrategy {
    pub buy: Vec<WireCondition>,
    pub sell: Vec<WireCondition>,
}

/// Flat condition shape: both rhs fields are always present, only the one
/// named by `rhs_type` carries meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCondition {
    pub lhs: Indicator,
    pub op: Comparator,
    pub rhs_type: RhsKind,
    #[serde(default)]
    pub rhs_value: f64,
    #[serde(default = "default_rhs_signal")]
    pub rhs_signal: Indicator,
}

fn default_rhs_signal() -> Indicator {
    Indicator::Rsi
}

impl From<&Condition> for WireCondition {
    fn from(c: &Condition) -> Self {
        let (rhs_value, rhs_signal) = match c.rhs {
            // JSON has no NaN/inf; serde_json would emit null
            Rhs::Constant(v) if v.is_finite() => (v, INACTIVE_RHS_SIGNAL),
            Rhs::Constant(_) => (INACTIVE_RHS_VALUE, INACTIVE_RHS_SIGNAL),
            Rhs::Signal(s) => (INACTIVE_RHS_VALUE, s),
        };
        Self {
            lhs: c.lhs,
            op: c.op,
            rhs_type: c.rhs.kind(),
            rhs_value,
            rhs_signal,
        }
    }
}

impl From<&WireCondition> for Condition {
    fn from(w: &WireCondition) -> Self {
        let rhs = match w.rhs_type {
            RhsKind::Constant => Rhs::Constant(w.rhs_value),
            RhsKind::Signal => Rhs::Signal(w.rhs_signal),
        };
        Condition::new(w.lhs, w.op, rhs)
    }
}

impl From<&Strategy> for WireStrategy {
    fn from(s: &Strategy) -> Self {
        Self {
            buy: s.buy.iter().map(WireCondition::from).collect(),
            sell: s.sell.iter().map(WireCondition::from).collect(),
        }
    }
}

impl WireStrategy {
    pub fn to_strategy(&self) -> Strategy {
        Strategy {
            buy: self.buy.iter().map(Condition::from).collect(),
            sell: self.sell.iter().map(Condition::from).collect(),
        }
    }
}

/// Maps a strategy and run parameters onto the engine's request shape.
///
/// Total: every input produces a payload, including `timesteps == 0` and
/// empty rule lists.
pub fn build_request(strategy: &Strategy, params: &RunParameters) -> SimulationRequest {
    SimulationRequest {
        market: params.market,
        timesteps: params.timesteps,
        seed: params.seed,
        strategy: WireStrategy::from(strategy),
    }
}
