use serde::{Deserialize, Serialize};

use super::indicator::TradeSide;

/// One executed order. `pnl` is only meaningful on SELL trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub t: usize,
    #[serde(rename = "type")]
    pub side: TradeSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
}

impl Trade {
    /// Realized PnL: the `pnl` of a SELL, zero for anything else.
    pub fn realized_pnl(&self) -> f64 {
        match self.side {
            TradeSide::Sell => self.pnl.unwrap_or(0.0),
            TradeSide::Buy => 0.0,
        }
    }
}

/// Engine-computed aggregates, displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_pnl: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub num_trades: u32,
}

impl Metrics {
    pub fn is_profitable(&self) -> bool {
        self.total_pnl >= 0.0
    }

    pub fn win_rate_pct(&self) -> f64 {
        self.win_rate * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub prices: Vec<f64>,
    pub trades: Vec<Trade>,
    pub metrics: Metrics,
}

impl SimulationResult {
    pub fn sells(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(|t| t.side == TradeSide::Sell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_engine_response() {
        let body = r#"{
            "prices": [10.0, 11.0, 12.0],
            "trades": [
                {"t": 0, "type": "BUY", "price": 10.0},
                {"t": 2, "type": "SELL", "price": 12.0, "pnl": 2.0}
            ],
            "metrics": {"total_pnl": 2.0, "num_trades": 1, "win_rate": 1.0, "max_drawdown": 0.0}
        }"#;
        let r: SimulationResult = serde_json::from_str(body).unwrap();
        assert_eq!(r.prices.len(), 3);
        assert_eq!(r.trades[0].side, TradeSide::Buy);
        assert_eq!(r.trades[0].pnl, None);
        assert_eq!(r.trades[1].pnl, Some(2.0));
        assert_eq!(r.metrics.num_trades, 1);
        assert_eq!(r.sells().count(), 1);
    }

    #[test]
    fn missing_metrics_is_rejected() {
        let body = r#"{"prices": [], "trades": []}"#;
        assert!(serde_json::from_str::<SimulationResult>(body).is_err());
    }

    #[test]
    fn buy_never_realizes_pnl() {
        let stray = Trade {
            t: 1,
            side: TradeSide::Buy,
            price: None,
            pnl: Some(9.0),
        };
        assert_eq!(stray.realized_pnl(), 0.0);
    }

    #[test]
    fn metric_helpers() {
        let m = Metrics {
            total_pnl: -1.5,
            max_drawdown: 3.0,
            win_rate: 0.25,
            num_trades: 4,
        };
        assert!(!m.is_profitable());
        assert_eq!(m.win_rate_pct(), 25.0);
    }
}
