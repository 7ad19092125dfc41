use crate::models::{Metrics, SimulationResult, Trade, TradeSide};

pub fn buy(t: usize) -> Trade {
    Trade {
        t,
        side: TradeSide::Buy,
        price: None,
        pnl: None,
    }
}

pub fn sell(t: usize, pnl: f64) -> Trade {
    Trade {
        t,
        side: TradeSide::Sell,
        price: None,
        pnl: Some(pnl),
    }
}

pub fn metrics(total_pnl: f64, max_drawdown: f64, win_rate: f64, num_trades: u32) -> Metrics {
    Metrics {
        total_pnl,
        max_drawdown,
        win_rate,
        num_trades,
    }
}

/// Result whose metrics are all zero; fine for tests that only look at series.
pub fn make_result(prices: &[f64], trades: Vec<Trade>) -> SimulationResult {
    make_result_with_metrics(prices, trades, metrics(0.0, 0.0, 0.0, 0))
}

pub fn make_result_with_metrics(
    prices: &[f64],
    trades: Vec<Trade>,
    metrics: Metrics,
) -> SimulationResult {
    SimulationResult {
        prices: prices.to_vec(),
        trades,
        metrics,
    }
}
