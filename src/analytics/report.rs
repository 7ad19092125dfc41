use crate::models::{Metrics, SimulationResult};

use super::series::{cumulative_pnl, max_drawdown, price_series, SeriesPoint};

/// The engine rounds money metrics to cents.
const MONEY_TOLERANCE: f64 = 0.005 + 1e-9;
const RATE_TOLERANCE: f64 = 1e-9;

/// A reported metric that disagrees with what the trade log implies.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricMismatch {
    pub metric: &'static str,
    pub reported: f64,
    pub derived: f64,
}

/// Display-ready view of one run: both series, the engine's metrics, and a
/// reconciliation of those metrics against the trade log.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub prices: Vec<SeriesPoint>,
    pub pnl: Vec<SeriesPoint>,
    pub metrics: Metrics,

    // Derived from the trade log
    pub total_pnl: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub num_trades: u32,
    pub trades_outside_series: usize,

    pub mismatches: Vec<MetricMismatch>,
}

impl RunReport {
    pub fn from_result(result: &SimulationResult) -> Self {
        let prices = price_series(result);
        let pnl = cumulative_pnl(result);

        let total_pnl = pnl.last().map(|&(_, v)| v).unwrap_or(0.0);
        let drawdown = max_drawdown(&pnl);

        let sells: Vec<f64> = result.sells().map(|t| t.realized_pnl()).collect();
        let num_trades = sells.len() as u32;
        let wins = sells.iter().filter(|&&p| p > 0.0).count();
        let win_rate = if num_trades > 0 {
            wins as f64 / num_trades as f64
        } else {
            0.0
        };

        let trades_outside_series = result
            .trades
            .iter()
            .filter(|t| t.t >= result.prices.len())
            .count();

        let m = &result.metrics;
        let mut mismatches = Vec::new();
        let mut check = |metric: &'static str, reported: f64, derived: f64, tol: f64| {
            if (reported - derived).abs() > tol {
                mismatches.push(MetricMismatch {
                    metric,
                    reported,
                    derived,
                });
            }
        };
        check("total_pnl", m.total_pnl, total_pnl, MONEY_TOLERANCE);
        check("max_drawdown", m.max_drawdown, drawdown, MONEY_TOLERANCE);
        check("win_rate", m.win_rate, win_rate, RATE_TOLERANCE);
        check("num_trades", m.num_trades as f64, num_trades as f64, 0.0);

        RunReport {
            prices,
            pnl,
            metrics: m.clone(),
            total_pnl,
            max_drawdown: drawdown,
            win_rate,
            num_trades,
            trades_outside_series,
            mismatches,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn print_summary(&self) {
        let m = &self.metrics;

        println!("\n{}", "=".repeat(60));
        println!("  SIMULATION RESULT");
        println!("{}", "=".repeat(60));
        println!("  Steps:        {}", self.prices.len());
        if let (Some(first), Some(last)) = (self.prices.first(), self.prices.last()) {
            println!("  Price:        {:.2} -> {:.2}", first.1, last.1);
        }
        println!();
        println!("  METRICS");
        println!("  ───────────────────────────────────");
        println!(
            "  Total PnL:    {:+.2} ({})",
            m.total_pnl,
            if m.is_profitable() { "positive" } else { "negative" }
        );
        println!("  Max Drawdown: {:.2}", m.max_drawdown);
        println!("  Win Rate:     {:.1}%", m.win_rate_pct());
        println!("  Trades:       {}", m.num_trades);

        if !self.mismatches.is_empty() || self.trades_outside_series > 0 {
            println!();
            println!("  RECONCILIATION");
            println!("  ───────────────────────────────────");
            for mm in &self.mismatches {
                println!(
                    "  {:<13} engine {:.4} vs trade log {:.4}",
                    mm.metric, mm.reported, mm.derived
                );
            }
            if self.trades_outside_series > 0 {
                println!(
                    "  {} trade(s) reference an index past the price series",
                    self.trades_outside_series
                );
            }
        }

        println!("{}", "=".repeat(60));
    }
}
