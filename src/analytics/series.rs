use crate::models::SimulationResult;

/// `(index, value)` pair handed to a chart.
pub type SeriesPoint = (usize, f64);

/// Prices in response order, indexed from zero.
pub fn price_series(result: &SimulationResult) -> Vec<SeriesPoint> {
    result.prices.iter().copied().enumerate().collect()
}

/// Realized PnL per price index. Every SELL at `t` adds to slot `t`;
/// trades outside the price range are dropped.
fn realized_by_index(result: &SimulationResult) -> Vec<f64> {
    let mut realized = vec![0.0; result.prices.len()];
    for trade in &result.trades {
        if let Some(slot) = realized.get_mut(trade.t) {
            *slot += trade.realized_pnl();
        }
    }
    realized
}

/// Running total of realized PnL, one point per price.
///
/// The curve is a step function that only moves where a SELL closed.
pub fn cumulative_pnl(result: &SimulationResult) -> Vec<SeriesPoint> {
    let mut running = 0.0;
    realized_by_index(result)
        .into_iter()
        .enumerate()
        .map(|(i, pnl)| {
            running += pnl;
            (i, running)
        })
        .collect()
}

/// Largest fall from a running peak. The peak starts at zero, so a curve
/// that only ever loses still reports its deepest point.
pub fn max_drawdown(curve: &[SeriesPoint]) -> f64 {
    let mut peak: f64 = 0.0;
    let mut max_dd: f64 = 0.0;
    for &(_, equity) in curve {
        peak = peak.max(equity);
        max_dd = max_dd.max(peak - equity);
    }
    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{buy, make_result, sell};

    #[test]
    fn price_series_keeps_order() {
        let r = make_result(&[10.0, 9.0, 12.0], vec![]);
        assert_eq!(price_series(&r), vec![(0, 10.0), (1, 9.0), (2, 12.0)]);
    }

    #[test]
    fn empty_response_gives_empty_series() {
        let r = make_result(&[], vec![sell(0, 5.0)]);
        assert!(price_series(&r).is_empty());
        assert!(cumulative_pnl(&r).is_empty());
    }

    #[test]
    fn pnl_steps_at_sell() {
        let r = make_result(&[10.0, 11.0, 12.0, 13.0], vec![buy(1), sell(3, 25.0)]);
        let values: Vec<f64> = cumulative_pnl(&r).into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![0.0, 0.0, 0.0, 25.0]);
    }

    #[test]
    fn sells_at_same_index_are_summed() {
        let r = make_result(
            &[1.0, 1.0, 1.0, 1.0],
            vec![buy(0), sell(2, 5.0), buy(2), sell(2, 7.0)],
        );
        let curve = cumulative_pnl(&r);
        assert_eq!(curve[1].1, 0.0);
        assert_eq!(curve[2].1, 12.0);
        assert_eq!(curve[3].1, 12.0);
    }

    #[test]
    fn series_lengths_match() {
        let r = make_result(&[1.0; 7], vec![buy(2), sell(4, -1.0), sell(40, 3.0)]);
        assert_eq!(cumulative_pnl(&r).len(), price_series(&r).len());
        // the out-of-range sell is not placed
        assert_eq!(cumulative_pnl(&r)[6].1, -1.0);
    }

    #[test]
    fn max_drawdown_from_zero_peak() {
        let curve = vec![(0, 0.0), (1, 4.0), (2, 1.0), (3, 6.0), (4, 2.5)];
        assert_eq!(max_drawdown(&curve), 3.5);

        let losing = vec![(0, -2.0), (1, -5.0)];
        assert_eq!(max_drawdown(&losing), 5.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }
}
