pub mod report;
pub mod series;

pub use report::{MetricMismatch, RunReport};
pub use series::{cumulative_pnl, max_drawdown, price_series, SeriesPoint};
