use anyhow::{anyhow, bail, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use strategy_sandbox::config::Config;
use strategy_sandbox::engine::HttpEngine;
use strategy_sandbox::models::{Condition, RunParameters, Strategy};
use strategy_sandbox::session::{RunState, Session};

const USAGE: &str = "usage: strategy-sandbox [--market M] [--timesteps N] [--seed S] \
                     [--buy \"RULE\"]... [--sell \"RULE\"]...";

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if wants_help(&args) {
        println!("{}", USAGE);
        return Ok(());
    }
    let (strategy, params) = parse_args(&args, &cfg)?;

    let engine = HttpEngine::new(&cfg)?;

    println!("Algorithmic Trading Sandbox (educational simulation only, no real trading)");
    println!("  Engine:    {}", engine.endpoint());
    println!("  Market:    {}", params.market);
    println!("  Steps:     {}", params.timesteps);
    println!("  Seed:      {}", params.seed);
    println!("  Strategy:  {}", strategy);

    let mut session = Session::with_strategy(strategy, params);
    if !session.run(&engine).await {
        match session.state() {
            RunState::Error { message, .. } => bail!("Simulation failed: {}", message),
            other => bail!("Simulation did not complete ({:?})", other),
        }
    }

    if let Some(report) = session.report() {
        report.print_summary();
    }

    Ok(())
}

fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "-h" || a == "--help")
}

fn parse_args(args: &[String], cfg: &Config) -> Result<(Strategy, RunParameters)> {
    let mut params = cfg.run_parameters();
    let mut buy: Vec<Condition> = Vec::new();
    let mut sell: Vec<Condition> = Vec::new();

    let mut it = args.iter();
    while let Some(flag) = it.next() {
        let value = it
            .next()
            .with_context(|| format!("{} needs a value\n{}", flag, USAGE))?;

        match flag.as_str() {
            "--market" => params.market = value.parse().map_err(|e: String| anyhow!(e))?,
            "--timesteps" => {
                params.timesteps = value
                    .parse()
                    .with_context(|| format!("invalid --timesteps '{}'", value))?
            }
            "--seed" => {
                params.seed = value
                    .parse()
                    .with_context(|| format!("invalid --seed '{}'", value))?
            }
            "--buy" => buy.push(value.parse().map_err(|e: String| anyhow!(e))?),
            "--sell" => sell.push(value.parse().map_err(|e: String| anyhow!(e))?),
            other => bail!("unknown argument '{}'\n{}", other, USAGE),
        }
    }

    let mut strategy = Strategy::default();
    if !buy.is_empty() {
        strategy.buy = buy;
    }
    if !sell.is_empty() {
        strategy.sell = sell;
    }

    Ok((strategy, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strategy_sandbox::models::{Indicator, MarketRegime, Rhs};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_come_from_config() {
        let cfg = Config::default();
        let (strategy, params) = parse_args(&[], &cfg).unwrap();
        assert_eq!(strategy, Strategy::default());
        assert_eq!(params, cfg.run_parameters());
    }

    #[test]
    fn rules_replace_default_side() {
        let (strategy, params) = parse_args(
            &args(&["--buy", "MA > MA_LONG", "--buy", "RSI < 40", "--market", "sideways", "--seed", "7"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(strategy.buy.len(), 2);
        assert_eq!(strategy.buy[0].rhs, Rhs::Signal(Indicator::MaLong));
        assert_eq!(strategy.sell, Strategy::default().sell);
        assert_eq!(params.market, MarketRegime::Sideways);
        assert_eq!(params.seed, 7);
    }

    #[test]
    fn help_flag_is_detected() {
        assert!(wants_help(&args(&["--seed", "3", "--help"])));
        assert!(wants_help(&args(&["-h"])));
        assert!(!wants_help(&args(&["--buy", "RSI < 30"])));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let cfg = Config::default();
        assert!(parse_args(&args(&["--buy", "RSI = 3"]), &cfg).is_err());
        assert!(parse_args(&args(&["--timesteps", "-1"]), &cfg).is_err());
        assert!(parse_args(&args(&["--seed"]), &cfg).is_err());
        assert!(parse_args(&args(&["--bogus", "1"]), &cfg).is_err());
    }
}
