use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named signal the engine computes over the price path.
///
/// The engine dispatches on the exact string, so `as_str` is the wire
/// vocabulary and must not drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "VOLATILITY")]
    Volatility,
    #[serde(rename = "VOLATILITY_MA")]
    VolatilityMa,
    #[serde(rename = "MA")]
    Ma,
    #[serde(rename = "MA_LONG")]
    MaLong,
    #[serde(rename = "Price")]
    Price,
}

impl Indicator {
    /// Every indicator, in the order the engine lists them.
    pub const ALL: [Indicator; 6] = [
        Indicator::Rsi,
        Indicator::Volatility,
        Indicator::VolatilityMa,
        Indicator::Ma,
        Indicator::MaLong,
        Indicator::Price,
    ];

    pub fn first() -> Indicator {
        Self::ALL[0]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Rsi => "RSI",
            Indicator::Volatility => "VOLATILITY",
            Indicator::VolatilityMa => "VOLATILITY_MA",
            Indicator::Ma => "MA",
            Indicator::MaLong => "MA_LONG",
            Indicator::Price => "Price",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "RSI" => Ok(Indicator::Rsi),
            "VOLATILITY" => Ok(Indicator::Volatility),
            "VOLATILITY_MA" => Ok(Indicator::VolatilityMa),
            // SMA is an engine-side alias
            "MA" | "SMA" => Ok(Indicator::Ma),
            "MA_LONG" => Ok(Indicator::MaLong),
            "Price" | "PRICE" => Ok(Indicator::Price),
            other => Err(format!("unknown indicator '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::LessThan => "<",
            Comparator::GreaterThan => ">",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<" => Ok(Comparator::LessThan),
            ">" => Ok(Comparator::GreaterThan),
            other => Err(format!("unknown comparator '{}'", other)),
        }
    }
}

/// Which right-hand side payload of a condition is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RhsKind {
    Constant,
    Signal,
}

impl fmt::Display for RhsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RhsKind::Constant => write!(f, "CONSTANT"),
            RhsKind::Signal => write!(f, "SIGNAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MarketRegime {
    #[default]
    Trending,
    Sideways,
    #[serde(rename = "Mean Reversion")]
    MeanReversion,
}

impl MarketRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketRegime::Trending => "Trending",
            MarketRegime::Sideways => "Sideways",
            MarketRegime::MeanReversion => "Mean Reversion",
        }
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketRegime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "trending" => Ok(MarketRegime::Trending),
            "sideways" => Ok(MarketRegime::Sideways),
            "meanreversion" | "meanreverting" => Ok(MarketRegime::MeanReversion),
            _ => Err(format!("unknown market regime '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_wire_strings_match_engine_vocabulary() {
        let wire: Vec<String> = Indicator::ALL
            .iter()
            .map(|i| serde_json::to_value(i).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            wire,
            vec!["RSI", "VOLATILITY", "VOLATILITY_MA", "MA", "MA_LONG", "Price"]
        );
        for ind in Indicator::ALL {
            assert_eq!(serde_json::to_value(ind).unwrap(), ind.as_str());
        }
    }

    #[test]
    fn first_indicator_is_rsi() {
        assert_eq!(Indicator::first(), Indicator::Rsi);
    }

    #[test]
    fn indicator_parse_aliases() {
        assert_eq!("SMA".parse::<Indicator>().unwrap(), Indicator::Ma);
        assert_eq!("PRICE".parse::<Indicator>().unwrap(), Indicator::Price);
        assert_eq!("Price".parse::<Indicator>().unwrap(), Indicator::Price);
        assert!("rsi".parse::<Indicator>().is_err());
    }

    #[test]
    fn comparator_serializes_as_symbol() {
        assert_eq!(serde_json::to_value(Comparator::LessThan).unwrap(), "<");
        assert_eq!(serde_json::to_value(Comparator::GreaterThan).unwrap(), ">");
        assert_eq!(">".parse::<Comparator>().unwrap(), Comparator::GreaterThan);
    }

    #[test]
    fn market_regime_wire_and_parse() {
        assert_eq!(
            serde_json::to_value(MarketRegime::MeanReversion).unwrap(),
            "Mean Reversion"
        );
        assert_eq!(
            "mean_reversion".parse::<MarketRegime>().unwrap(),
            MarketRegime::MeanReversion
        );
        assert_eq!(
            "MeanReversion".parse::<MarketRegime>().unwrap(),
            MarketRegime::MeanReversion
        );
        assert_eq!("sideways".parse::<MarketRegime>().unwrap(), MarketRegime::Sideways);
        assert!("bull".parse::<MarketRegime>().is_err());
    }

    #[test]
    fn rhs_kind_and_trade_side_wire() {
        assert_eq!(serde_json::to_value(RhsKind::Signal).unwrap(), "SIGNAL");
        let side: TradeSide = serde_json::from_str("\"SELL\"").unwrap();
        assert_eq!(side, TradeSide::Sell);
    }
}
