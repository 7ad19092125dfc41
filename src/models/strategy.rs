use serde::{Deserialize, Serialize};
use std::fmt;

use super::condition::{Condition, ConditionUpdate, Rhs};
use super::indicator::{Comparator, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Entry (`buy`) and exit (`sell`) rules, in the order sent to the engine.
///
/// Every edit returns a new `Strategy`. An empty side is allowed and simply
/// never fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub buy: Vec<Condition>,
    pub sell: Vec<Condition>,
}

impl Default for Strategy {
    /// Oversold entry, overbought exit.
    fn default() -> Self {
        Self {
            buy: vec![Condition::new(
                Indicator::Rsi,
                Comparator::LessThan,
                Rhs::Constant(30.0),
            )],
            sell: vec![Condition::new(
                Indicator::Rsi,
                Comparator::GreaterThan,
                Rhs::Constant(70.0),
            )],
        }
    }
}

impl Strategy {
    pub fn empty() -> Self {
        Self {
            buy: Vec::new(),
            sell: Vec::new(),
        }
    }

    pub fn side(&self, side: Side) -> &[Condition] {
        match side {
            Side::Buy => &self.buy,
            Side::Sell => &self.sell,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<Condition> {
        match side {
            Side::Buy => &mut self.buy,
            Side::Sell => &mut self.sell,
        }
    }

    pub fn add_condition(&self, side: Side, condition: Condition) -> Strategy {
        let mut next = self.clone();
        next.side_mut(side).push(condition);
        next
    }

    /// Out-of-range indices are a no-op.
    pub fn remove_condition(&self, side: Side, index: usize) -> Strategy {
        let mut next = self.clone();
        let rules = next.side_mut(side);
        if index < rules.len() {
            rules.remove(index);
        }
        next
    }

    /// Substitutes the condition at `index` with an edited copy.
    /// Out-of-range indices are a no-op.
    pub fn update_condition(&self, side: Side, index: usize, update: ConditionUpdate) -> Strategy {
        let mut next = self.clone();
        if let Some(slot) = next.side_mut(side).get_mut(index) {
            *slot = slot.with(update);
        }
        next
    }

    pub fn rule_count(&self) -> usize {
        self.buy.len() + self.sell.len()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |rules: &[Condition]| -> String {
            if rules.is_empty() {
                return "(none)".to_string();
            }
            rules
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "buy: {} | sell: {}", join(&self.buy), join(&self.sell))
    }
}
