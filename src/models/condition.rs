use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::indicator::{Comparator, Indicator, RhsKind};

/// Right-hand side of a comparison: a literal or another indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rhs {
    Constant(f64),
    Signal(Indicator),
}

impl Rhs {
    pub fn kind(&self) -> RhsKind {
        match self {
            Rhs::Constant(_) => RhsKind::Constant,
            Rhs::Signal(_) => RhsKind::Signal,
        }
    }

    /// Default payload for a freshly selected kind.
    pub fn default_for(kind: RhsKind) -> Rhs {
        match kind {
            RhsKind::Constant => Rhs::Constant(0.0),
            RhsKind::Signal => Rhs::Signal(Indicator::first()),
        }
    }
}

impl fmt::Display for Rhs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rhs::Constant(v) => write!(f, "{}", v),
            Rhs::Signal(s) => write!(f, "{}", s),
        }
    }
}

/// One comparative rule: `lhs op rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub lhs: Indicator,
    pub op: Comparator,
    pub rhs: Rhs,
}

/// A single-field edit applied with [`Condition::with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionUpdate {
    Lhs(Indicator),
    Op(Comparator),
    RhsKind(RhsKind),
    RhsValue(f64),
    RhsSignal(Indicator),
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            lhs: Indicator::Price,
            op: Comparator::GreaterThan,
            rhs: Rhs::Constant(0.0),
        }
    }
}

impl Condition {
    pub fn new(lhs: Indicator, op: Comparator, rhs: Rhs) -> Self {
        Self { lhs, op, rhs }
    }

    pub fn rhs_kind(&self) -> RhsKind {
        self.rhs.kind()
    }

    /// Returns a copy with one field replaced; `self` is left untouched.
    ///
    /// Switching the rhs kind resets the payload (CONSTANT -> 0, SIGNAL ->
    /// first indicator). Selecting the kind already active keeps the payload.
    /// A value or signal edit aimed at the inactive rhs field is ignored, as
    /// is a non-finite value.
    pub fn with(&self, update: ConditionUpdate) -> Condition {
        let mut next = *self;
        match update {
            ConditionUpdate::Lhs(lhs) => next.lhs = lhs,
            ConditionUpdate::Op(op) => next.op = op,
            ConditionUpdate::RhsKind(kind) => {
                if kind != self.rhs.kind() {
                    next.rhs = Rhs::default_for(kind);
                }
            }
            ConditionUpdate::RhsValue(v) => {
                if matches!(self.rhs, Rhs::Constant(_)) && v.is_finite() {
                    next.rhs = Rhs::Constant(v);
                }
            }
            ConditionUpdate::RhsSignal(s) => {
                if let Rhs::Signal(_) = self.rhs {
                    next.rhs = Rhs::Signal(s);
                }
            }
        }
        next
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// Parses rule text such as `RSI < 30` or `MA > MA_LONG`.
impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op_pos = s
            .find(|c: char| c == '<' || c == '>')
            .ok_or_else(|| format!("rule '{}' has no '<' or '>'", s))?;

        let lhs: Indicator = s[..op_pos].parse()?;
        let op: Comparator = s[op_pos..op_pos + 1].parse()?;
        let rhs_text = s[op_pos + 1..].trim();
        if rhs_text.is_empty() {
            return Err(format!("rule '{}' has no right-hand side", s));
        }

        let rhs = match rhs_text.parse::<f64>() {
            Ok(v) if v.is_finite() => Rhs::Constant(v),
            Ok(_) => return Err(format!("rule '{}' has a non-finite constant", s)),
            Err(_) => Rhs::Signal(rhs_text.parse()?),
        };

        Ok(Condition { lhs, op, rhs })
    }
}
