pub mod condition;
pub mod indicator;
pub mod params;
pub mod result;
pub mod strategy;

pub use condition::{Condition, ConditionUpdate, Rhs};
pub use indicator::*;
pub use params::RunParameters;
pub use result::{Metrics, SimulationResult, Trade};
pub use strategy::{Side, Strategy};
