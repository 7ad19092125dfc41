use serde::{Deserialize, Serialize};

use super::indicator::MarketRegime;
use crate::error::ClientError;

/// Market regime, step count and seed for one simulation.
///
/// `seed` is opaque to the client and forwarded unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParameters {
    pub market: MarketRegime,
    pub timesteps: u32,
    pub seed: i64,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            market: MarketRegime::Trending,
            timesteps: 1000,
            seed: 42,
        }
    }
}

impl RunParameters {
    /// Checks the engine's preconditions. Submission does not require this to
    /// pass; callers decide whether to surface it.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.timesteps == 0 {
            return Err(ClientError::Validation(
                "timesteps must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_flags_zero_timesteps() {
        let p = RunParameters {
            timesteps: 0,
            ..RunParameters::default()
        };
        assert!(matches!(p.validate(), Err(ClientError::Validation(_))));
        assert!(RunParameters::default().validate().is_ok());
    }
}
