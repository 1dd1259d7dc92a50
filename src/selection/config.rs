use serde::{Deserialize, Serialize};

use crate::selection::strategy::StrategyKind;
use crate::types::grouped_selection::SelectionError;

pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MIN_SCORE: f64 = 0.0;

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub min_score: f64,
    #[serde(default)]
    pub strategy: StrategyKind,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::v0()
    }
}

impl SelectionConfig {
    pub fn v0() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
            strategy: StrategyKind::Sort,
        }
    }

    /// Build from raw numeric parameters as a caller would receive them.
    ///
    /// `top_k` must be positive and `min_score` must be finite (NaN and
    /// infinities have no JSON form). Negative thresholds are allowed.
    pub fn from_params(
        top_k: i64,
        min_score: f64,
        strategy: StrategyKind,
    ) -> Result<Self, SelectionError> {
        let top_k = usize::try_from(top_k)
            .ok()
            .filter(|k| *k > 0)
            .ok_or(SelectionError::InvalidTopK(top_k))?;

        let config = Self {
            top_k,
            min_score,
            strategy,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<(), SelectionError> {
        if self.top_k == 0 {
            return Err(SelectionError::InvalidTopK(0));
        }
        if !self.min_score.is_finite() {
            return Err(SelectionError::InvalidMinScore(self.min_score));
        }
        Ok(())
    }
}
