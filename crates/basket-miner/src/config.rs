//! Configuration for Apriori runs
//!
//! Holds the two thresholds and offers presets for common kinds of analysis.

use crate::AprioriError;
use serde::{Deserialize, Serialize};

/// Thresholds for one analysis run
///
/// # Examples
///
/// ```
/// use basket_miner::AprioriConfig;
///
/// let config = AprioriConfig::default();
/// assert_eq!(config.min_support, 0.1);
/// assert_eq!(config.min_confidence, 0.5);
///
/// // Fewer, stronger rules
/// let config = AprioriConfig::strict();
/// assert!(config.min_support > AprioriConfig::default().min_support);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AprioriConfig {
    /// Minimum support ratio in [0, 1]
    /// Default: 0.1 (an itemset must appear in 10% of baskets)
    pub min_support: f64,

    /// Minimum confidence ratio in [0, 1]
    /// Default: 0.5
    pub min_confidence: f64,
}

impl Default for AprioriConfig {
    fn default() -> Self {
        Self {
            min_support: 0.1,
            min_confidence: 0.5,
        }
    }
}

impl AprioriConfig {
    /// Create a configuration from explicit thresholds
    ///
    /// # Errors
    /// Either threshold outside [0, 1] (or NaN) is rejected.
    pub fn new(min_support: f64, min_confidence: f64) -> Result<Self, AprioriError> {
        let config = Self {
            min_support,
            min_confidence,
        };
        config.validate()?;
        Ok(config)
    }

    /// Strict thresholds: only well-supported, high-confidence rules
    ///
    /// - Support: 0.3
    /// - Confidence: 0.8
    pub fn strict() -> Self {
        Self {
            min_support: 0.3,
            min_confidence: 0.8,
        }
    }

    /// Exploratory thresholds: surface weak co-occurrences too
    ///
    /// Low support makes the level-wise search much wider; keep it for
    /// small datasets.
    ///
    /// - Support: 0.02
    /// - Confidence: 0.2
    pub fn exploratory() -> Self {
        Self {
            min_support: 0.02,
            min_confidence: 0.2,
        }
    }

    /// Check both thresholds lie in [0, 1]
    pub fn validate(&self) -> Result<(), AprioriError> {
        if !is_ratio(self.min_support) {
            return Err(AprioriError::Config(format!(
                "min_support must be between 0.0 and 1.0, got {}",
                self.min_support
            )));
        }
        if !is_ratio(self.min_confidence) {
            return Err(AprioriError::Config(format!(
                "min_confidence must be between 0.0 and 1.0, got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}

/// True for values in the closed interval [0, 1]; NaN is rejected
pub(crate) fn is_ratio(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
