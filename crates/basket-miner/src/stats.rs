//! Summary statistics of the last analysis

use serde::Serialize;
use std::fmt;

/// Snapshot of an [`Apriori`](crate::Apriori) engine's inputs and results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalysisStatistics {
    /// Transactions in the analysed dataset
    pub transaction_count: usize,
    /// Support threshold as a ratio
    pub min_support: f64,
    /// Confidence threshold as a ratio
    pub min_confidence: f64,
    /// Frequent itemsets across all levels
    pub total_itemsets: usize,
    /// Rules that cleared the confidence threshold
    pub total_rules: usize,
    /// Non-empty itemset levels (the largest frequent itemset size)
    pub levels: usize,
}

impl AnalysisStatistics {
    /// Human-readable multi-line summary with thresholds as percentages
    pub fn summary(&self) -> String {
        [
            format!("Transactions: {}", self.transaction_count),
            format!("Minimum support: {:.2}%", self.min_support * 100.0),
            format!("Minimum confidence: {:.2}%", self.min_confidence * 100.0),
            format!("Frequent itemsets: {}", self.total_itemsets),
            format!("Itemset levels: {}", self.levels),
            format!("Association rules: {}", self.total_rules),
        ]
        .join("\n")
    }
}

impl fmt::Display for AnalysisStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
