//! Metrics collection for mining runs

use serde::Serialize;
use std::collections::BTreeMap;

/// Candidate bookkeeping for one level of the search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelMetrics {
    /// Candidates produced by the pairwise join (before dedup)
    pub generated: usize,
    /// Candidates dropped as repeats of an earlier join
    pub duplicates: usize,
    /// Candidates discarded by the Apriori subset check
    pub pruned: usize,
    /// Candidates whose support was counted by a transaction scan
    pub counted: usize,
    /// Candidates that cleared the support threshold
    pub frequent: usize,
}

/// Metrics collected during one analysis run
///
/// Tracks per-level candidate counts, rule evaluation and the number of full
/// transaction scans. Counts are observational only; they never influence
/// the mined result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MiningMetrics {
    /// Per-level candidate counts, keyed by itemset size
    pub levels: BTreeMap<usize, LevelMetrics>,

    /// Antecedent/consequent splits evaluated
    pub rules_considered: usize,

    /// Splits that cleared the confidence threshold
    pub rules_emitted: usize,

    /// Full passes over the transaction list
    pub transaction_scans: usize,

    /// Wall-clock runtime of the last run in milliseconds
    pub runtime_ms: u64,
}

impl MiningMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one level
    pub fn record_level(&mut self, size: usize, level: LevelMetrics) {
        self.levels.insert(size, level);
    }

    /// Record one evaluated rule split
    pub fn record_rule(&mut self, emitted: bool) {
        self.rules_considered += 1;
        if emitted {
            self.rules_emitted += 1;
        }
    }

    /// Record full transaction scans
    pub fn record_scans(&mut self, count: usize) {
        self.transaction_scans += count;
    }

    /// Candidates counted across all levels
    pub fn total_counted(&self) -> usize {
        self.levels.values().map(|l| l.counted).sum()
    }

    /// Candidates pruned across all levels
    pub fn total_pruned(&self) -> usize {
        self.levels.values().map(|l| l.pruned).sum()
    }

    /// Duplicate candidates dropped across all levels
    pub fn total_duplicates(&self) -> usize {
        self.levels.values().map(|l| l.duplicates).sum()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Mining Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Transaction scans: {}", self.transaction_scans),
            format!("Runtime: {}ms", self.runtime_ms),
            String::new(),
        ];

        if !self.levels.is_empty() {
            lines.push("Candidates by level:".to_string());
            for (size, level) in &self.levels {
                lines.push(format!(
                    "  k={}: {} generated, {} duplicate, {} pruned, {} counted, {} frequent",
                    size, level.generated, level.duplicates, level.pruned, level.counted, level.frequent
                ));
            }
            lines.push(format!(
                "Candidates: {} counted, {} pruned, {} duplicate",
                self.total_counted(),
                self.total_pruned(),
                self.total_duplicates()
            ));
            lines.push(String::new());
        }

        lines.push(format!(
            "Rules: {} emitted of {} considered",
            self.rules_emitted, self.rules_considered
        ));

        lines.join("\n")
    }
}
