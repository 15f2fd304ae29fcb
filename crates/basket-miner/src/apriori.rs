//! Apriori engine: owns the inputs and results of an analysis

use crate::config::is_ratio;
use crate::{
    AnalysisStatistics, AprioriConfig, AprioriError, FrequentItemsetMiner, MiningMetrics,
    RuleGenerator,
};
use basket_domain::{Item, Itemset, Rule, Transaction};
use std::time::Instant;

/// Apriori analysis engine
///
/// Responsible for:
/// - Holding the transaction list and both thresholds
/// - Running the miner then the rule generator
/// - Keeping the last run's itemset levels, rules and metrics
///
/// Results are replaced wholesale by each successful [`run`](Self::run) and
/// handed out as owned copies, so callers can never observe a half-built
/// result or mutate the engine's state through a returned value.
///
/// # Examples
///
/// ```
/// use basket_domain::{Item, Transaction};
/// use basket_miner::Apriori;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bread = Item::new(1, "Bread", "Bakery", 15000.0)?;
/// let milk = Item::new(2, "Milk", "Dairy", 8000.0)?;
/// let transactions = vec![
///     Transaction::new(vec![bread.clone(), milk.clone()])?,
///     Transaction::new(vec![bread.clone(), milk.clone()])?,
///     Transaction::new(vec![milk])?,
/// ];
///
/// let mut apriori = Apriori::with_params(transactions, 0.5, 0.6)?;
/// let rules = apriori.run()?;
///
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[0].confidence(), 1.0); // Bread -> Milk
/// println!("{}", apriori.statistics().summary());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Apriori {
    transactions: Vec<Transaction>,
    min_support: Option<f64>,
    min_confidence: Option<f64>,
    levels: Vec<Vec<Itemset>>,
    rules: Vec<Rule>,
    metrics: MiningMetrics,
}

impl Apriori {
    /// Create an unconfigured engine
    ///
    /// Transactions and both thresholds must be set before [`run`](Self::run).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully configured engine
    pub fn with_params(
        transactions: Vec<Transaction>,
        min_support: f64,
        min_confidence: f64,
    ) -> Result<Self, AprioriError> {
        let mut apriori = Self::new();
        apriori.set_transactions(transactions)?;
        apriori.set_min_support(min_support)?;
        apriori.set_min_confidence(min_confidence)?;
        Ok(apriori)
    }

    /// Create an engine from a threshold configuration
    pub fn from_config(
        transactions: Vec<Transaction>,
        config: &AprioriConfig,
    ) -> Result<Self, AprioriError> {
        config.validate()?;
        Self::with_params(transactions, config.min_support, config.min_confidence)
    }

    /// Replace the transaction list
    ///
    /// # Errors
    /// An empty list is an invalid argument.
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) -> Result<(), AprioriError> {
        if transactions.is_empty() {
            return Err(AprioriError::InvalidArgument(
                "transaction list must not be empty".to_string(),
            ));
        }
        self.transactions = transactions;
        Ok(())
    }

    /// Set the support threshold
    ///
    /// # Errors
    /// Values outside [0, 1] (or NaN) are invalid arguments.
    pub fn set_min_support(&mut self, min_support: f64) -> Result<(), AprioriError> {
        self.min_support = Some(check_ratio("minimum support", min_support)?);
        Ok(())
    }

    /// Set the confidence threshold
    ///
    /// # Errors
    /// Values outside [0, 1] (or NaN) are invalid arguments.
    pub fn set_min_confidence(&mut self, min_confidence: f64) -> Result<(), AprioriError> {
        self.min_confidence = Some(check_ratio("minimum confidence", min_confidence)?);
        Ok(())
    }

    /// The configured transactions
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The configured support threshold, if set
    pub fn min_support(&self) -> Option<f64> {
        self.min_support
    }

    /// The configured confidence threshold, if set
    pub fn min_confidence(&self) -> Option<f64> {
        self.min_confidence
    }

    /// Run the full analysis and return the rules
    ///
    /// Frequent itemsets are mined first, then rules are derived from them.
    /// Previous results are discarded only once both phases have succeeded.
    ///
    /// # Errors
    /// [`AprioriError::InvalidState`] when transactions or a threshold were
    /// never set.
    pub fn run(&mut self) -> Result<Vec<Rule>, AprioriError> {
        let (min_support, min_confidence) = self.thresholds()?;
        if self.transactions.is_empty() {
            return Err(AprioriError::InvalidState(
                "transactions have not been set".to_string(),
            ));
        }

        tracing::info!(
            "Starting analysis: {} transactions, min_support={}, min_confidence={}",
            self.transactions.len(),
            min_support,
            min_confidence
        );
        let start = Instant::now();
        let mut metrics = MiningMetrics::new();

        let levels = FrequentItemsetMiner::new(&self.transactions, min_support)?.mine(&mut metrics);
        let rules =
            RuleGenerator::new(&self.transactions, min_confidence)?.generate(&levels, &mut metrics)?;

        metrics.runtime_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            "Analysis complete: {} itemsets in {} levels, {} rules ({}ms)",
            levels.iter().map(Vec::len).sum::<usize>(),
            levels.len(),
            rules.len(),
            metrics.runtime_ms
        );
        tracing::debug!("{}", metrics.summary());

        self.levels = levels;
        self.rules = rules;
        self.metrics = metrics;

        Ok(self.rules.clone())
    }

    /// Frequent itemsets of the last run, by level (index 0 = size 1)
    pub fn levels(&self) -> Vec<Vec<Itemset>> {
        self.levels.clone()
    }

    /// Rules of the last run, sorted by confidence descending
    pub fn rules(&self) -> Vec<Rule> {
        self.rules.clone()
    }

    /// Frequent itemsets of exactly `size` items
    ///
    /// Empty when no level of that size was produced.
    pub fn itemsets_of_size(&self, size: usize) -> Vec<Itemset> {
        size.checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .cloned()
            .unwrap_or_default()
    }

    /// Rules whose antecedent and consequent together hold `size` items
    pub fn rules_of_size(&self, size: usize) -> Vec<Rule> {
        self.rules
            .iter()
            .filter(|r| r.total_size() == size)
            .cloned()
            .collect()
    }

    /// Rules mentioning `item` on either side
    pub fn rules_containing(&self, item: &Item) -> Vec<Rule> {
        self.rules
            .iter()
            .filter(|r| r.contains_item(item))
            .cloned()
            .collect()
    }

    /// Statistics for the configured inputs and the last run
    pub fn statistics(&self) -> AnalysisStatistics {
        AnalysisStatistics {
            transaction_count: self.transactions.len(),
            min_support: self.min_support.unwrap_or_default(),
            min_confidence: self.min_confidence.unwrap_or_default(),
            total_itemsets: self.levels.iter().map(Vec::len).sum(),
            total_rules: self.rules.len(),
            levels: self.levels.len(),
        }
    }

    /// Metrics of the last run
    pub fn metrics(&self) -> &MiningMetrics {
        &self.metrics
    }

    fn thresholds(&self) -> Result<(f64, f64), AprioriError> {
        let min_support = self.min_support.ok_or_else(|| {
            AprioriError::InvalidState("minimum support has not been set".to_string())
        })?;
        let min_confidence = self.min_confidence.ok_or_else(|| {
            AprioriError::InvalidState("minimum confidence has not been set".to_string())
        })?;
        Ok((min_support, min_confidence))
    }
}

fn check_ratio(name: &str, value: f64) -> Result<f64, AprioriError> {
    if is_ratio(value) {
        Ok(value)
    } else {
        Err(AprioriError::InvalidArgument(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn item(id: u32, name: &str) -> Item {
        Item::new(id, name, "grocery", 1.0).unwrap()
    }

    fn basket(items: &[&Item]) -> Transaction {
        Transaction::new(items.iter().map(|&i| i.clone()).collect()).unwrap()
    }

    fn set(items: &[&Item]) -> BTreeSet<Item> {
        items.iter().map(|&i| i.clone()).collect()
    }

    fn classic() -> (Vec<Item>, Vec<Transaction>) {
        let (a, b, c) = (item(1, "A"), item(2, "B"), item(3, "C"));
        let transactions = vec![
            basket(&[&a, &b, &c]),
            basket(&[&a, &b]),
            basket(&[&a, &c]),
            basket(&[&b, &c]),
            basket(&[&a, &b, &c]),
        ];
        (vec![a, b, c], transactions)
    }

    #[test]
    fn test_itemsets_never_fall_below_threshold() {
        let (a, b) = (item(1, "A"), item(2, "B"));
        let mut transactions: Vec<Transaction> = (0..3).map(|_| basket(&[&a])).collect();
        transactions.extend((0..7).map(|_| basket(&[&b])));

        let min_support = 0.30000000001;
        let mut apriori = Apriori::with_params(transactions, min_support, 0.5).unwrap();
        apriori.run().unwrap();

        let singles = apriori.itemsets_of_size(1);
        assert_eq!(singles.len(), 1);
        assert!(singles.iter().all(|i| i.support_ratio() >= min_support));
        assert!(!singles.iter().any(|i| i.contains(&a)));
    }

    #[test]
    fn test_classic_basket() {
        let (items, transactions) = classic();
        let (a, b) = (&items[0], &items[1]);
        let mut apriori = Apriori::with_params(transactions, 0.6, 0.6).unwrap();

        let rules = apriori.run().unwrap();

        let singles = apriori.itemsets_of_size(1);
        assert_eq!(singles.len(), 3);
        assert!(singles.iter().all(|i| i.support_ratio() == 0.8));

        let pairs = apriori.itemsets_of_size(2);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|i| i.support_ratio() == 0.6));
        assert!(apriori.itemsets_of_size(3).is_empty());

        assert_eq!(rules.len(), 6);
        let a_to_b = rules
            .iter()
            .find(|r| r.antecedent() == &set(&[a]) && r.consequent() == &set(&[b]))
            .unwrap();
        assert_eq!(a_to_b.confidence(), 0.75);
        assert_eq!(a_to_b.support(), 0.6);
        assert!((a_to_b.lift() - 0.75).abs() < 1e-12);
        assert!(rules
            .iter()
            .any(|r| r.antecedent() == &set(&[b]) && r.consequent() == &set(&[a])));
    }

    #[test]
    fn test_empty_result() {
        let (a, b) = (item(1, "A"), item(2, "B"));
        let transactions = vec![basket(&[&a]), basket(&[&a]), basket(&[&b]), basket(&[&b])];
        let mut apriori = Apriori::with_params(transactions, 0.5, 0.1).unwrap();

        let rules = apriori.run().unwrap();

        assert!(rules.is_empty());
        assert_eq!(apriori.levels().len(), 1);
        assert_eq!(apriori.itemsets_of_size(1).len(), 2);
        assert!(apriori.itemsets_of_size(2).is_empty());
    }

    #[test]
    fn test_single_transaction() {
        let (a, b, c) = (item(1, "A"), item(2, "B"), item(3, "C"));
        let mut apriori =
            Apriori::with_params(vec![basket(&[&a, &b, &c])], 1.0, 1.0).unwrap();

        let rules = apriori.run().unwrap();

        assert_eq!(apriori.itemsets_of_size(1).len(), 3);
        assert_eq!(apriori.itemsets_of_size(2).len(), 3);
        assert_eq!(apriori.itemsets_of_size(3).len(), 1);
        assert!(apriori
            .levels()
            .iter()
            .flatten()
            .all(|i| i.support_ratio() == 1.0));
        assert_eq!(rules.len(), 12);
        assert!(rules.iter().all(|r| r.confidence() == 1.0));
        assert_eq!(apriori.rules_of_size(3).len(), 6);
        assert_eq!(apriori.rules_of_size(2).len(), 6);
    }

    #[test]
    fn test_run_before_configuration_is_invalid_state() {
        let mut apriori = Apriori::new();
        assert!(matches!(apriori.run(), Err(AprioriError::InvalidState(_))));

        let (_, transactions) = classic();
        apriori.set_transactions(transactions).unwrap();
        apriori.set_min_support(0.5).unwrap();
        assert!(matches!(apriori.run(), Err(AprioriError::InvalidState(_))));

        apriori.set_min_confidence(0.5).unwrap();
        assert!(apriori.run().is_ok());
    }

    #[test]
    fn test_setters_validate() {
        let mut apriori = Apriori::new();
        assert!(matches!(
            apriori.set_transactions(Vec::new()),
            Err(AprioriError::InvalidArgument(_))
        ));
        assert!(apriori.set_min_support(1.5).is_err());
        assert!(apriori.set_min_support(f64::NAN).is_err());
        assert!(apriori.set_min_confidence(-0.1).is_err());
        assert_eq!(apriori.min_support(), None);
        assert!(Apriori::from_config(Vec::new(), &AprioriConfig::default()).is_err());
    }

    #[test]
    fn test_failed_setter_keeps_previous_value() {
        let (_, transactions) = classic();
        let mut apriori = Apriori::with_params(transactions, 0.6, 0.6).unwrap();
        assert!(apriori.set_min_support(2.0).is_err());
        assert!(apriori.set_transactions(Vec::new()).is_err());
        assert_eq!(apriori.min_support(), Some(0.6));
        assert_eq!(apriori.transactions().len(), 5);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let (_, transactions) = classic();
        let mut apriori = Apriori::with_params(transactions, 0.4, 0.5).unwrap();

        let first = apriori.run().unwrap();
        let first_levels = apriori.levels();
        let second = apriori.run().unwrap();

        assert_eq!(first, second);
        assert_eq!(first_levels, apriori.levels());
        for (x, y) in first.iter().zip(&second) {
            assert_eq!(x.confidence(), y.confidence());
            assert_eq!(x.lift(), y.lift());
        }
    }

    #[test]
    fn test_rerun_replaces_results() {
        let (_, transactions) = classic();
        let mut apriori = Apriori::with_params(transactions, 0.6, 0.6).unwrap();
        assert_eq!(apriori.run().unwrap().len(), 6);

        apriori.set_min_confidence(0.9).unwrap();
        assert!(apriori.run().unwrap().is_empty());
        assert!(apriori.rules().is_empty());
        assert_eq!(apriori.levels().len(), 2);
    }

    #[test]
    fn test_accessors_return_copies() {
        let (items, transactions) = classic();
        let mut apriori = Apriori::with_params(transactions, 0.6, 0.6).unwrap();
        apriori.run().unwrap();

        let mut levels = apriori.levels();
        levels.clear();
        let mut rules = apriori.rules();
        rules.truncate(1);

        assert_eq!(apriori.levels().len(), 2);
        assert_eq!(apriori.rules().len(), 6);
        assert_eq!(apriori.rules_containing(&items[0]).len(), 4);
        assert!(apriori.itemsets_of_size(0).is_empty());
        assert!(apriori.itemsets_of_size(9).is_empty());
    }

    #[test]
    fn test_statistics_and_metrics() {
        let (_, transactions) = classic();
        let mut apriori = Apriori::from_config(transactions, &AprioriConfig::new(0.6, 0.6).unwrap()).unwrap();
        apriori.run().unwrap();

        let stats = apriori.statistics();
        assert_eq!(stats.transaction_count, 5);
        assert_eq!(stats.total_itemsets, 6);
        assert_eq!(stats.total_rules, 6);
        assert_eq!(stats.levels, 2);
        assert!(stats.summary().contains("Minimum support: 60.00%"));

        let metrics = apriori.metrics();
        assert_eq!(metrics.rules_considered, 6);
        assert_eq!(metrics.rules_emitted, 6);
        assert_eq!(metrics.levels[&3].counted, 1);
    }

    #[test]
    fn test_engine_is_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<Apriori>();
    }
}
