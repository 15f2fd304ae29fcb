//! Rule generation from frequent itemsets

use crate::config::is_ratio;
use crate::metrics::MiningMetrics;
use crate::support::{support_count, support_ratio};
use crate::AprioriError;
use basket_domain::{sort_rules, Item, Itemset, Rule, RuleSortKey, Transaction};
use std::collections::{BTreeSet, HashMap};

/// Splits frequent itemsets into antecedent/consequent rules
///
/// Every non-empty proper subset A of a frequent itemset I is tried as an
/// antecedent with B = I \ A as the consequent. A rule is kept when
/// `support(A ∪ B) / support(A)` reaches the confidence threshold.
pub struct RuleGenerator<'a> {
    transactions: &'a [Transaction],
    min_confidence: f64,
    counts: HashMap<BTreeSet<Item>, usize>,
}

impl<'a> RuleGenerator<'a> {
    /// Create a generator over the same transactions the itemsets came from
    ///
    /// # Errors
    /// `min_confidence` outside [0, 1] is an invalid argument.
    pub fn new(transactions: &'a [Transaction], min_confidence: f64) -> Result<Self, AprioriError> {
        if !is_ratio(min_confidence) {
            return Err(AprioriError::InvalidArgument(format!(
                "minimum confidence must be between 0.0 and 1.0, got {}",
                min_confidence
            )));
        }

        Ok(Self {
            transactions,
            min_confidence,
            counts: HashMap::new(),
        })
    }

    /// Generate rules for every frequent itemset of size 2 or more
    ///
    /// The result is sorted by confidence, highest first; ties keep
    /// generation order (levels ascending, then itemset order, then
    /// antecedent size, then subset order).
    pub fn generate(
        &mut self,
        levels: &[Vec<Itemset>],
        metrics: &mut MiningMetrics,
    ) -> Result<Vec<Rule>, AprioriError> {
        let mut rules = Vec::new();

        for itemset in levels.iter().flatten().filter(|i| i.size() >= 2) {
            self.rules_for(itemset, metrics, &mut rules)?;
        }

        sort_rules(&mut rules, RuleSortKey::Confidence);
        tracing::debug!(
            "Generated {} rules from {} splits",
            metrics.rules_emitted,
            metrics.rules_considered
        );

        Ok(rules)
    }

    fn rules_for(
        &mut self,
        itemset: &Itemset,
        metrics: &mut MiningMetrics,
        rules: &mut Vec<Rule>,
    ) -> Result<(), AprioriError> {
        let total = self.transactions.len();

        for k in 1..itemset.size() {
            for antecedent in itemset.subsets(k) {
                let consequent: BTreeSet<Item> = itemset
                    .items()
                    .difference(antecedent.items())
                    .cloned()
                    .collect();

                let antecedent_count = self.count(antecedent.items(), metrics);
                let joint_count = self.count(itemset.items(), metrics);
                let confidence = if antecedent_count == 0 {
                    0.0
                } else {
                    joint_count as f64 / antecedent_count as f64
                };

                let emitted = confidence >= self.min_confidence;
                metrics.record_rule(emitted);
                if !emitted {
                    continue;
                }

                let consequent_ratio = support_ratio(self.count(&consequent, metrics), total);
                let lift = if consequent_ratio > 0.0 {
                    itemset.support_ratio() / consequent_ratio
                } else {
                    0.0
                };

                let rule = Rule::new(
                    antecedent.items().clone(),
                    consequent,
                    confidence,
                    itemset.support_ratio(),
                )?
                .with_lift(lift)?;
                rules.push(rule);
            }
        }

        Ok(())
    }

    /// Support count of `items`, scanning the transactions once per distinct set
    fn count(&mut self, items: &BTreeSet<Item>, metrics: &mut MiningMetrics) -> usize {
        if let Some(&count) = self.counts.get(items) {
            return count;
        }
        let count = support_count(self.transactions, items);
        metrics.record_scans(1);
        self.counts.insert(items.clone(), count);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrequentItemsetMiner;

    fn item(id: u32, name: &str) -> Item {
        Item::new(id, name, "grocery", 1.0).unwrap()
    }

    fn basket(items: &[&Item]) -> Transaction {
        Transaction::new(items.iter().map(|&i| i.clone()).collect()).unwrap()
    }

    fn set(items: &[&Item]) -> BTreeSet<Item> {
        items.iter().map(|&i| i.clone()).collect()
    }

    fn mine(transactions: &[Transaction], support: f64, confidence: f64) -> Vec<Rule> {
        let mut metrics = MiningMetrics::new();
        let levels = FrequentItemsetMiner::new(transactions, support)
            .unwrap()
            .mine(&mut metrics);
        RuleGenerator::new(transactions, confidence)
            .unwrap()
            .generate(&levels, &mut metrics)
            .unwrap()
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let transactions = vec![basket(&[&item(1, "A")])];
        assert!(RuleGenerator::new(&transactions, 1.01).is_err());
        assert!(RuleGenerator::new(&transactions, f64::NAN).is_err());
    }

    #[test]
    fn test_two_item_rules() {
        let (bread, milk, eggs) = (item(1, "Bread"), item(2, "Milk"), item(3, "Eggs"));
        let transactions = vec![
            basket(&[&bread, &milk]),
            basket(&[&bread, &milk]),
            basket(&[&bread, &eggs]),
            basket(&[&milk]),
        ];

        let rules = mine(&transactions, 0.5, 0.6);

        // Bread -> Milk: 2/3, Milk -> Bread: 2/3
        assert_eq!(rules.len(), 2);
        for rule in &rules {
            assert!((rule.confidence() - 2.0 / 3.0).abs() < 1e-12);
            assert_eq!(rule.support(), 0.5);
            // support(I) / support(B) = 0.5 / 0.75
            assert!((rule.lift() - 0.5 / 0.75).abs() < 1e-12);
        }
        assert!(rules.iter().any(|r| r.antecedent() == &set(&[&bread])));
        assert!(rules.iter().any(|r| r.antecedent() == &set(&[&milk])));
    }

    #[test]
    fn test_confidence_threshold_is_inclusive() {
        let (a, b) = (item(1, "A"), item(2, "B"));
        let transactions = vec![basket(&[&a, &b]), basket(&[&a]), basket(&[&b, &a])];

        // A -> B has confidence exactly 2/3; B -> A has 1.0
        let rules = mine(&transactions, 0.0, 2.0 / 3.0);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].antecedent(), &set(&[&b]));
        assert_eq!(rules[0].confidence(), 1.0);

        let rules = mine(&transactions, 0.0, 0.7);
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_three_item_itemset_yields_all_splits() {
        let (a, b, c) = (item(1, "A"), item(2, "B"), item(3, "C"));
        let transactions = vec![basket(&[&a, &b, &c]), basket(&[&a, &b, &c])];

        let rules = mine(&transactions, 1.0, 1.0);

        // 3 pairs * 2 splits + 6 splits of {A,B,C}
        assert_eq!(rules.len(), 12);
        assert!(rules.iter().all(|r| r.confidence() == 1.0 && r.lift() == 1.0));
        assert_eq!(rules.iter().filter(|r| r.total_size() == 3).count(), 6);
    }

    #[test]
    fn test_sorted_by_confidence_descending() {
        let (a, b, c) = (item(1, "A"), item(2, "B"), item(3, "C"));
        let transactions = vec![
            basket(&[&a, &b]),
            basket(&[&a, &b]),
            basket(&[&a, &c]),
            basket(&[&b]),
            basket(&[&c, &a]),
        ];

        let rules = mine(&transactions, 0.2, 0.0);
        assert!(!rules.is_empty());
        assert!(rules
            .windows(2)
            .all(|w| w[0].confidence() >= w[1].confidence()));
    }

    #[test]
    fn test_metrics_track_splits_and_cached_scans() {
        let (a, b) = (item(1, "A"), item(2, "B"));
        let transactions = vec![basket(&[&a, &b]), basket(&[&a])];
        let levels = vec![
            vec![
                Itemset::with_support(set(&[&a]), 2, 2),
                Itemset::with_support(set(&[&b]), 1, 2),
            ],
            vec![Itemset::with_support(set(&[&a, &b]), 1, 2)],
        ];

        let mut metrics = MiningMetrics::new();
        let rules = RuleGenerator::new(&transactions, 0.9)
            .unwrap()
            .generate(&levels, &mut metrics)
            .unwrap();

        assert_eq!(metrics.rules_considered, 2);
        assert_eq!(metrics.rules_emitted, 1);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].antecedent(), &set(&[&b]));
        // {A}, {A,B}, {B}: each scanned once
        assert_eq!(metrics.transaction_scans, 3);
    }

    #[test]
    fn test_no_rules_without_multi_item_itemsets() {
        let (a, b) = (item(1, "A"), item(2, "B"));
        let transactions = vec![basket(&[&a]), basket(&[&b])];
        assert!(mine(&transactions, 0.5, 0.0).is_empty());
    }
}
