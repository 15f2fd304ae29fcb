//! Level-wise frequent-itemset search

use crate::config::is_ratio;
use crate::metrics::{LevelMetrics, MiningMetrics};
use crate::support::{min_support_count, support_count};
use crate::AprioriError;
use basket_domain::{Item, Itemset, Transaction};
use std::collections::{BTreeMap, HashSet};

/// Finds every itemset whose support clears the threshold
///
/// Level 1 is built from raw item counts. Each later level is built only
/// from the frequent itemsets of the level before it: joinable pairs are
/// unioned, repeats are dropped, candidates with an infrequent subset are
/// pruned without a scan, and the survivors are counted against every
/// transaction.
///
/// # Examples
///
/// ```
/// use basket_domain::{Item, Transaction};
/// use basket_miner::{FrequentItemsetMiner, MiningMetrics};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bread = Item::new(1, "Bread", "Bakery", 15000.0)?;
/// let milk = Item::new(2, "Milk", "Dairy", 8000.0)?;
/// let transactions = vec![
///     Transaction::new(vec![bread.clone(), milk.clone()])?,
///     Transaction::new(vec![bread.clone(), milk])?,
///     Transaction::new(vec![bread])?,
/// ];
///
/// let miner = FrequentItemsetMiner::new(&transactions, 0.6)?;
/// let levels = miner.mine(&mut MiningMetrics::new());
/// assert_eq!(levels.len(), 2);
/// assert_eq!(levels[1][0].support_count(), 2);
/// # Ok(())
/// # }
/// ```
pub struct FrequentItemsetMiner<'a> {
    transactions: &'a [Transaction],
    min_support_count: usize,
}

impl<'a> FrequentItemsetMiner<'a> {
    /// Create a miner over `transactions` with a support ratio threshold
    ///
    /// # Errors
    /// `min_support` outside [0, 1] is an invalid argument.
    pub fn new(transactions: &'a [Transaction], min_support: f64) -> Result<Self, AprioriError> {
        if !is_ratio(min_support) {
            return Err(AprioriError::InvalidArgument(format!(
                "minimum support must be between 0.0 and 1.0, got {}",
                min_support
            )));
        }

        Ok(Self {
            transactions,
            min_support_count: min_support_count(min_support, transactions.len()),
        })
    }

    /// Support count an itemset needs to be kept
    pub fn min_support_count(&self) -> usize {
        self.min_support_count
    }

    /// Run the level-wise search
    ///
    /// Returns the frequent levels in increasing size order starting at 1.
    /// The search stops at the first level with no frequent itemsets; an
    /// empty result just means nothing cleared the threshold.
    pub fn mine(&self, metrics: &mut MiningMetrics) -> Vec<Vec<Itemset>> {
        let mut levels = Vec::new();

        let mut current = self.frequent_singletons(metrics);
        let mut k = 2;

        while !current.is_empty() {
            let next = self.next_level(&current, k, metrics);
            levels.push(current);
            current = next;
            k += 1;
        }

        levels
    }

    /// Frequent 1-itemsets, in item order
    pub fn frequent_singletons(&self, metrics: &mut MiningMetrics) -> Vec<Itemset> {
        let mut counts: BTreeMap<&Item, usize> = BTreeMap::new();
        for transaction in self.transactions {
            for item in transaction.distinct_items() {
                *counts.entry(item).or_insert(0) += 1;
            }
        }
        metrics.record_scans(1);

        let total = self.transactions.len();
        let frequent: Vec<Itemset> = counts
            .iter()
            .filter(|(_, &count)| count >= self.min_support_count)
            .map(|(&item, &count)| {
                let mut itemset = Itemset::singleton(item.clone());
                itemset.set_support(count, total);
                itemset
            })
            .collect();

        metrics.record_level(
            1,
            LevelMetrics {
                generated: counts.len(),
                duplicates: 0,
                pruned: 0,
                counted: counts.len(),
                frequent: frequent.len(),
            },
        );
        tracing::debug!(
            "Level 1: {} distinct items, {} frequent (threshold {})",
            counts.len(),
            frequent.len(),
            self.min_support_count
        );

        frequent
    }

    /// Build, prune and count the size-`k` level from level `k - 1`
    pub fn next_level(
        &self,
        previous: &[Itemset],
        k: usize,
        metrics: &mut MiningMetrics,
    ) -> Vec<Itemset> {
        let mut level = LevelMetrics::default();
        let candidates = generate_candidates(previous, k, &mut level);

        let total = self.transactions.len();
        let mut frequent = Vec::new();
        for mut candidate in candidates {
            let count = support_count(self.transactions, candidate.items());
            level.counted += 1;
            if count >= self.min_support_count {
                candidate.set_support(count, total);
                frequent.push(candidate);
            }
        }
        level.frequent = frequent.len();

        metrics.record_scans(level.counted);
        metrics.record_level(k, level);
        tracing::debug!(
            "Level {}: {} joined, {} duplicate, {} pruned, {} counted, {} frequent",
            k,
            level.generated,
            level.duplicates,
            level.pruned,
            level.counted,
            level.frequent
        );

        frequent
    }
}

/// Join every pair of `previous`, dedupe and prune
///
/// The join is symmetric, so the same size-k union can come from several
/// pairs; only its first occurrence is kept. Pruning runs before any support
/// count.
fn generate_candidates(previous: &[Itemset], k: usize, level: &mut LevelMetrics) -> Vec<Itemset> {
    let known: HashSet<&Itemset> = previous.iter().collect();
    let mut seen: HashSet<Itemset> = HashSet::new();
    let mut candidates = Vec::new();

    for (i, left) in previous.iter().enumerate() {
        for right in &previous[i + 1..] {
            let Some(candidate) = left.join_with(right) else {
                continue;
            };
            if candidate.size() != k {
                continue;
            }
            level.generated += 1;

            if !seen.insert(candidate.clone()) {
                level.duplicates += 1;
                continue;
            }
            if has_infrequent_subset(&candidate, &known) {
                level.pruned += 1;
                continue;
            }
            candidates.push(candidate);
        }
    }

    candidates
}

/// Apriori check: every (k-1)-subset must already be frequent
fn has_infrequent_subset(candidate: &Itemset, known: &HashSet<&Itemset>) -> bool {
    candidate
        .subsets(candidate.size() - 1)
        .iter()
        .any(|subset| !known.contains(subset))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn catalog() -> Vec<Item> {
        (0..6u32)
            .map(|i| Item::new(i, format!("p{}", i), "c", 1.0 + i as f64).unwrap())
            .collect()
    }

    fn baskets() -> impl Strategy<Value = Vec<BTreeSet<usize>>> {
        prop::collection::vec(prop::collection::btree_set(0usize..6, 1..5), 1..12)
    }

    proptest! {
        /// Property: every reported itemset is frequent and its count matches a direct scan
        #[test]
        fn test_reported_support_matches_scan(raw in baskets(), support in 0.05f64..1.0) {
            let items = catalog();
            let transactions: Vec<Transaction> = raw
                .iter()
                .map(|ids| Transaction::new(ids.iter().map(|&i| items[i].clone()).collect()).unwrap())
                .collect();

            let miner = FrequentItemsetMiner::new(&transactions, support).unwrap();
            let levels = miner.mine(&mut MiningMetrics::new());

            for (index, level) in levels.iter().enumerate() {
                prop_assert!(!level.is_empty());
                for itemset in level {
                    prop_assert_eq!(itemset.size(), index + 1);
                    let direct = support_count(&transactions, itemset.items());
                    prop_assert_eq!(itemset.support_count(), direct);
                    prop_assert!(direct >= miner.min_support_count());
                }
            }
        }

        /// Property: every proper subset of a frequent itemset was itself reported
        #[test]
        fn test_downward_closure(raw in baskets(), support in 0.05f64..1.0) {
            let items = catalog();
            let transactions: Vec<Transaction> = raw
                .iter()
                .map(|ids| Transaction::new(ids.iter().map(|&i| items[i].clone()).collect()).unwrap())
                .collect();

            let miner = FrequentItemsetMiner::new(&transactions, support).unwrap();
            let levels = miner.mine(&mut MiningMetrics::new());

            for window in levels.windows(2) {
                let lower: HashSet<&Itemset> = window[0].iter().collect();
                for itemset in &window[1] {
                    for subset in itemset.subsets(itemset.size() - 1) {
                        prop_assert!(lower.contains(&subset));
                    }
                }
            }
        }

        /// Property: no level reports the same itemset twice
        #[test]
        fn test_levels_have_no_repeats(raw in baskets(), support in 0.05f64..1.0) {
            let items = catalog();
            let transactions: Vec<Transaction> = raw
                .iter()
                .map(|ids| Transaction::new(ids.iter().map(|&i| items[i].clone()).collect()).unwrap())
                .collect();

            let miner = FrequentItemsetMiner::new(&transactions, support).unwrap();
            for level in miner.mine(&mut MiningMetrics::new()) {
                let distinct: HashSet<&Itemset> = level.iter().collect();
                prop_assert_eq!(distinct.len(), level.len());
            }
        }
    }
}
