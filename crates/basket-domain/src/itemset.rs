//! Itemset module - sets of items evaluated for frequency

use crate::Item;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A set of items annotated with its support
///
/// Identity is the item set alone; the support fields are not part of it.
/// This lets a freshly enumerated subset (support 0) be matched against a
/// frequent itemset of the previous level during pruning.
///
/// Items are held in a `BTreeSet`, so iteration, hashing and display all
/// follow the canonical item order.
#[derive(Debug, Clone, Default)]
pub struct Itemset {
    items: BTreeSet<Item>,
    support_count: usize,
    support_ratio: f64,
}

impl Itemset {
    /// Create an itemset with zero support
    pub fn new(items: BTreeSet<Item>) -> Self {
        Self {
            items,
            support_count: 0,
            support_ratio: 0.0,
        }
    }

    /// Create a one-item itemset
    pub fn singleton(item: Item) -> Self {
        Self::new(BTreeSet::from([item]))
    }

    /// Create an itemset with its support already computed against `total`
    pub fn with_support(items: BTreeSet<Item>, support_count: usize, total: usize) -> Self {
        let mut itemset = Self::new(items);
        itemset.set_support(support_count, total);
        itemset
    }

    /// Assign support count and ratio together
    ///
    /// The ratio is only meaningful relative to `total`; a zero total yields
    /// a ratio of 0.
    pub fn set_support(&mut self, support_count: usize, total: usize) {
        self.support_count = support_count;
        self.support_ratio = if total > 0 {
            support_count as f64 / total as f64
        } else {
            0.0
        };
    }

    /// The items, in canonical order
    pub fn items(&self) -> &BTreeSet<Item> {
        &self.items
    }

    /// Absolute number of supporting transactions
    pub fn support_count(&self) -> usize {
        self.support_count
    }

    /// Fraction of transactions supporting this itemset
    pub fn support_ratio(&self) -> f64 {
        self.support_ratio
    }

    /// Number of items
    pub fn size(&self) -> usize {
        self.items.len()
    }

    /// True when the itemset holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item during incremental construction
    pub fn insert(&mut self, item: Item) -> bool {
        self.items.insert(item)
    }

    /// Remove an item during incremental construction
    pub fn remove(&mut self, item: &Item) -> bool {
        self.items.remove(item)
    }

    /// Check membership of a single item
    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains(item)
    }

    /// Check whether every item of `other` is in this itemset
    pub fn contains_all(&self, other: &Itemset) -> bool {
        other.items.is_subset(&self.items)
    }

    /// Union with another itemset (support reset to 0)
    pub fn union(&self, other: &Itemset) -> Itemset {
        Itemset::new(self.items.union(&other.items).cloned().collect())
    }

    /// Intersection with another itemset (support reset to 0)
    pub fn intersection(&self, other: &Itemset) -> Itemset {
        Itemset::new(self.items.intersection(&other.items).cloned().collect())
    }

    /// Check whether two itemsets can be joined into a candidate one larger
    ///
    /// Both must have the same size and differ by exactly one item on each
    /// side. The test is symmetric, so the same candidate can come out of
    /// several different pairs.
    pub fn can_join_with(&self, other: &Itemset) -> bool {
        if self.size() != other.size() {
            return false;
        }

        let mut only_self = self.items.difference(&other.items);
        let mut only_other = other.items.difference(&self.items);

        only_self.next().is_some()
            && only_self.next().is_none()
            && only_other.next().is_some()
            && only_other.next().is_none()
    }

    /// Join two itemsets into a candidate of size k + 1
    ///
    /// Returns `None` when the pair is not joinable.
    pub fn join_with(&self, other: &Itemset) -> Option<Itemset> {
        if !self.can_join_with(other) {
            return None;
        }
        Some(self.union(other))
    }

    /// Enumerate every subset of `subset_size` items
    ///
    /// Only proper, non-empty subsets are produced: the result is empty
    /// unless `1 <= subset_size < size()`. Subsets come out in lexicographic
    /// order of the canonical item order, C(n, k) of them with no duplicates.
    pub fn subsets(&self, subset_size: usize) -> Vec<Itemset> {
        if subset_size == 0 || subset_size >= self.size() {
            return Vec::new();
        }

        let items: Vec<&Item> = self.items.iter().collect();
        let mut result = Vec::new();
        let mut current = Vec::with_capacity(subset_size);
        collect_subsets(&items, subset_size, 0, &mut current, &mut result);
        result
    }

    /// Item names, sorted alphabetically
    pub fn item_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.iter().map(|i| i.name().to_string()).collect();
        names.sort();
        names
    }
}

/// Backtracking choose-k over `items[start..]`
fn collect_subsets(
    items: &[&Item],
    subset_size: usize,
    start: usize,
    current: &mut Vec<Item>,
    result: &mut Vec<Itemset>,
) {
    if current.len() == subset_size {
        result.push(Itemset::new(current.iter().cloned().collect()));
        return;
    }

    // Stop early once too few items remain to fill the subset
    let needed = subset_size - current.len();
    for i in start..=items.len() - needed {
        current.push(items[i].clone());
        collect_subsets(items, subset_size, i + 1, current, result);
        current.pop();
    }
}

impl PartialEq for Itemset {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Itemset {}

impl Hash for Itemset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl From<BTreeSet<Item>> for Itemset {
    fn from(items: BTreeSet<Item>) -> Self {
        Itemset::new(items)
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item_names().join(", "))
    }
}
