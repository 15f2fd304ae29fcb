//! Support counting shared by the miner and the rule generator

use basket_domain::{Item, Transaction};
use std::collections::BTreeSet;

/// Minimum number of supporting transactions for a ratio threshold
///
/// The smallest count `c` with `c / N >= s`, which is ⌈s × N⌉ evaluated in
/// the same arithmetic as [`support_ratio`]. An itemset meets the threshold
/// exactly when its count reaches this value, so `0.7 × 10` needs 7
/// transactions even though the product evaluates to `7.000000000000001`,
/// while `0.1 × 99 = 9.9` still needs 10.
///
/// # Examples
///
/// ```
/// use basket_miner::min_support_count;
///
/// assert_eq!(min_support_count(0.6, 5), 3);
/// assert_eq!(min_support_count(0.1, 99), 10);
/// assert_eq!(min_support_count(0.7, 10), 7);
/// assert_eq!(min_support_count(0.0, 10), 0);
/// ```
pub fn min_support_count(min_support: f64, total: usize) -> usize {
    if total == 0 {
        return 0;
    }

    let mut count = (min_support * total as f64).ceil().clamp(0.0, total as f64) as usize;
    while count > 0 && support_ratio(count - 1, total) >= min_support {
        count -= 1;
    }
    while count < total && support_ratio(count, total) < min_support {
        count += 1;
    }
    count
}

/// Number of transactions whose distinct items include all of `items`
pub fn support_count(transactions: &[Transaction], items: &BTreeSet<Item>) -> usize {
    transactions.iter().filter(|t| t.contains_all(items)).count()
}

/// `count / total`, or 0 for an empty transaction list
pub fn support_ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
