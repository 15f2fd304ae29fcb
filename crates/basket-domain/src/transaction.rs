//! Transaction module - one checkout basket

use crate::{DomainError, Item};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for a transaction based on UUIDv7
///
/// UUIDv7 ids sort chronologically and embed their creation time, so a
/// batch of baskets stamped in sequence keeps checkout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionId(u128);

impl TransactionId {
    /// Generate a new UUIDv7-based TransactionId
    ///
    /// # Examples
    ///
    /// ```
    /// use basket_domain::TransactionId;
    ///
    /// let id = TransactionId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a TransactionId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a TransactionId from its hyphenated string form
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| DomainError::InvalidTransactionId(format!("{}: {}", s, e)))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Milliseconds since Unix epoch encoded in the top 48 bits
    pub fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A basket of items bought together
///
/// The raw entry is kept as recorded (it may list the same item twice), but
/// every membership test goes through the distinct item set, so a duplicate
/// line never counts twice towards support.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: TransactionId,
    timestamp: u64,
    items: Vec<Item>,
    distinct: BTreeSet<Item>,
    total: f64,
}

impl Transaction {
    /// Create a transaction stamped with a fresh id and the current time
    ///
    /// # Errors
    /// Returns [`DomainError::EmptyTransaction`] when `items` is empty.
    pub fn new(items: Vec<Item>) -> Result<Self, DomainError> {
        let id = TransactionId::new();
        Self::with_metadata(id, id.timestamp(), items)
    }

    /// Rebuild a transaction with a recorded id and timestamp
    pub fn with_metadata(
        id: TransactionId,
        timestamp: u64,
        items: Vec<Item>,
    ) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::EmptyTransaction);
        }

        let distinct = items.iter().cloned().collect();
        let total = items.iter().map(Item::price).sum();

        Ok(Self {
            id,
            timestamp,
            items,
            distinct,
            total,
        })
    }

    /// Transaction identifier
    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Checkout time in milliseconds since Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// The raw item entry, duplicates included
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The distinct items in canonical order
    pub fn distinct_items(&self) -> &BTreeSet<Item> {
        &self.distinct
    }

    /// Number of lines in the raw entry
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of the prices of the raw entry
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Check whether the basket holds `item`
    pub fn contains(&self, item: &Item) -> bool {
        self.distinct.contains(item)
    }

    /// Check whether the basket holds every item of `items` (subset test)
    pub fn contains_all(&self, items: &BTreeSet<Item>) -> bool {
        items.is_subset(&self.distinct)
    }

    /// Check the transaction invariants
    pub fn is_valid(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(Item::is_valid)
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transaction {} ({} items, total {:.2})",
            self.id,
            self.item_count(),
            self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, price: f64) -> Item {
        Item::new(id, format!("item-{}", id), "test", price).unwrap()
    }

    #[test]
    fn test_transaction_id_ordering() {
        let id1 = TransactionId::from_value(1000);
        let id2 = TransactionId::from_value(2000);

        assert!(id1 < id2);
    }

    #[test]
    fn test_transaction_id_chronological() {
        let id1 = TransactionId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = TransactionId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(id1.timestamp() <= id2.timestamp());
    }

    #[test]
    fn test_transaction_id_display_and_parse() {
        let id = TransactionId::new();
        let id_str = id.to_string();
        assert_eq!(id_str.len(), 36);
        assert_eq!(TransactionId::parse(&id_str).unwrap(), id);
        assert!(TransactionId::parse("not-a-valid-uuid").is_err());
    }

    #[test]
    fn test_empty_transaction_rejected() {
        assert_eq!(
            Transaction::new(Vec::new()).unwrap_err(),
            DomainError::EmptyTransaction
        );
    }

    #[test]
    fn test_duplicates_kept_in_entry_but_not_in_set() {
        let a = item(1, 10.0);
        let b = item(2, 5.5);
        let tx = Transaction::new(vec![a.clone(), b.clone(), a.clone()]).unwrap();

        assert_eq!(tx.item_count(), 3);
        assert_eq!(tx.distinct_items().len(), 2);
        assert_eq!(tx.total(), 25.5);
        assert!(tx.contains(&a));
        assert!(tx.is_valid());
    }

    #[test]
    fn test_contains_all_is_subset_test() {
        let a = item(1, 1.0);
        let b = item(2, 1.0);
        let c = item(3, 1.0);
        let tx = Transaction::new(vec![a.clone(), b.clone()]).unwrap();

        let ab: BTreeSet<Item> = [a.clone(), b].into_iter().collect();
        let ac: BTreeSet<Item> = [a, c].into_iter().collect();
        assert!(tx.contains_all(&ab));
        assert!(!tx.contains_all(&ac));
        assert!(tx.contains_all(&BTreeSet::new()));
    }

    #[test]
    fn test_equality_by_id() {
        let id = TransactionId::from_value(42);
        let t1 = Transaction::with_metadata(id, 0, vec![item(1, 1.0)]).unwrap();
        let t2 = Transaction::with_metadata(id, 99, vec![item(2, 2.0)]).unwrap();
        assert_eq!(t1, t2);
        assert_eq!(t2.timestamp(), 99);
    }
}
