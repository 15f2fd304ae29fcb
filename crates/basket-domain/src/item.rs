//! Item module - the atomic unit of a basket

use crate::DomainError;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A purchasable product
///
/// Identity is the full value: two records with the same id but a different
/// price are different items for itemset and rule purposes. Items have no
/// setters, so a value referenced by a transaction can never drift while an
/// analysis is running.
#[derive(Debug, Clone)]
pub struct Item {
    id: u32,
    name: String,
    category: String,
    price: f64,
}

impl Item {
    /// Create a validated item
    ///
    /// # Errors
    /// Returns an error if the name or category is blank, or if the price is
    /// not a finite value greater than zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use basket_domain::Item;
    ///
    /// let bread = Item::new(1, "Bread", "Bakery", 15000.0).unwrap();
    /// assert_eq!(bread.name(), "Bread");
    /// assert!(Item::new(2, "Milk", "Dairy", 0.0).is_err());
    /// ```
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let category = category.into();

        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if category.trim().is_empty() {
            return Err(DomainError::EmptyCategory);
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(DomainError::InvalidPrice(price));
        }

        Ok(Self {
            id,
            name,
            category,
            price,
        })
    }

    /// Numeric product identifier
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category label
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Unit price (always > 0)
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Check the item invariants
    ///
    /// Always true for values built through [`Item::new`].
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.category.trim().is_empty()
            && self.price.is_finite()
            && self.price > 0.0
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.price.to_bits() == other.price.to_bits()
            && self.name == other.name
            && self.category == other.category
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.name.hash(state);
        self.category.hash(state);
        self.price.to_bits().hash(state);
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.category.cmp(&other.category))
            .then_with(|| self.price.total_cmp(&other.price))
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
