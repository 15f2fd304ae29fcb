//! Basket Domain Layer
//!
//! This crate contains the value types of market-basket analysis. It holds
//! no mining logic and performs no I/O; the miner and the CLI build on it.
//!
//! ## Key Concepts
//!
//! - **Item**: A purchasable product, identified by its full value
//! - **Transaction**: One basket, tested for membership as a set
//! - **Itemset**: A set of items with support count and ratio
//! - **Rule**: A scored `antecedent -> consequent` association
//!
//! ## Ordering
//!
//! Items have a total order (id first), and every set of items is a
//! `BTreeSet`. Anything derived from a set, such as subsets, names, hashes
//! and display strings, is therefore deterministic across runs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod item;
pub mod itemset;
pub mod rule;
pub mod transaction;

// Re-exports for convenience
pub use error::DomainError;
pub use item::Item;
pub use itemset::Itemset;
pub use rule::{sort_rules, ConfidenceLevel, LiftInterpretation, Rule, RuleSortKey};
pub use transaction::{Transaction, TransactionId};
