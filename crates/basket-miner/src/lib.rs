//! Basket Miner
//!
//! Apriori frequent-itemset mining and association-rule generation over
//! market-basket transactions.
//!
//! # Overview
//!
//! An analysis has two phases:
//! - **Frequent itemsets**: a level-wise search that grows candidates one item
//!   at a time and keeps those whose support reaches the threshold
//! - **Association rules**: every frequent itemset of two or more items is
//!   split into antecedent/consequent pairs, kept when confidence reaches the
//!   threshold
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|------------|
//! | **Support** of X | fraction of transactions containing every item of X |
//! | **Confidence** of A → B | support(A ∪ B) / support(A) |
//! | **Lift** of A → B | support(A ∪ B) / support(B) |
//!
//! Lift is computed without the antecedent term of the textbook formula;
//! values above 1 still read as "B is more common alongside A".
//!
//! The support threshold is applied as an absolute count, ⌈s × N⌉ (see
//! [`min_support_count`]).
//!
//! # Usage
//!
//! ## One-shot Analysis
//!
//! ```
//! use basket_domain::{Item, Transaction};
//! use basket_miner::Apriori;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bread = Item::new(1, "Bread", "Bakery", 15000.0)?;
//! let eggs = Item::new(3, "Eggs", "Protein", 25000.0)?;
//! let transactions = vec![
//!     Transaction::new(vec![bread.clone(), eggs.clone()])?,
//!     Transaction::new(vec![bread.clone(), eggs])?,
//!     Transaction::new(vec![bread])?,
//! ];
//!
//! let mut apriori = Apriori::with_params(transactions, 0.5, 0.6)?;
//! for rule in apriori.run()? {
//!     println!("{}", rule);
//! }
//! println!("{}", apriori.metrics().summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Background Analysis
//!
//! ```no_run
//! use basket_miner::{AnalysisWorker, AprioriConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     # let transactions = Vec::new();
//!     let mut worker = AnalysisWorker::from_config(transactions, &AprioriConfig::default())?;
//!
//!     // Abandon the run on Ctrl+C
//!     let rules = worker.run_interruptible().await?;
//!     println!("{} rules", rules.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration Presets
//!
//! ```
//! use basket_miner::AprioriConfig;
//!
//! // Default: 10% support, 50% confidence
//! let config = AprioriConfig::default();
//!
//! // Strict: few, strong rules
//! let config = AprioriConfig::strict();
//!
//! // Exploratory: weak co-occurrences too (small datasets only)
//! let config = AprioriConfig::exploratory();
//! ```
//!
//! # Configuration
//!
//! Thresholds can be read from TOML:
//!
//! ```toml
//! min_support = 0.1
//! min_confidence = 0.5
//! ```

#![warn(missing_docs)]

mod apriori;
mod config;
mod error;
mod generator;
mod metrics;
mod miner;
mod stats;
mod support;
mod worker;

pub use apriori::Apriori;
pub use config::AprioriConfig;
pub use error::AprioriError;
pub use generator::RuleGenerator;
pub use metrics::{LevelMetrics, MiningMetrics};
pub use miner::FrequentItemsetMiner;
pub use stats::AnalysisStatistics;
pub use support::{min_support_count, support_count, support_ratio};
pub use worker::AnalysisWorker;
