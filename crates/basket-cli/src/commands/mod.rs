//! Command implementations.

pub mod analyze;
pub mod export;
pub mod itemsets;
pub mod profile;
pub mod rules;
pub mod sales;
pub mod sample;

pub use self::analyze::execute_analyze;
pub use self::export::execute_export;
pub use self::itemsets::execute_itemsets;
pub use self::profile::execute_profile;
pub use self::rules::execute_rules;
pub use self::sales::execute_sales;
pub use self::sample::execute_sample;
