//! Itemsets command implementation.

use crate::analysis::run_analysis;
use crate::cli::ItemsetsArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use basket_domain::Itemset;
use basket_miner::{Apriori, AprioriConfig};

/// Execute the itemsets command.
pub async fn execute_itemsets(
    args: ItemsetsArgs,
    thresholds: &AprioriConfig,
    formatter: &Formatter,
) -> Result<()> {
    let analysis = run_analysis(&args.dataset, thresholds).await?;
    let itemsets = select_itemsets(&analysis.engine, args.size)?;

    println!("{}", formatter.format_itemsets(&itemsets)?);
    Ok(())
}

/// All frequent itemsets, or one level of them.
fn select_itemsets(engine: &Apriori, size: Option<usize>) -> Result<Vec<Itemset>> {
    match size {
        Some(0) => Err(CliError::InvalidInput(
            "itemset size must be at least 1".to_string(),
        )),
        Some(size) => Ok(engine.itemsets_of_size(size)),
        None => Ok(engine.levels().into_iter().flatten().collect()),
    }
}
