//! Rules command implementation.

use crate::analysis::run_analysis;
use crate::cli::RulesArgs;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::output::Formatter;
use basket_domain::{sort_rules, Rule, RuleSortKey};
use basket_miner::{Apriori, AprioriConfig};

/// Execute the rules command.
pub async fn execute_rules(
    args: RulesArgs,
    thresholds: &AprioriConfig,
    formatter: &Formatter,
) -> Result<()> {
    let analysis = run_analysis(&args.dataset, thresholds).await?;
    let rules = select_rules(&analysis.engine, &analysis.dataset, &args)?;

    println!("{}", formatter.format_rules(&rules)?);
    Ok(())
}

/// Apply the item, size, sort and limit options.
fn select_rules(engine: &Apriori, dataset: &Dataset, args: &RulesArgs) -> Result<Vec<Rule>> {
    let mut rules = match &args.item {
        Some(query) => engine.rules_containing(&dataset.find_product(query)?),
        None => engine.rules(),
    };

    if let Some(size) = args.size {
        rules.retain(|r| r.total_size() == size);
    }

    sort_rules(&mut rules, RuleSortKey::from(args.sort));

    if let Some(limit) = args.limit {
        rules.truncate(limit);
    }

    Ok(rules)
}
