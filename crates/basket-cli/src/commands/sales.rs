//! Sales command implementation.

use crate::cli::SalesArgs;
use crate::dataset::{Dataset, SalesSummary};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the sales command.
pub async fn execute_sales(args: SalesArgs, formatter: &Formatter) -> Result<()> {
    let dataset = Dataset::load(&args.dataset)?;
    let transactions = dataset.to_transactions()?;
    let summary = SalesSummary::from_transactions(&transactions);

    println!("{}", formatter.format_sales(&summary)?);
    Ok(())
}
