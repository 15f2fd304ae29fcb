//! Loading a dataset and running the engine off the async runtime.

use crate::dataset::Dataset;
use crate::error::{CliError, Result};
use basket_miner::{AnalysisWorker, Apriori, AprioriConfig};
use std::path::Path;

/// A finished analysis together with the dataset it ran on.
pub struct Analysis {
    /// Source dataset
    pub dataset: Dataset,
    /// Engine holding the results
    pub engine: Apriori,
}

/// Load `path` and run a full analysis with `thresholds`.
///
/// Ctrl+C abandons the run.
pub async fn run_analysis(path: &Path, thresholds: &AprioriConfig) -> Result<Analysis> {
    let dataset = Dataset::load(path)?;
    let transactions = dataset.to_transactions()?;
    if transactions.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no transactions",
            path.display()
        )));
    }

    let mut worker = AnalysisWorker::from_config(transactions, thresholds)?;
    worker.run_interruptible().await?;

    Ok(Analysis {
        dataset,
        engine: worker.into_engine(),
    })
}
