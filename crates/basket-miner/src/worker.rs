//! Off-runtime execution of an analysis

use crate::{Apriori, AprioriConfig, AprioriError};
use basket_domain::{Rule, Transaction};
use std::future::Future;

/// Runs an [`Apriori`] engine on tokio's blocking thread pool
///
/// The search is CPU-bound and synchronous, so it must not run on an async
/// worker thread. Each run works on its own copy of the engine; the copy
/// replaces the held engine only when the run finishes. A cancelled run
/// leaves the previous results untouched.
///
/// # Examples
///
/// ```
/// use basket_domain::{Item, Transaction};
/// use basket_miner::{AnalysisWorker, AprioriConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let tea = Item::new(8, "Tea", "Drinks", 15000.0)?;
///     let sugar = Item::new(6, "Sugar", "Pantry", 12000.0)?;
///     let transactions = vec![
///         Transaction::new(vec![tea.clone(), sugar.clone()])?,
///         Transaction::new(vec![tea, sugar])?,
///     ];
///
///     let mut worker = AnalysisWorker::from_config(transactions, &AprioriConfig::default())?;
///     let rules = worker.run().await?;
///     assert_eq!(rules.len(), 2);
///     Ok(())
/// }
/// ```
pub struct AnalysisWorker {
    engine: Apriori,
}

impl AnalysisWorker {
    /// Wrap a configured engine
    pub fn new(engine: Apriori) -> Self {
        Self { engine }
    }

    /// Build the engine from transactions and a threshold configuration
    pub fn from_config(
        transactions: Vec<Transaction>,
        config: &AprioriConfig,
    ) -> Result<Self, AprioriError> {
        Ok(Self::new(Apriori::from_config(transactions, config)?))
    }

    /// The engine holding the last completed run
    pub fn engine(&self) -> &Apriori {
        &self.engine
    }

    /// Mutable access for reconfiguring between runs
    pub fn engine_mut(&mut self) -> &mut Apriori {
        &mut self.engine
    }

    /// Consume the worker and return the engine
    pub fn into_engine(self) -> Apriori {
        self.engine
    }

    /// Run the analysis to completion
    ///
    /// # Errors
    /// Engine errors pass through; a panicked or aborted task becomes
    /// [`AprioriError::Worker`].
    pub async fn run(&mut self) -> Result<Vec<Rule>, AprioriError> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Run the analysis until it finishes or Ctrl+C is received
    pub async fn run_interruptible(&mut self) -> Result<Vec<Rule>, AprioriError> {
        self.run_until(async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available: never cancel
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run the analysis, abandoning it if `shutdown` resolves first
    ///
    /// The blocking task is not interrupted; its result is dropped when it
    /// eventually finishes.
    pub async fn run_until<F>(&mut self, shutdown: F) -> Result<Vec<Rule>, AprioriError>
    where
        F: Future<Output = ()>,
    {
        let mut engine = self.engine.clone();
        let task = tokio::task::spawn_blocking(move || {
            let rules = engine.run()?;
            Ok::<_, AprioriError>((engine, rules))
        });

        tokio::select! {
            joined = task => {
                let (engine, rules) = joined
                    .map_err(|e| AprioriError::Worker(format!("analysis task failed: {}", e)))??;
                self.engine = engine;
                Ok(rules)
            }
            _ = shutdown => {
                tracing::info!("Shutdown signal received, abandoning analysis");
                Err(AprioriError::Worker("analysis cancelled".to_string()))
            }
        }
    }
}
