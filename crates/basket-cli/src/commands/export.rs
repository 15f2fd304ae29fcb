//! Export command implementation.

use crate::analysis::run_analysis;
use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::{write_rules_csv, Formatter};
use basket_domain::Rule;
use basket_miner::AprioriConfig;
use std::fs::{self, File};
use std::path::Path;

/// Execute the export command.
pub async fn execute_export(
    args: ExportArgs,
    thresholds: &AprioriConfig,
    formatter: &Formatter,
) -> Result<()> {
    let analysis = run_analysis(&args.dataset, thresholds).await?;
    let rules = analysis.engine.rules();

    if rules.is_empty() {
        println!("{}", formatter.warning("No rules to export"));
        return Ok(());
    }

    write_rules(&args.output, &rules)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Exported {} rule(s) to {}",
            rules.len(),
            args.output.display()
        ))
    );
    Ok(())
}

/// Write `rules` to `path` in the export layout.
fn write_rules(path: &Path, rules: &[Rule]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_rules_csv(File::create(path)?, rules)?;
    tracing::info!("Wrote {} rules to {}", rules.len(), path.display());
    Ok(())
}
