//! Sample command implementation.

use crate::cli::SampleArgs;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the sample command.
pub async fn execute_sample(args: SampleArgs, formatter: &Formatter) -> Result<()> {
    let dataset = Dataset::sample();

    match args.output {
        Some(path) => {
            dataset.save(&path)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "Wrote {} products and {} transactions to {}",
                    dataset.products.len(),
                    dataset.transactions.len(),
                    path.display()
                ))
            );
        }
        None => println!("{}", dataset.to_json()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[tokio::test]
    async fn test_sample_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");
        let formatter = Formatter::new(OutputFormat::Table, false);

        execute_sample(
            SampleArgs {
                output: Some(path.clone()),
            },
            &formatter,
        )
        .await
        .unwrap();

        assert_eq!(Dataset::load(&path).unwrap(), Dataset::sample());
    }
}
