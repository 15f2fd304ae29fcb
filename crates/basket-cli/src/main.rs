//! Basket CLI - Market basket analysis from the command line.

use basket_cli::commands;
use basket_cli::config::OutputFormat;
use basket_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let formatter = Formatter::new(OutputFormat::Table, std::io::stderr().is_terminal());
        eprintln!("{}", formatter.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

async fn run() -> basket_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load or create config
    let mut config = Config::resolve(cli.config.as_deref())?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let (min_support, min_confidence) = (cli.min_support, cli.min_confidence);

    // Handle commands
    match cli.command {
        Command::Analyze(args) => {
            let thresholds = config.thresholds(min_support, min_confidence)?;
            commands::execute_analyze(args, &thresholds, config.settings.top_rules, &formatter)
                .await?;
        }
        Command::Itemsets(args) => {
            let thresholds = config.thresholds(min_support, min_confidence)?;
            commands::execute_itemsets(args, &thresholds, &formatter).await?;
        }
        Command::Rules(args) => {
            let thresholds = config.thresholds(min_support, min_confidence)?;
            commands::execute_rules(args, &thresholds, &formatter).await?;
        }
        Command::Export(args) => {
            let thresholds = config.thresholds(min_support, min_confidence)?;
            commands::execute_export(args, &thresholds, &formatter).await?;
        }
        Command::Sample(args) => {
            commands::execute_sample(args, &formatter).await?;
        }
        Command::Sales(args) => {
            commands::execute_sales(args, &formatter).await?;
        }
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
    }

    Ok(())
}

/// Log to stderr, honoring `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
