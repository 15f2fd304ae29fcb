//! Basket CLI library.
//!
//! This library provides the core functionality for the `basket` command-line
//! interface, including dataset loading, threshold profiles, command execution
//! and output formatting.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;

pub use analysis::{run_analysis, Analysis};
pub use cli::{Cli, Command};
pub use config::Config;
pub use dataset::Dataset;
pub use error::{CliError, Result};
pub use output::Formatter;
