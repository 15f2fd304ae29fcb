//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::dataset::SalesSummary;
use crate::error::{CliError, Result};
use basket_domain::{Itemset, Rule};
use basket_miner::{AnalysisStatistics, MiningMetrics};
use colored::*;
use serde::Serialize;
use std::io;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Columns of the rule export file.
pub const RULES_CSV_COLUMNS: [&str; 6] = [
    "Antecedent",
    "Consequent",
    "Confidence",
    "Support",
    "Lift",
    "Interpretation",
];

const ITEMSETS_CSV_COLUMNS: [&str; 4] = ["Items", "Size", "Count", "Support"];

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format frequent itemsets.
    pub fn format_itemsets(&self, itemsets: &[Itemset]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_itemsets_json(itemsets),
            OutputFormat::Table => Ok(self.format_itemsets_table(itemsets)),
            OutputFormat::Csv => format_itemsets_csv(itemsets),
        }
    }

    /// Format association rules.
    pub fn format_rules(&self, rules: &[Rule]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_rules_json(rules),
            OutputFormat::Table => Ok(self.format_rules_table(rules)),
            OutputFormat::Csv => rules_to_csv(rules),
        }
    }

    /// Format analysis statistics.
    pub fn format_statistics(&self, stats: &AnalysisStatistics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
            OutputFormat::Table => Ok(key_value_table([
                ("Transactions", stats.transaction_count.to_string()),
                ("Minimum support", percent(stats.min_support)),
                ("Minimum confidence", percent(stats.min_confidence)),
                ("Frequent itemsets", stats.total_itemsets.to_string()),
                ("Itemset levels", stats.levels.to_string()),
                ("Association rules", stats.total_rules.to_string()),
            ])),
            OutputFormat::Csv => Ok(format!(
                "transactions,min_support,min_confidence,itemsets,levels,rules\n{},{},{},{},{},{}",
                stats.transaction_count,
                stats.min_support,
                stats.min_confidence,
                stats.total_itemsets,
                stats.levels,
                stats.total_rules
            )),
        }
    }

    /// Format sales figures.
    pub fn format_sales(&self, summary: &SalesSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
            OutputFormat::Table => Ok(key_value_table([
                ("Transactions", summary.transactions.to_string()),
                ("Revenue", format!("{:.2}", summary.revenue)),
                ("Items sold", summary.items_sold.to_string()),
                ("Average basket", format!("{:.2}", summary.average_basket)),
            ])),
            OutputFormat::Csv => Ok(format!(
                "transactions,revenue,items_sold,average_basket\n{},{:.2},{},{:.2}",
                summary.transactions, summary.revenue, summary.items_sold, summary.average_basket
            )),
        }
    }

    /// Format search metrics of a run as a table.
    pub fn format_metrics(&self, metrics: &MiningMetrics) -> String {
        key_value_table([
            ("Transaction scans", metrics.transaction_scans.to_string()),
            ("Candidates counted", metrics.total_counted().to_string()),
            ("Candidates pruned", metrics.total_pruned().to_string()),
            ("Duplicate candidates", metrics.total_duplicates().to_string()),
            (
                "Rules emitted",
                format!("{} of {}", metrics.rules_emitted, metrics.rules_considered),
            ),
            ("Runtime", format!("{}ms", metrics.runtime_ms)),
        ])
    }

    /// Format a full analysis report as one JSON document.
    pub fn format_report_json(
        &self,
        stats: &AnalysisStatistics,
        metrics: &MiningMetrics,
        itemsets: &[Itemset],
        rules: &[Rule],
    ) -> Result<String> {
        let report = serde_json::json!({
            "statistics": stats,
            "metrics": metrics,
            "itemsets": itemsets.iter().map(itemset_json).collect::<Vec<_>>(),
            "rules": rules.iter().map(rule_json).collect::<Vec<_>>(),
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Format itemsets as JSON.
    fn format_itemsets_json(&self, itemsets: &[Itemset]) -> Result<String> {
        let json: Vec<serde_json::Value> = itemsets.iter().map(itemset_json).collect();

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format itemsets as a table.
    fn format_itemsets_table(&self, itemsets: &[Itemset]) -> String {
        if itemsets.is_empty() {
            return self.colorize("No frequent itemsets found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Size", "Items", "Count", "Support"]);

        for itemset in itemsets {
            builder.push_record([
                itemset.size().to_string(),
                itemset.to_string(),
                itemset.support_count().to_string(),
                percent(itemset.support_ratio()),
            ]);
        }

        styled(builder)
    }

    /// Format rules as JSON.
    fn format_rules_json(&self, rules: &[Rule]) -> Result<String> {
        let json: Vec<serde_json::Value> = rules.iter().map(rule_json).collect();

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format rules as a table.
    fn format_rules_table(&self, rules: &[Rule]) -> String {
        if rules.is_empty() {
            return self.colorize("No association rules found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "#",
            "Antecedent (IF)",
            "Consequent (THEN)",
            "Confidence",
            "Support",
            "Lift",
            "Interpretation",
        ]);

        for (index, rule) in rules.iter().enumerate() {
            builder.push_record([
                (index + 1).to_string(),
                rule.antecedent_names().join(", "),
                rule.consequent_names().join(", "),
                percent(rule.confidence()),
                percent(rule.support()),
                format!("{:.2}", rule.lift()),
                rule.lift_interpretation().to_string(),
            ]);
        }

        styled(builder)
    }

    /// Format a section heading.
    pub fn heading(&self, title: &str) -> String {
        let underline = "=".repeat(title.chars().count());
        if self.color_enabled {
            format!("{}\n{}", title.bold().cyan(), underline.cyan())
        } else {
            format!("{}\n{}", title, underline)
        }
    }

    /// Format one rule of a ranked list with its reading.
    pub fn ranked_rule(&self, rank: usize, rule: &Rule) -> String {
        let interpretation = rule.lift_interpretation().to_string();
        let interpretation = match rule.lift_interpretation() {
            basket_domain::LiftInterpretation::Positive => self.colorize(&interpretation, "green"),
            basket_domain::LiftInterpretation::Negative => self.colorize(&interpretation, "red"),
            basket_domain::LiftInterpretation::Neutral => interpretation,
        };

        format!(
            "{}. {}\n   Confidence: {}, Support: {}, Lift: {:.2}\n   {} rule, {}",
            rank,
            rule.describe(),
            percent(rule.confidence()),
            percent(rule.support()),
            rule.lift(),
            capitalize(rule.confidence_level().as_str()),
            interpretation
        )
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn itemset_json(itemset: &Itemset) -> serde_json::Value {
    serde_json::json!({
        "items": itemset.item_names(),
        "size": itemset.size(),
        "support_count": itemset.support_count(),
        "support": itemset.support_ratio(),
    })
}

fn rule_json(rule: &Rule) -> serde_json::Value {
    serde_json::json!({
        "antecedent": rule.antecedent_names(),
        "consequent": rule.consequent_names(),
        "confidence": rule.confidence(),
        "support": rule.support(),
        "lift": rule.lift(),
        "interpretation": rule.lift_interpretation().as_str(),
        "strength": rule.confidence_level().as_str(),
    })
}

/// One line of the rule export file.
#[derive(Serialize)]
struct RuleRow {
    antecedent: String,
    consequent: String,
    confidence: String,
    support: String,
    lift: String,
    interpretation: &'static str,
}

impl From<&Rule> for RuleRow {
    fn from(rule: &Rule) -> Self {
        Self {
            antecedent: rule.antecedent_names().join(", "),
            consequent: rule.consequent_names().join(", "),
            confidence: format!("{:.4}", rule.confidence()),
            support: format!("{:.4}", rule.support()),
            lift: format!("{:.4}", rule.lift()),
            interpretation: rule.lift_interpretation().as_str(),
        }
    }
}

/// Write rules in the export layout, header first and one line per rule.
///
/// Metrics carry four decimals.
pub fn write_rules_csv<W: io::Write>(writer: W, rules: &[Rule]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(RULES_CSV_COLUMNS)?;
    for rule in rules {
        writer.serialize(RuleRow::from(rule))?;
    }
    writer.flush()?;
    Ok(())
}

/// Render rules in the export layout.
pub fn rules_to_csv(rules: &[Rule]) -> Result<String> {
    let mut buffer = Vec::new();
    write_rules_csv(&mut buffer, rules)?;
    utf8(buffer)
}

fn format_itemsets_csv(itemsets: &[Itemset]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(ITEMSETS_CSV_COLUMNS)?;
    for itemset in itemsets {
        writer.serialize((
            itemset.to_string(),
            itemset.size(),
            itemset.support_count(),
            format!("{:.4}", itemset.support_ratio()),
        ))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| CliError::Io(e.into_error()))?;
    utf8(buffer)
}

fn utf8(buffer: Vec<u8>) -> Result<String> {
    String::from_utf8(buffer).map_err(|e| CliError::InvalidInput(e.to_string()))
}

fn key_value_table<const N: usize>(rows: [(&str, String); N]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    for (key, value) in rows {
        builder.push_record([key.to_string(), value]);
    }
    styled(builder)
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
