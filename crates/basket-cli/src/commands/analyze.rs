//! Analyze command implementation.

use crate::analysis::{run_analysis, Analysis};
use crate::cli::AnalyzeArgs;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{rules_to_csv, Formatter};
use basket_domain::{ConfidenceLevel, LiftInterpretation, Rule};
use basket_miner::AprioriConfig;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    thresholds: &AprioriConfig,
    default_top: usize,
    formatter: &Formatter,
) -> Result<()> {
    let analysis = run_analysis(&args.dataset, thresholds).await?;
    let top = args.top.unwrap_or(default_top);

    println!("{}", render_report(&analysis, top, formatter)?);
    Ok(())
}

/// Build the analysis report.
fn render_report(analysis: &Analysis, top: usize, formatter: &Formatter) -> Result<String> {
    let engine = &analysis.engine;
    let stats = engine.statistics();
    let itemsets: Vec<_> = engine.levels().into_iter().flatten().collect();
    let rules = engine.rules();
    let top_rules = &rules[..top.min(rules.len())];

    match formatter.format() {
        OutputFormat::Json => {
            formatter.format_report_json(&stats, engine.metrics(), &itemsets, top_rules)
        }
        OutputFormat::Csv => rules_to_csv(top_rules),
        OutputFormat::Table => {
            let mut sections = vec![
                formatter.heading("Analysis Summary"),
                formatter.format_statistics(&stats)?,
                String::new(),
                formatter.heading("Search"),
                formatter.format_metrics(engine.metrics()),
                String::new(),
                formatter.heading("Frequent Itemsets"),
                formatter.format_itemsets(&itemsets)?,
                String::new(),
                formatter.heading(&format!("Top {} Association Rules", top_rules.len())),
            ];

            if top_rules.is_empty() {
                sections.push(formatter.warning("No rules met the confidence threshold."));
            } else {
                for (index, rule) in top_rules.iter().enumerate() {
                    sections.push(formatter.ranked_rule(index + 1, rule));
                }
            }

            sections.push(String::new());
            sections.push(formatter.heading("Recommendations"));
            sections.extend(recommendations(&rules));

            Ok(sections.join("\n"))
        }
    }
}

/// Merchandising suggestions drawn from the rule list.
fn recommendations(rules: &[Rule]) -> Vec<String> {
    if rules.is_empty() {
        return vec![
            "No significant associations found.".to_string(),
            "Try lowering the thresholds or adding more transactions.".to_string(),
        ];
    }

    let mut lines = Vec::new();

    let bundles: Vec<&Rule> = rules
        .iter()
        .filter(|r| r.confidence_level() == ConfidenceLevel::VeryStrong)
        .collect();
    if !bundles.is_empty() {
        lines.push("Bundle candidates (confidence of 80% or more):".to_string());
        for rule in bundles.iter().take(3) {
            lines.push(format!("  - {}", rule.describe()));
        }
    }

    let cross_sell: Vec<&Rule> = rules
        .iter()
        .filter(|r| r.lift_interpretation() == LiftInterpretation::Positive)
        .collect();
    if !cross_sell.is_empty() {
        lines.push("Cross-selling pairs (lift above 1):".to_string());
        for rule in cross_sell.iter().take(3) {
            lines.push(format!(
                "  - offer {} to buyers of {}",
                rule.consequent_names().join(", "),
                rule.antecedent_names().join(", ")
            ));
        }
    }

    lines.push("Place products that are often bought together near each other.".to_string());
    lines
}
