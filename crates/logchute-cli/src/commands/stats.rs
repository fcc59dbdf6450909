use crate::OutputFormat;
use anyhow::{Result, bail};
use logchute_core::analysis::{AggregationPipeline, Outcome, Statistic};
use logchute_core::log::{GrammarMode, LineParser, LogReader, ScanSummary};
use serde::Serialize;
use std::path::Path;

/// Statistics for one access log
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub file: String,
    pub strict: bool,
    pub lines: ScanSummary,
    pub statistics: Vec<StatisticEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticEntry {
    pub key: &'static str,
    pub label: &'static str,
    /// `None` when the statistic has no data or failed
    pub value: Option<Statistic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub failed: bool,
}

impl From<Outcome> for StatisticEntry {
    fn from(outcome: Outcome) -> Self {
        let failed = outcome.is_failure();
        let (value, error) = match outcome.result {
            Ok(stat) => (Some(stat), None),
            Err(e) if e.is_empty_stream() => (None, None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            key: outcome.key,
            label: outcome.label,
            value,
            error,
            failed,
        }
    }
}

impl StatisticEntry {
    fn display_value(&self) -> String {
        match (&self.value, &self.error) {
            (Some(stat), _) => stat.to_string(),
            (None, Some(e)) => format!("error: {}", e),
            (None, None) => "no data".to_string(),
        }
    }
}

impl AnalysisReport {
    pub fn failures(&self) -> usize {
        self.statistics.iter().filter(|s| s.failed).count()
    }
}

/// Scan a log file once and collect every statistic
pub fn analyze_log(file: &Path, mode: GrammarMode) -> Result<AnalysisReport> {
    tracing::debug!("Analyzing {} with {:?} grammar", file.display(), mode);

    let parser = LineParser::new(mode);
    let mut pipeline = AggregationPipeline::standard();
    let lines = LogReader::from_file(file, &parser, &mut pipeline)?;

    if lines.skipped > 0 {
        tracing::info!("{} lines did not match the log format", lines.skipped);
    }

    Ok(AnalysisReport {
        file: file.display().to_string(),
        strict: parser.mode() == GrammarMode::Strict,
        lines,
        statistics: pipeline.finalize().into_iter().map(Into::into).collect(),
    })
}

pub fn execute(file: &Path, strict: bool, format: OutputFormat) -> Result<()> {
    tracing::info!("Extracting statistics from log file: {}", file.display());

    let mode = if strict {
        GrammarMode::Strict
    } else {
        GrammarMode::Lenient
    };
    let report = analyze_log(file, mode)?;

    tracing::debug!("Rendering report as {}", format);
    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => output_table(&report),
        OutputFormat::Pretty => output_pretty(&report),
    }

    let failures = report.failures();
    if failures > 0 {
        bail!("{} statistic(s) could not be computed", failures);
    }

    Ok(())
}

fn output_pretty(report: &AnalysisReport) {
    use console::style;

    let title = format!("Log Statistics: {}", report.file);
    println!("\n{}", style(&title).bold().cyan());
    println!("{}", style("=".repeat(title.chars().count())).cyan());
    println!();

    for stat in &report.statistics {
        let label = format!("{}:", stat.label);
        let value = match (&stat.value, &stat.error) {
            (Some(_), _) => style(stat.display_value()),
            (None, Some(_)) => style(stat.display_value()).red(),
            (None, None) => style(stat.display_value()).dim(),
        };
        println!("  {:<24}{}", label, value);
    }

    println!(
        "\n  {:<24}{} of {}",
        "Skipped lines:", report.lines.skipped, report.lines.total_lines
    );
    println!(); // trailing newline
}

fn output_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

fn output_table(report: &AnalysisReport) {
    println!("Metric,Value");
    for stat in &report.statistics {
        println!(
            "{},{}",
            csv_field(stat.label),
            csv_field(&stat.display_value())
        );
    }
    println!("Skipped lines,{}", report.lines.skipped);
}

/// Quote a table cell when it holds a comma, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
