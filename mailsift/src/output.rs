use crate::config::OutputFormat;
use anyhow::{Context, Result};
use extractors::{aggregate, EmailSet, ExtractionReport};

/// Every address across all reports, in input order.
pub fn combined_emails(reports: &[ExtractionReport]) -> EmailSet {
    aggregate(reports.iter().map(|report| report.emails.clone()))
}

pub fn render(reports: &[ExtractionReport], format: OutputFormat, separator: &str) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(combined_emails(reports).join(separator)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(reports).context("Failed to serialize reports")
        }
    }
}

/// One line per failed entry, for stderr.
pub fn failure_lines(reports: &[ExtractionReport]) -> Vec<String> {
    reports
        .iter()
        .flat_map(|report| report.failures.iter())
        .map(|failure| format!("{}: {}", failure.path, failure.error))
        .collect()
}
