//! Report export: lossless JSON and a flattened CSV with one row per
//! (institutional statement, reference statement) pair.

use std::fmt;
use std::str::FromStr;

use crate::error::{CrosswalkError, Result};
use crate::report::ComparisonReport;

const CSV_HEADER: &str = "institutional_statement,theme,heading,reference_statement,similarity_score,alignment_score,alignment_type,shared_terms,cognitive_alignment\n";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = CrosswalkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(CrosswalkError::invalid_argument(format!(
                "Unsupported export format '{s}'. Use 'json' or 'csv'"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Csv => f.write_str("csv"),
        }
    }
}

/// Render a report in the named format, joining shared terms with `", "`.
pub fn export_report(report: &ComparisonReport, format: &str) -> Result<String> {
    export_with(report, format.parse()?, ", ")
}

/// Render a report in `format`, joining CSV shared terms with `term_delimiter`.
pub fn export_with(
    report: &ComparisonReport,
    format: ExportFormat,
    term_delimiter: &str,
) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(report),
        ExportFormat::Csv => Ok(to_csv(report, term_delimiter)),
    }
}

/// Pretty-printed JSON of the whole report.
pub fn to_json(report: &ComparisonReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parse a report previously written by [`to_json`].
pub fn from_json(content: &str) -> Result<ComparisonReport> {
    Ok(serde_json::from_str(content)?)
}

/// Flattened CSV, rows in statement order then match order (best first).
pub fn to_csv(report: &ComparisonReport, term_delimiter: &str) -> String {
    let mut csv = String::from(CSV_HEADER);
    for result in &report.results {
        for m in &result.matches {
            let terms: Vec<&str> = m.shared_terms.iter().map(String::as_str).collect();
            csv.push_str(&format!(
                "{},{},{},{},{:.3},{:.1},{},{},{}\n",
                csv_escape(&result.institutional_statement),
                m.reference.theme,
                csv_escape(&m.reference.heading),
                csv_escape(&m.reference.text),
                m.raw_similarity,
                m.alignment_score,
                m.alignment_type,
                csv_escape(&terms.join(term_delimiter)),
                m.cognitive_alignment,
            ));
        }
    }
    csv
}

/// Minimal CSV field escaping: wrap the value in double-quotes if it contains
/// a comma, line break, or double-quote, doubling any embedded double-quotes.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
