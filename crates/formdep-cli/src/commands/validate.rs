//! Validate command implementation.

use anyhow::{Context, Result};
use formdep_core::declarative::load_form_file;
use formdep_core::{SubmittedData, ValidationReport};
use std::io::Write;
use std::path::Path;

use super::Outcome;
use crate::OutputFormat;

/// Runs the validate command.
pub fn run(form_path: &Path, data_path: &Path, format: OutputFormat) -> Result<Outcome> {
    let report = validate(form_path, data_path)?;
    write(&mut std::io::stdout().lock(), &report, format)?;
    Ok(Outcome::failed_if(!report.is_valid()))
}

fn validate(form_path: &Path, data_path: &Path) -> Result<ValidationReport> {
    let form = load_form_file(form_path)
        .with_context(|| format!("Failed to load form: {}", form_path.display()))?;
    let content = std::fs::read_to_string(data_path)
        .with_context(|| format!("Failed to read data: {}", data_path.display()))?;
    let data = SubmittedData::from_json(&content)
        .with_context(|| format!("Invalid submission JSON: {}", data_path.display()))?;

    tracing::debug!(form = form.id(), fields = data.len(), "validating submission");

    Ok(ValidationReport::run(&form, &data))
}

fn write(out: &mut impl Write, report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(report)?)?,
        OutputFormat::Compact => {
            for result in &report.results {
                writeln!(out, "{result}")?;
            }
        }
        OutputFormat::Text => {
            for (field, messages) in report.errors_by_field() {
                writeln!(out, "\x1b[31m{field}\x1b[0m")?;
                for message in messages {
                    writeln!(out, "  - {message}")?;
                }
            }
            if report.is_valid() {
                writeln!(
                    out,
                    "\x1b[32mSubmission is valid ({} question(s) checked)\x1b[0m",
                    report.questions_checked
                )?;
            } else {
                writeln!(
                    out,
                    "\x1b[31mFound {} dependency error(s) in {} question(s)\x1b[0m",
                    report.results.len(),
                    report.questions_checked
                )?;
            }
        }
    }
    Ok(())
}
