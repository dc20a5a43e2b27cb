//! Shared output formatting for check results.

use anyhow::Result;
use formdep_core::{CheckReport, ViolationDiagnostic};
use std::io::Write;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(report: &CheckReport, format: OutputFormat) -> Result<()> {
    write(&mut std::io::stdout().lock(), report, format)
}

/// Writes check results in the specified format.
pub fn write(out: &mut impl Write, report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, report)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(report)?)?,
        OutputFormat::Compact => {
            for violation in &report.violations {
                writeln!(out, "{}", violation.format())?;
            }
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, report: &CheckReport) -> Result<()> {
    let (errors, warnings, _) = report.count_by_severity();

    for violation in &report.violations {
        let diagnostic = miette::Report::new(ViolationDiagnostic::from(violation));
        writeln!(out, "{diagnostic:?}")?;
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    writeln!(out, "{}{}\x1b[0m", summary_color, report.summary())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdep_core::{Location, Severity, Suggestion, Violation};

    fn report() -> CheckReport {
        let mut report = CheckReport::new();
        report.files_checked = 1;
        report.violations.push(
            Violation::new(
                "FD001",
                "unknown-reference",
                Severity::Error,
                Location::new("signup.form.toml", ""),
                "source `plann` does not exist",
            )
            .with_suggestion(Suggestion::new("did you mean `plan`?")),
        );
        report
    }

    fn render(report: &CheckReport, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write(&mut out, report, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn compact_lists_each_violation() {
        assert_eq!(
            render(&report(), OutputFormat::Compact),
            "FD001 unknown-reference at signup.form.toml\n  \
             error: source `plann` does not exist\n  \
             = help: did you mean `plan`?\n\n"
        );
    }

    #[test]
    fn json_carries_violations_and_counts() {
        let json = render(&report(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["files_checked"], 1);
        assert_eq!(parsed["violations"][0]["code"], "FD001");
        assert_eq!(parsed["violations"][0]["suggestion"]["message"], "did you mean `plan`?");
    }

    #[test]
    fn text_ends_with_colored_summary() {
        let text = render(&report(), OutputFormat::Text);
        assert!(text.contains("source `plann` does not exist"));
        assert!(text.ends_with(
            "\x1b[31mFound 1 error(s), 0 warning(s), 0 info(s) in 1 form(s)\x1b[0m\n"
        ));

        let clean = render(&CheckReport::new(), OutputFormat::Text);
        assert!(clean.starts_with("\x1b[32mFound 0 error(s)"));
    }
}
