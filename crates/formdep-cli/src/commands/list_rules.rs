//! List rules command implementation.

use anyhow::Result;
use formdep_rules::{all_rules, Preset};
use std::io::Write;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    write(&mut std::io::stdout().lock())
}

fn write(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Available rules:\n")?;
    writeln!(out, "{:<10} {:<22} {:<9} Description", "Code", "Name", "Severity")?;
    writeln!(out, "{}", "-".repeat(90))?;

    for rule in all_rules() {
        writeln!(
            out,
            "{:<10} {:<22} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        )?;
    }

    writeln!(out, "\nPresets:")?;
    for (preset, note) in [
        (Preset::Recommended, " (default)"),
        (Preset::Strict, ", stricter settings"),
        (Preset::Minimal, ", for gradual adoption"),
    ] {
        let codes: Vec<_> = preset.rules().iter().map(|r| r.code()).collect();
        writeln!(out, "  {:<12} - {}{note}", preset.name(), codes.join(", "))?;
    }

    writeln!(out, "\nUse --rules to filter specific rules, e.g.:")?;
    writeln!(out, "  formdep check --rules unknown-reference,dependency-cycle")?;
    writeln!(out, "  formdep check --rules FD001,FD002,FD005")?;
    Ok(())
}
