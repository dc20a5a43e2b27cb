//! Check command implementation.

use anyhow::{Context, Result};
use formdep_core::{Checker, Config, RuleBox};
use formdep_rules::{all_rules, Preset};
use std::path::Path;

use super::Outcome;
use crate::config_resolver::ResolvedConfig;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    resolved: ResolvedConfig,
) -> Result<Outcome> {
    let config = resolved.config;
    let fail_on = config.fail_on();

    let rules_to_add = match rules_filter {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&names)
        }
        None => preset_rules(&config),
    };

    let mut builder = Checker::builder().root(path).config(config);
    for pattern in exclude {
        builder = builder.exclude(pattern);
    }
    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let checker = builder.build().context("Failed to build checker")?;

    tracing::info!("Checking {:?} with {} rules", path, checker.rule_count());

    let report = checker.check().context("Check failed")?;

    super::output::print(&report, format)?;

    Ok(Outcome::failed_if(report.has_violations_at(fail_on)))
}

fn preset_rules(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        None => Preset::Recommended,
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown preset `{}`, using recommended", name);
            Preset::Recommended
        }),
    };
    preset.rules()
}

/// Selects rules by name or code, keeping the order given.
fn filter_rules(names: &[&str]) -> Vec<RuleBox> {
    let mut available = all_rules();
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in names {
        match available
            .iter()
            .position(|r| r.name() == *name || r.code().eq_ignore_ascii_case(name))
        {
            Some(i) => rules.push(available.swap_remove(i)),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }

    rules
}
