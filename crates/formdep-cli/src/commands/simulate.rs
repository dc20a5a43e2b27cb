//! Simulate command implementation.
//!
//! Renders the form into a document, mounts the runtime with the configured
//! options, replays each `--set` input in order, and prints every field's
//! final state.

use anyhow::{bail, Context, Result};
use formdep_core::declarative::load_form_file;
use formdep_core::{Document, FormRuntime};
use serde::Serialize;
use std::path::Path;

use crate::config_resolver::{ResolvedConfig, RuntimeOverrides};
use crate::OutputFormat;

/// Final state of one field.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct FieldState {
    id: String,
    value: String,
    visible: bool,
    required: bool,
    disabled: bool,
}

/// Runs the simulate command.
pub fn run(
    form_path: &Path,
    inputs: &[String],
    format: OutputFormat,
    resolved: &ResolvedConfig,
    overrides: RuntimeOverrides,
) -> Result<()> {
    let form = load_form_file(form_path)
        .with_context(|| format!("Failed to load form: {}", form_path.display()))?;
    let document = Document::from_form(&form).context("Failed to render form")?;

    let mut runtime = FormRuntime::mount_with(document, resolved.runtime_options(overrides))
        .with_context(|| format!("Failed to mount form `{}`", form.id()))?;

    for input in inputs {
        apply_input(&mut runtime, input)?;
    }
    if runtime.dropped_events() > 0 {
        tracing::warn!(
            dropped = runtime.dropped_events(),
            "cascade budget exhausted; some changes were not propagated"
        );
    }

    let states = field_states(runtime.document());
    print(&states, format)
}

fn parse_input(input: &str) -> Result<(&str, &str)> {
    match input.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() => Ok((id.trim(), value)),
        _ => bail!("Invalid input `{input}`, expected ID=VALUE"),
    }
}

fn parse_checked(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" | "" => Ok(false),
        other => bail!("Expected true or false for a checkable field, got `{other}`"),
    }
}

fn apply_input(runtime: &mut FormRuntime, input: &str) -> Result<()> {
    let (id, value) = parse_input(input)?;
    let checkable = runtime
        .document()
        .get(id)
        .with_context(|| format!("No field `{id}` in the form"))?
        .kind()
        .is_checkable();

    tracing::debug!(field = id, value, "applying input");
    if checkable {
        runtime.set_checked(id, parse_checked(value)?)?;
    } else {
        runtime.set_value(id, value)?;
    }
    Ok(())
}

fn field_states(document: &Document) -> Vec<FieldState> {
    document
        .elements()
        .filter(|e| e.parent().is_none())
        .map(|e| FieldState {
            id: e.id().to_string(),
            value: document.field_value(e.id()).unwrap_or_default(),
            visible: document.is_visible(e.id()),
            required: e.is_required(),
            disabled: e.is_disabled(),
        })
        .collect()
}

fn print(states: &[FieldState], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(states)?),
        OutputFormat::Compact => {
            for s in states {
                println!(
                    "{}={} visible={} required={} disabled={}",
                    s.id, s.value, s.visible, s.required, s.disabled
                );
            }
        }
        OutputFormat::Text => {
            println!(
                "{:<24} {:<24} {:<8} {:<9} Disabled",
                "Field", "Value", "Visible", "Required"
            );
            println!("{}", "-".repeat(80));
            for s in states {
                println!(
                    "{:<24} {:<24} {:<8} {:<9} {}",
                    s.id,
                    s.value,
                    yes_no(s.visible),
                    yes_no(s.required),
                    yes_no(s.disabled)
                );
            }
        }
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_resolver::ConfigSource;
    use formdep_core::declarative::load_form_from_toml;
    use formdep_core::Config;

    const FORM: &str = r#"
id = "shipping"
title = "Shipping"

[[sections]]
title = "Address"

[[sections.questions]]
id = "country"
label = "Country"
type = "dropdown"
options = [{ id = "ca", value = "CA" }, { id = "us", value = "US" }]

[[sections.questions]]
id = "province"
label = "Province"
dependencies = [
  { source = "country", when = "CA", action = "show" },
  { source = "country", when = "CA", action = "require" },
]

[[sections.questions]]
id = "gift"
label = "Gift"
type = "multi-choice"
options = [{ id = "wrap", value = "wrap" }]

[[sections.questions]]
id = "message"
label = "Message"
dependencies = [{ source = "gift", when = "wrap", action = "enable" }]
"#;

    fn mount() -> FormRuntime {
        let form = load_form_from_toml(FORM).unwrap();
        FormRuntime::mount(Document::from_form(&form).unwrap()).unwrap()
    }

    fn state<'a>(states: &'a [FieldState], id: &str) -> &'a FieldState {
        states.iter().find(|s| s.id == id).unwrap()
    }

    #[test]
    fn parse_inputs() {
        assert_eq!(parse_input("country=CA").unwrap(), ("country", "CA"));
        assert_eq!(parse_input("note=a=b").unwrap(), ("note", "a=b"));
        assert_eq!(parse_input("note=").unwrap(), ("note", ""));
        assert!(parse_input("country").is_err());
        assert!(parse_input("=CA").is_err());
        assert!(parse_checked("On").unwrap());
        assert!(parse_checked("maybe").is_err());
    }

    #[test]
    fn inputs_cascade_into_field_states() {
        let mut runtime = mount();
        let before = field_states(runtime.document());
        assert!(!state(&before, "province").visible);
        assert!(state(&before, "message").disabled);
        assert_eq!(before.len(), 4);

        apply_input(&mut runtime, "country=CA").unwrap();
        apply_input(&mut runtime, "gift-wrap=true").unwrap();

        let after = field_states(runtime.document());
        let province = state(&after, "province");
        assert!(province.visible);
        assert!(province.required);
        assert_eq!(state(&after, "country").value, "CA");
        assert_eq!(state(&after, "gift").value, "wrap");
        assert!(!state(&after, "message").disabled);
    }

    #[test]
    fn cyclic_form_needs_allow_cycles() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("loop.form.toml");
        std::fs::write(
            &path,
            r#"
id = "loop"
title = "Loop"

[[sections]]
title = "S"

[[sections.questions]]
id = "a"
label = "A"
dependencies = [{ source = "b", when = "x", action = "clear-value" }]

[[sections.questions]]
id = "b"
label = "B"
dependencies = [{ source = "a", when = "x", action = "clear-value" }]
"#,
        )
        .unwrap();
        let resolved = ResolvedConfig {
            source: ConfigSource::Default,
            config: Config::default(),
        };
        let inputs = ["a=x".to_string()];

        let err = run(
            &path,
            &inputs,
            OutputFormat::Compact,
            &resolved,
            RuntimeOverrides::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to mount form `loop`");

        let allowed = RuntimeOverrides {
            allow_cycles: true,
            max_cascade_events: Some(8),
        };
        run(&path, &inputs, OutputFormat::Compact, &resolved, allowed).unwrap();
    }

    #[test]
    fn unknown_field_is_reported() {
        let mut runtime = mount();
        let err = apply_input(&mut runtime, "ghost=1").unwrap_err();
        assert_eq!(err.to_string(), "No field `ghost` in the form");
    }
}
