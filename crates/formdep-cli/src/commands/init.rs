//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# formdep configuration

# Rule preset: "recommended" (default), "strict", or "minimal"
preset = "recommended"

# Lowest severity that makes `formdep check` exit with status 1
fail_on = "error"

[checker]
# Root directory to search for *.form.toml / *.form.json (default: current directory)
# root = "./forms"

# Glob patterns to exclude from discovery
exclude = [
    "**/target/**",
    "**/node_modules/**",
]

# Respect .gitignore files
respect_gitignore = true

[runtime]
# What `formdep simulate` does with cyclic dependencies: "reject" or "warn"
cycle_policy = "reject"
# Upper bound on change events processed per user input
max_cascade_events = 1024

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.dependency-cycle]
enabled = true

[rules.unreachable-trigger]
enabled = true
# severity = "error"  # Override default severity

# [rules.dependency-fan-out]
# enabled = true
# max_dependents = 20
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("formdep.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created formdep.toml");
    println!("\nNext steps:");
    println!("  1. Edit formdep.toml to configure rules");
    println!("  2. Run: formdep check");

    Ok(())
}
