//! formdep CLI tool.
//!
//! Usage:
//! ```bash
//! formdep check [OPTIONS] [PATH]
//! formdep validate --form FILE --data FILE
//! formdep simulate --form FILE [--set id=value]...
//! formdep list-rules
//! formdep init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use commands::Outcome;
use config_resolver::RuntimeOverrides;

mod commands;
mod config_resolver;

/// Author, validate, and simulate dynamic form dependencies
#[derive(Parser)]
#[command(name = "formdep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FORMDEP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run authoring checks on form files
    Check {
        /// Form file or directory to check (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Validate a submission against a form's dependencies
    Validate {
        /// Form definition file (.form.toml or .form.json)
        #[arg(long)]
        form: PathBuf,

        /// Submitted data as a JSON object
        #[arg(long)]
        data: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Mount a form, apply inputs, and print the resulting field states
    Simulate {
        /// Form definition file (.form.toml or .form.json)
        #[arg(long)]
        form: PathBuf,

        /// Input to apply, in order (`id=value`; `true`/`false` for checkboxes and options)
        #[arg(long = "set", value_name = "ID=VALUE")]
        inputs: Vec<String>,

        /// Mount forms with dependency cycles instead of refusing them
        #[arg(long)]
        allow_cycles: bool,

        /// Override the cascade event budget for cyclic forms
        #[arg(long, value_name = "N")]
        max_cascade_events: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let explicit = cli.config.as_deref();
    let outcome = match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
        } => {
            let resolved = config_resolver::resolve(&path, explicit)?;
            commands::check::run(&path, format, rules, exclude, resolved)?
        }
        Commands::Validate { form, data, format } => {
            commands::validate::run(&form, &data, format)?
        }
        Commands::Simulate {
            form,
            inputs,
            format,
            allow_cycles,
            max_cascade_events,
        } => {
            let resolved = config_resolver::resolve(&form, explicit)?;
            let overrides = RuntimeOverrides {
                allow_cycles,
                max_cascade_events,
            };
            commands::simulate::run(&form, &inputs, format, &resolved, overrides)?;
            Outcome::Passed
        }
        Commands::ListRules => {
            commands::list_rules::run()?;
            Outcome::Passed
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Outcome::Passed
        }
    };
    Ok(outcome.into())
}
