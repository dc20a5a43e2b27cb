//! Locating and loading `formdep.toml`.
//!
//! The search starts next to the form (or form directory) a command works on
//! and walks up through its ancestors, so forms kept in nested folders share
//! the project's settings:
//!
//! 1. `--config` flag (explicit path, never searched for)
//! 2. `formdep.toml` or `.formdep.toml` in the start directory or an ancestor
//! 3. `config.toml` in `$FORMDEP_CONFIG_DIR` or `~/.formdep/`
//! 4. Built-in defaults

use anyhow::{Context, Result};
use formdep_core::{Config, CyclePolicy, RuntimeOptions};
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found beside the forms or in one of their ancestors.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Command-line settings that take precedence over `[runtime]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOverrides {
    /// Mount cyclic forms with a warning instead of refusing them.
    pub allow_cycles: bool,
    /// Replaces `max_cascade_events`.
    pub max_cascade_events: Option<usize>,
}

/// A loaded configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Where `config` was read from.
    pub source: ConfigSource,
    /// The parsed configuration, or the defaults.
    pub config: Config,
}

impl ResolvedConfig {
    /// Runtime options from `[runtime]` with command-line overrides applied.
    #[must_use]
    pub fn runtime_options(&self, overrides: RuntimeOverrides) -> RuntimeOptions {
        let mut options = self.config.runtime.clone();
        if overrides.allow_cycles {
            options.cycle_policy = CyclePolicy::Warn;
        }
        if let Some(max) = overrides.max_cascade_events {
            options.max_cascade_events = max;
        }
        options
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["formdep.toml", ".formdep.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Finds and loads the configuration for a command working on `anchor`.
///
/// `anchor` is a form file or a directory of forms.
///
/// # Errors
///
/// Returns an error if the working directory is unavailable or the file
/// found cannot be read or parsed.
pub fn resolve(anchor: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let start = search_start(anchor)?;
    load(find(&start, explicit, global_config_dir()))
}

fn search_start(anchor: &Path) -> Result<PathBuf> {
    let anchor = std::env::current_dir()
        .context("Failed to read the working directory")?
        .join(anchor);
    if anchor.is_dir() {
        return Ok(anchor);
    }
    Ok(anchor.parent().map_or(anchor.clone(), Path::to_path_buf))
}

fn find(start: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    for dir in start.ancestors() {
        for name in PROJECT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                tracing::debug!("Found project config: {}", candidate.display());
                return ConfigSource::Project(candidate);
            }
        }
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

fn load(source: ConfigSource) -> Result<ResolvedConfig> {
    let config = match source.path() {
        None => Config::default(),
        Some(path) => {
            if matches!(source, ConfigSource::Global(_)) {
                tracing::info!("Using global config: {}", path.display());
            }
            Config::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?
        }
    };
    Ok(ResolvedConfig { source, config })
}

/// `$FORMDEP_CONFIG_DIR`, else `~/.formdep/`.
fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("FORMDEP_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".formdep"))
}
