//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::config::{Config, RuleConfig};
use crate::graph::DependencyGraph;
use crate::model::FormDefinition;
use crate::types::Location;

/// Context provided to authoring rules.
///
/// Contains the loaded form plus metadata about the file it came from.
#[derive(Debug, Clone)]
pub struct FormContext<'a> {
    /// Absolute path to the form file.
    pub path: &'a Path,
    /// Path relative to the checked root.
    pub relative_path: PathBuf,
    /// The loaded form.
    pub form: &'a FormDefinition,
    /// Active configuration.
    pub config: &'a Config,
    graph: DependencyGraph,
}

impl<'a> FormContext<'a> {
    /// Creates a new form context.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path, form: &'a FormDefinition, config: &'a Config) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);
        Self {
            path,
            relative_path,
            form,
            config,
            graph: DependencyGraph::from_form(form),
        }
    }

    /// Returns the dependency graph of the form.
    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Returns a location inside this form file.
    #[must_use]
    pub fn location(&self, pointer: impl Into<String>) -> Location {
        Location::new(self.relative_path.clone(), pointer)
    }

    /// Returns the configuration of one rule, if any.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&'a RuleConfig> {
        self.config.rules.get(rule_name)
    }
}
