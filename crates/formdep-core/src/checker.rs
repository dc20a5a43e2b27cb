//! Checker for orchestrating authoring rules over form files.

use crate::config::Config;
use crate::context::FormContext;
use crate::declarative::{self, LoadFormError};
use crate::rule::{FormRule, RuleBox};
use crate::types::{CheckReport, Location, Severity, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Code reported for form files that fail to load.
pub const LOAD_ERROR_CODE: &str = "FD000";

/// Name reported for form files that fail to load.
pub const LOAD_ERROR_NAME: &str = "load-error";

/// Errors that can occur while checking.
#[derive(Debug, Error)]
pub enum CheckerError {
    /// IO error resolving the root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk failed.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// The root does not exist.
    #[error("Root not found: {}", .0.display())]
    RootNotFound(PathBuf),
}

/// Builder for configuring a [`Checker`].
#[derive(Default)]
pub struct CheckerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl CheckerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory or single form file to check.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule.
    #[must_use]
    pub fn rule<R: FormRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the checker.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be resolved or an exclude
    /// pattern is not a valid glob.
    pub fn build(self) -> Result<Checker, CheckerError> {
        let config = self.config.unwrap_or_default();
        let root = self.root.unwrap_or_else(|| config.checker.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };
        if !root.exists() {
            return Err(CheckerError::RootNotFound(root));
        }

        let mut patterns = self.exclude_patterns;
        patterns.extend(config.checker.exclude.iter().cloned());
        let exclude = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Checker {
            root,
            rules: self.rules,
            exclude,
            config,
        })
    }
}

/// Runs authoring rules over every discovered form file.
///
/// Use [`Checker::builder()`] to construct an instance.
pub struct Checker {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude: Vec<glob::Pattern>,
    config: Config,
}

impl Checker {
    /// Creates a new builder for configuring a checker.
    #[must_use]
    pub fn builder() -> CheckerBuilder {
        CheckerBuilder::new()
    }

    /// Returns the root being checked.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Checks all discovered form files.
    ///
    /// A file that fails to load is reported as an [`LOAD_ERROR_CODE`]
    /// violation rather than aborting the run.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails.
    pub fn check(&self) -> Result<CheckReport, CheckerError> {
        info!("Starting check at {}", self.root.display());

        let files = self.discover_files()?;
        info!("Found {} form files", files.len());

        let mut report = CheckReport::new();
        for path in &files {
            report.violations.extend(self.check_file(path));
            report.files_checked += 1;
        }
        report.sort();

        info!(
            "Check complete: {} violations in {} forms",
            report.violations.len(),
            report.files_checked
        );
        Ok(report)
    }

    /// Checks a single form file.
    #[must_use]
    pub fn check_file(&self, path: &Path) -> Vec<Violation> {
        debug!("Checking: {}", path.display());

        let base = if self.root.is_file() {
            self.root.parent().unwrap_or(self.root.as_path())
        } else {
            self.root.as_path()
        };

        let form = match declarative::load_form_file(path) {
            Ok(form) => form,
            Err(e) => {
                warn!("Failed to load {}: {e}", path.display());
                return vec![load_violation(path, base, &e)];
            }
        };

        let ctx = FormContext::new(path, base, &form, &self.config);
        let mut violations = Vec::new();
        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            let found = rule.check(&ctx);
            violations.extend(self.apply_severity_override(rule.name(), found));
        }
        violations
    }

    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers `*.form.toml` and `*.form.json` files under the root.
    fn discover_files(&self) -> Result<Vec<PathBuf>, CheckerError> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.checker.respect_gitignore)
            .git_exclude(self.config.checker.respect_gitignore)
            .ignore(self.config.checker.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !declarative::is_form_file(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, relative or absolute.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
    }
}

fn load_violation(path: &Path, root: &Path, error: &LoadFormError) -> Violation {
    let relative = path.strip_prefix(root).unwrap_or(path);
    Violation::new(
        LOAD_ERROR_CODE,
        LOAD_ERROR_NAME,
        Severity::Error,
        Location::new(relative, ""),
        error.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct CountQuestions;

    impl FormRule for CountQuestions {
        fn name(&self) -> &'static str {
            "count-questions"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Info
        }
        fn check(&self, ctx: &FormContext) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location(""),
                format!("{} questions", ctx.form.questions().count()),
            )]
        }
    }

    const FORM: &str = r#"
id = "f"
title = "F"
[[sections]]
title = "S"
[[sections.questions]]
id = "a"
label = "A"
"#;

    #[test]
    fn discovers_only_form_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("one.form.toml"), FORM).unwrap();
        fs::write(dir.path().join("nested/two.form.toml"), FORM).unwrap();
        fs::write(dir.path().join("formdep.toml"), "").unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();

        let checker = Checker::builder()
            .root(dir.path())
            .rule(CountQuestions)
            .build()
            .unwrap();
        let report = checker.check().unwrap();
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].location.file, PathBuf::from("nested/two.form.toml"));
        assert_eq!(report.violations[0].message, "1 questions");
    }

    #[test]
    fn exclude_patterns_apply() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("one.form.toml"), FORM).unwrap();
        fs::write(dir.path().join("drafts/wip.form.toml"), FORM).unwrap();

        let checker = Checker::builder()
            .root(dir.path())
            .exclude("drafts/**")
            .build()
            .unwrap();
        assert_eq!(checker.check().unwrap().files_checked, 1);
    }

    #[test]
    fn load_errors_become_violations() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.form.toml"), "id = ").unwrap();

        let checker = Checker::builder().root(dir.path()).build().unwrap();
        let report = checker.check().unwrap();
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].code, LOAD_ERROR_CODE);
        assert!(report.has_errors());
    }

    #[test]
    fn config_disables_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("one.form.toml"), FORM).unwrap();

        let config = Config::parse("[rules.count-questions]\nseverity = \"error\"\n").unwrap();
        let checker = Checker::builder()
            .root(dir.path())
            .config(config)
            .rule(CountQuestions)
            .build()
            .unwrap();
        assert_eq!(checker.check().unwrap().violations[0].severity, Severity::Error);

        let config = Config::parse("[rules.count-questions]\nenabled = false\n").unwrap();
        let checker = Checker::builder()
            .root(dir.path())
            .config(config)
            .rule(CountQuestions)
            .build()
            .unwrap();
        assert!(checker.check().unwrap().violations.is_empty());
    }

    #[test]
    fn single_file_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("one.form.toml");
        fs::write(&file, FORM).unwrap();

        let checker = Checker::builder().root(&file).rule(CountQuestions).build().unwrap();
        let report = checker.check().unwrap();
        assert_eq!(report.files_checked, 1);
        assert_eq!(report.violations[0].location.file, PathBuf::from("one.form.toml"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = Checker::builder().root("/definitely/not/here").build();
        assert!(matches!(result, Err(CheckerError::RootNotFound(_))));
    }
}
