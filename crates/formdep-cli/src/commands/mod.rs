//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;
pub mod simulate;
pub mod validate;

use std::process::ExitCode;

/// Result of a command that completed but may still fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing at or above the failure threshold.
    Passed,
    /// Findings that should make the process exit with status 1.
    Failed,
}

impl Outcome {
    /// `Failed` when `failed` holds.
    #[must_use]
    pub fn failed_if(failed: bool) -> Self {
        if failed {
            Self::Failed
        } else {
            Self::Passed
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}
