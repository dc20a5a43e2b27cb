//! # formdep-rules
//!
//! Built-in authoring rules for formdep form definitions.
//!
//! Each rule inspects one loaded form and reports problems that would make
//! its dependencies misbehave in the browser or on the server.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | FD001 | `unknown-reference` | Dependency source or target is not a question of the form |
//! | FD002 | `dependency-cycle` | Dependencies form a cycle |
//! | FD003 | `missing-set-value` | `set-value` without a value, or a value on another action |
//! | FD004 | `target-mismatch` | Declared target differs from the question carrying it |
//! | FD005 | `unreachable-trigger` | Trigger is not an option of the choice source |
//! | FD006 | `dependency-fan-out` | Too many dependencies driven by one question |
//! | FD007 | `conflicting-actions` | Opposite actions on the same field |
//!
//! ## Usage
//!
//! ```ignore
//! use formdep_core::Checker;
//! use formdep_rules::{DependencyCycle, UnknownReference};
//!
//! let checker = Checker::builder()
//!     .root("./forms")
//!     .rule(UnknownReference::new())
//!     .rule(DependencyCycle::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod conflicting_actions;
mod dependency_cycle;
mod dependency_fan_out;
mod missing_set_value;
mod presets;
mod target_mismatch;
mod unknown_reference;
mod unreachable_trigger;

pub use conflicting_actions::ConflictingActions;
pub use dependency_cycle::DependencyCycle;
pub use dependency_fan_out::DependencyFanOut;
pub use missing_set_value::MissingSetValue;
pub use presets::{all_rules, minimal_rules, recommended_rules, strict_rules, Preset};
pub use target_mismatch::TargetMismatch;
pub use unknown_reference::UnknownReference;
pub use unreachable_trigger::UnreachableTrigger;

/// Re-export core types for convenience.
pub use formdep_core::{FormRule, Severity, Violation};
