//! # formdep-core
//!
//! Conditional dependency engine for dynamic forms.
//!
//! A form declares dependencies between its questions: *when question A has
//! value X, require / show / hide / enable / disable / clear / set question
//! B*. This crate provides:
//!
//! - the form and dependency model ([`model`]) and a TOML/JSON loader
//!   ([`declarative`]),
//! - the [`condition`] evaluator shared by both sides,
//! - the live [`runtime`] that keeps a rendered [`Document`] consistent as
//!   fields change, cascading through dependent fields,
//! - the server-side [`validator`] that re-checks a submission against the
//!   same rules,
//! - an authoring [`Checker`] running [`FormRule`]s over form files.
//!
//! ## Example
//!
//! ```ignore
//! use formdep_core::{declarative, validator, Document, FormRuntime, SubmittedData};
//!
//! let form = declarative::load_form_from_toml(&std::fs::read_to_string("address.form.toml")?)?;
//!
//! // Browser side
//! let mut runtime = FormRuntime::mount(Document::from_form(&form)?)?;
//! runtime.set_value("country", "CA")?;
//! assert!(runtime.document().get("province").unwrap().is_required());
//!
//! // Server side
//! let data = SubmittedData::from_json(r#"{"country": "CA"}"#)?;
//! let errors = validator::validate(&form, &data);
//! assert_eq!(errors[0].fields, ["province"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod context;
mod rule;
mod types;

pub mod condition;
pub mod declarative;
pub mod graph;
pub mod model;
pub mod payload;
pub mod runtime;
pub mod submission;
pub mod validator;

pub use checker::{Checker, CheckerBuilder, CheckerError, LOAD_ERROR_CODE, LOAD_ERROR_NAME};
pub use config::{CheckerConfig, Config, ConfigError, RuleConfig};
pub use context::FormContext;
pub use graph::DependencyGraph;
pub use model::{
    DependencyAction, FormDefinition, FormQuestion, FormSection, ModelError, QuestionDependency,
    QuestionId, QuestionOption, QuestionType,
};
pub use rule::{FormRule, RuleBox};
pub use runtime::{
    CyclePolicy, Document, Element, FieldKind, FormRuntime, RuntimeError, RuntimeOptions,
};
pub use submission::SubmittedData;
pub use types::{CheckReport, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use validator::{ValidationErrorKind, ValidationReport, ValidationResult};
