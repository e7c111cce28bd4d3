//! # nest-lint-rules
//!
//! Built-in lint rules for nest-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | NL001 | `class-and-module-children` | Enforces nested or compact class/module definitions |
//!
//! ## Usage
//!
//! ```ignore
//! use nest_lint_core::{Analyzer, Config};
//! use nest_lint_rules::configured_rules;
//!
//! let config = Config::from_file("nest-lint.toml".as_ref())?;
//! let mut builder = Analyzer::builder().root("./app").parser(RubyParser::new());
//! for rule in configured_rules(&config)? {
//!     builder = builder.rule_box(rule);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod class_and_module_children;
mod registry;

pub use class_and_module_children::{
    ChildrenStyleConfig, ClassAndModuleChildren, EnforcedOn, EnforcedStyle, EvaluationMode,
    Offense, OffenseReporter,
};
pub use registry::{all_rules, configured_rules, find_rule};

/// Re-export core types for convenience.
pub use nest_lint_core::{Rule, Severity, Violation};
