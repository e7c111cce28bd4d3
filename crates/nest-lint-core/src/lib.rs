//! # nest-lint-core
//!
//! Core framework for nest-lint, a style linter for class and module nesting.
//!
//! This crate provides the foundational types shared by parsers, rules and
//! the CLI:
//!
//! - [`Program`] and friends, the language-neutral syntax model
//! - [`SourceParser`] trait for plugging in a concrete parser
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for running rules over files
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use nest_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app")
//!     .parser(RubyParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! for file in analyzer.discover_files()? {
//!     let report = analyzer.check_file(&file)?;
//!     for violation in &report.violations {
//!         println!("{violation}");
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
pub mod syntax;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use parser::{ParseError, ParserBox, SourceParser};
pub use rule::{Rule, RuleBox};
pub use syntax::{CompoundName, Definition, DefinitionKind, Node, OtherNode, Program, Span};
pub use types::{FileReport, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
