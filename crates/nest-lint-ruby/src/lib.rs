//! # nest-lint-ruby
//!
//! Ruby front end for nest-lint.
//!
//! Parses Ruby source with Tree-sitter and lowers the concrete tree into the
//! language-neutral [`Program`](nest_lint_core::Program) model:
//!
//! - `class` / `module` with a constant path name become
//!   [`Definition`](nest_lint_core::Definition)s
//! - everything else becomes an [`OtherNode`](nest_lint_core::OtherNode)
//!   whose children are still lowered
//! - comments are dropped

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
mod parser;

pub use parser::RubyParser;
