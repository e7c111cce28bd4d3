//! Rule traits for defining lint rules.

use crate::context::FileContext;
use crate::syntax::Program;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the [`Program`] syntax model.
///
/// Rules are constructed once (usually from configuration) and then run
/// against every file. They must not keep state between files.
///
/// # Example
///
/// ```ignore
/// use nest_lint_core::{FileContext, Program, Rule, Severity, Violation};
///
/// pub struct NoEmptyModules;
///
/// impl Rule for NoEmptyModules {
///     fn name(&self) -> &'static str { "no-empty-modules" }
///     fn code(&self) -> &'static str { "NL100" }
///
///     fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation> {
///         program
///             .definitions()
///             .filter(|d| d.body.is_empty())
///             .map(|d| Violation::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location_for(d.name_span),
///                 "Empty module",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "class-and-module-children").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "NL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Returns the effective option values as `(key, value)` pairs.
    fn options(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Checks a single file and returns any violations found, in source order.
    fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
