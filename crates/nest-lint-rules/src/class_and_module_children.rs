//! Rule enforcing one spelling for nested classes and modules.
//!
//! # Styles
//!
//! - `nested` (default): every definition is written inside its parent.
//!   `class Foo::Bar` is flagged.
//! - `compact`: a definition whose body is a single simple-named definition
//!   is flagged, since it could be spelled `class Foo::Bar`.
//!
//! ```ruby
//! # nested
//! class Foo
//!   class Bar
//!   end
//! end
//!
//! # compact
//! class Foo::Bar
//! end
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [rules.class-and-module-children]
//! enforced_style = "compact"   # or "nested"
//! enforced_on = "class"        # or "module", "both"; compact style only
//! ```
//!
//! The RuboCop spellings `EnforcedStyle` and `EnforcedOn` are accepted too.

use std::fmt;

use nest_lint_core::{
    Config, ConfigError, Definition, DefinitionKind, FileContext, Node, Program, Rule,
    RuleConfig, Severity, Span, Suggestion, Violation,
};
use tracing::debug;

/// Rule code for class-and-module-children.
pub const CODE: &str = "NL001";

/// Rule name for class-and-module-children.
pub const NAME: &str = "class-and-module-children";

/// Message for a compact name under the nested style.
pub const NESTED_MESSAGE: &str = "Use nested module/class definitions instead of compact style.";

/// Message for a nestable definition under the compact style.
pub const COMPACT_MESSAGE: &str = "Use compact module/class definition instead of nested style.";

const STYLE_KEYS: &[&str] = &["enforced_style", "EnforcedStyle"];
const ON_KEYS: &[&str] = &["enforced_on", "EnforcedOn"];

/// Which spelling the rule enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforcedStyle {
    /// `class Foo; class Bar; end; end`
    #[default]
    Nested,
    /// `class Foo::Bar; end`
    Compact,
}

impl EnforcedStyle {
    /// Parses a configuration value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "nested" => Some(Self::Nested),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

impl fmt::Display for EnforcedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nested => write!(f, "nested"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

/// Which outer definitions the compact style checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnforcedOn {
    /// Classes only.
    Class,
    /// Modules only.
    Module,
    /// Classes and modules.
    #[default]
    Both,
}

impl EnforcedOn {
    /// Parses a configuration value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "class" => Some(Self::Class),
            "module" => Some(Self::Module),
            "both" => Some(Self::Both),
            _ => None,
        }
    }

    /// Returns true if definitions of `kind` are checked.
    #[must_use]
    pub fn covers(self, kind: DefinitionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Class, DefinitionKind::Class)
                | (Self::Module, DefinitionKind::Module)
        )
    }
}

impl fmt::Display for EnforcedOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Module => write!(f, "module"),
            Self::Both => write!(f, "both"),
        }
    }
}

/// Options for [`ClassAndModuleChildren`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildrenStyleConfig {
    /// Spelling to enforce.
    pub enforced_style: EnforcedStyle,
    /// Outer kinds checked under the compact style.
    pub enforced_on: EnforcedOn,
}

impl ChildrenStyleConfig {
    /// Reads the options from a rule configuration block.
    ///
    /// Missing options take their defaults. `enforced_on` is validated even
    /// under the nested style, where it has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for unknown or non-string values.
    pub fn from_rule_config(rule: Option<&RuleConfig>) -> Result<Self, ConfigError> {
        let Some(rule) = rule else {
            return Ok(Self::default());
        };

        let enforced_style = match rule.string_option(NAME, STYLE_KEYS)? {
            None => EnforcedStyle::default(),
            Some(value) => EnforcedStyle::parse(value)
                .ok_or_else(|| invalid(STYLE_KEYS[0], value, "\"nested\" or \"compact\""))?,
        };

        let enforced_on = match rule.string_option(NAME, ON_KEYS)? {
            None => EnforcedOn::default(),
            Some(value) => EnforcedOn::parse(value).ok_or_else(|| {
                invalid(ON_KEYS[0], value, "\"class\", \"module\" or \"both\"")
            })?,
        };

        Ok(Self {
            enforced_style,
            enforced_on,
        })
    }

    /// Returns the evaluation mode these options select.
    #[must_use]
    pub fn mode(self) -> EvaluationMode {
        match self.enforced_style {
            EnforcedStyle::Nested => EvaluationMode::Nested,
            EnforcedStyle::Compact => EvaluationMode::Compact(self.enforced_on),
        }
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidOption {
        rule: NAME.to_string(),
        key: key.to_string(),
        value: format!("{value:?}"),
        expected,
    }
}

/// How each definition is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// Flag compact names.
    Nested,
    /// Flag simple-named definitions wrapping a single simple-named definition.
    Compact(EnforcedOn),
}

/// A single finding of this rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    /// One of [`NESTED_MESSAGE`] or [`COMPACT_MESSAGE`].
    pub message: &'static str,
    /// Name of the offending definition.
    pub span: Span,
    /// How to rewrite the definition.
    pub suggestion: String,
}

/// Judges one definition. At most one offense per definition.
#[must_use]
pub fn evaluate(mode: EvaluationMode, def: &Definition) -> Option<Offense> {
    match mode {
        EvaluationMode::Nested => nested_offense(def),
        EvaluationMode::Compact(enforced_on) => compact_offense(def, enforced_on),
    }
}

fn nested_offense(def: &Definition) -> Option<Offense> {
    if !def.name.is_compact() {
        return None;
    }
    Some(Offense {
        message: NESTED_MESSAGE,
        span: def.name_span,
        suggestion: format!("Split `{}` into nested definitions", def.name),
    })
}

fn compact_offense(def: &Definition, enforced_on: EnforcedOn) -> Option<Offense> {
    if !def.name.is_simple() || !enforced_on.covers(def.kind) {
        return None;
    }

    let inner = match def.sole_child()? {
        Node::Definition(inner) if inner.name.is_simple() => inner,
        Node::Definition(_) | Node::Other(_) => return None,
    };

    Some(Offense {
        message: COMPACT_MESSAGE,
        span: def.name_span,
        suggestion: format!("Define `{} {}` directly", inner.kind, def.name.join(&inner.name)),
    })
}

/// Collects offenses in the order they are recorded.
#[derive(Debug, Default)]
pub struct OffenseReporter {
    offenses: Vec<Offense>,
}

impl OffenseReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `offense` if there is one.
    pub fn record(&mut self, offense: Option<Offense>) {
        if let Some(offense) = offense {
            self.offenses.push(offense);
        }
    }

    /// Consumes the reporter and returns its offenses.
    #[must_use]
    pub fn finish(self) -> Vec<Offense> {
        self.offenses
    }
}

/// Enforces nested or compact class/module definitions.
#[derive(Debug, Clone)]
pub struct ClassAndModuleChildren {
    mode: EvaluationMode,
    /// Severity level.
    pub severity: Severity,
}

impl Default for ClassAndModuleChildren {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassAndModuleChildren {
    /// Creates the rule with the nested style.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ChildrenStyleConfig::default())
    }

    /// Creates the rule with explicit options.
    #[must_use]
    pub fn with_options(options: ChildrenStyleConfig) -> Self {
        Self {
            mode: options.mode(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from the `[rules.class-and-module-children]` block.
    ///
    /// # Errors
    ///
    /// Returns an error if the block holds an invalid option value.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let options = ChildrenStyleConfig::from_rule_config(config.rule(NAME))?;
        debug!(
            "{NAME}: enforced_style={}, enforced_on={}",
            options.enforced_style, options.enforced_on
        );
        Ok(Self::with_options(options))
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the active evaluation mode.
    #[must_use]
    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Evaluates every definition of `program` in document order.
    #[must_use]
    pub fn scan(&self, program: &Program) -> Vec<Offense> {
        let mut reporter = OffenseReporter::new();
        for def in program.definitions() {
            reporter.record(evaluate(self.mode, def));
        }
        reporter.finish()
    }
}

impl Rule for ClassAndModuleChildren {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces nested or compact style for class and module children"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn options(&self) -> Vec<(&'static str, String)> {
        match self.mode {
            EvaluationMode::Nested => vec![("enforced_style", EnforcedStyle::Nested.to_string())],
            EvaluationMode::Compact(on) => vec![
                ("enforced_style", EnforcedStyle::Compact.to_string()),
                ("enforced_on", on.to_string()),
            ],
        }
    }

    fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation> {
        let offenses = self.scan(program);
        debug!(
            "{NAME}: {} offense(s) in {}",
            offenses.len(),
            ctx.relative_path.display()
        );

        offenses
            .into_iter()
            .map(|offense| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location_for(offense.span),
                    offense.message,
                )
                .with_suggestion(Suggestion::new(offense.suggestion))
            })
            .collect()
    }
}
