//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, ConfigError};
use crate::context::FileContext;
use crate::parser::{ParseError, ParserBox, SourceParser};
use crate::rule::{Rule, RuleBox};
use crate::types::{FileReport, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parser error.
        source: ParseError,
    },

    /// Error walking the source tree.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No parser was registered.
    #[error("No source parser configured")]
    MissingParser,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<ParserBox>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser used to build syntax trees.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
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

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was set, an exclude pattern is not a
    /// valid glob, or the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::MissingParser)?;
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let exclude_patterns = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            parser,
            rules: self.rules,
            exclude_patterns,
            config,
        })
    }
}

/// Runs rules over source files, one file at a time.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    parser: ParserBox,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads and checks a single file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn check_file(&self, path: &Path) -> Result<FileReport, AnalyzerError> {
        let content = std::fs::read_to_string(path)?;
        self.check_source(path, &content)
    }

    /// Checks already-loaded source text as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if the parser rejects the source.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<FileReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let program = self
            .parser
            .parse(content)
            .map_err(|source| AnalyzerError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut report = FileReport::new(ctx.relative_path.clone());

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let violations = rule.check(&ctx, &program);
            report
                .violations
                .extend(self.apply_severity_override(rule.name(), violations));
        }

        Ok(report)
    }

    /// Applies severity overrides from configuration.
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

    /// Discovers the source files under the root the parser understands.
    ///
    /// Files come back sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory walk fails.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect_gitignore = self.config.analyzer.respect_gitignore;
        let walker = ignore::WalkBuilder::new(&self.root)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .git_global(respect_gitignore)
            .build();

        let extensions = self.parser.extensions();
        let mut files = Vec::new();

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let handled = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.contains(&e));
            if !handled {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        info!(
            "Found {} {} files under {}",
            files.len(),
            self.parser.language_id(),
            self.root.display()
        );

        Ok(files)
    }

    /// Checks if a path matches one of the exclude patterns.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CompoundName, Definition, DefinitionKind, Node, Program, Span};
    use crate::types::Severity;

    /// Treats every non-empty line as a simple class definition.
    struct LineParser;

    impl SourceParser for LineParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &["rb"]
        }

        fn parse(&self, source: &str) -> Result<Program, ParseError> {
            if source.contains("@@") {
                return Err(ParseError::Syntax { line: 1, column: 1 });
            }
            let mut offset = 0;
            let mut nodes = Vec::new();
            for line in source.split_inclusive('\n') {
                let name = line.trim();
                if !name.is_empty() {
                    let span = Span::new(offset, offset + name.len());
                    nodes.push(Node::Definition(Definition {
                        kind: DefinitionKind::Class,
                        name: CompoundName::simple(name),
                        superclass: None,
                        body: Vec::new(),
                        span,
                        name_span: span,
                    }));
                }
                offset += line.len();
            }
            Ok(Program::new(nodes))
        }
    }

    struct FlagAll;

    impl Rule for FlagAll {
        fn name(&self) -> &'static str {
            "flag-all"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(&self, ctx: &FileContext, program: &Program) -> Vec<Violation> {
            program
                .definitions()
                .map(|d| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        ctx.location_for(d.name_span),
                        "flagged",
                    )
                })
                .collect()
        }
    }

    fn analyzer(root: &Path, config: Config) -> Analyzer {
        Analyzer::builder()
            .root(root)
            .parser(LineParser)
            .rule(FlagAll)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder_requires_parser() {
        assert!(matches!(
            Analyzer::builder().root(".").build(),
            Err(AnalyzerError::MissingParser)
        ));
    }

    #[test]
    fn test_builder_rejects_bad_glob() {
        let result = Analyzer::builder()
            .root(".")
            .parser(LineParser)
            .exclude("[")
            .build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_check_source_reports_in_order() {
        let analyzer = analyzer(Path::new("/repo"), Config::default());
        let report = analyzer
            .check_source(Path::new("/repo/lib/a.rb"), "Foo\nBar\n")
            .expect("check");

        assert_eq!(report.file, PathBuf::from("lib/a.rb"));
        let lines: Vec<usize> = report.violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, [1, 2]);
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let config =
            Config::parse("[rules.flag-all]\nenabled = false\n").expect("Failed to parse");
        let report = analyzer(Path::new("/repo"), config)
            .check_source(Path::new("/repo/a.rb"), "Foo\n")
            .expect("check");
        assert!(report.is_clean());
    }

    #[test]
    fn test_severity_override() {
        let config =
            Config::parse("[rules.flag-all]\nseverity = \"info\"\n").expect("Failed to parse");
        let report = analyzer(Path::new("/repo"), config)
            .check_source(Path::new("/repo/a.rb"), "Foo\n")
            .expect("check");
        assert_eq!(report.violations[0].severity, Severity::Info);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = analyzer(Path::new("/repo"), Config::default())
            .check_source(Path::new("/repo/bad.rb"), "@@")
            .expect_err("should fail");
        assert!(err.to_string().contains("bad.rb"));
    }

    #[test]
    fn test_discover_files_filters_and_excludes() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let root = tmp.path();
        std::fs::create_dir_all(root.join("app/models")).expect("mkdir");
        std::fs::create_dir_all(root.join("vendor/gems")).expect("mkdir");
        std::fs::write(root.join("app/models/user.rb"), "User\n").expect("write");
        std::fs::write(root.join("app/models/notes.txt"), "nope\n").expect("write");
        std::fs::write(root.join("vendor/gems/dep.rb"), "Dep\n").expect("write");

        let analyzer = analyzer(root, Config::default());
        let files = analyzer.discover_files().expect("discover");

        assert_eq!(files, vec![root.join("app/models/user.rb")]);
        let report = analyzer.check_file(&files[0]).expect("check");
        assert_eq!(report.violations.len(), 1);
    }
}
