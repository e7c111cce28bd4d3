//! Check command implementation.

use anyhow::{Context, Result};
use nest_lint_core::{Analyzer, AnalyzerError, Config};
use nest_lint_rules::{class_and_module_children, configured_rules};
use nest_lint_ruby::RubyParser;
use std::path::{Path, PathBuf};

use crate::project::{ConfigSource, Project};
use crate::OutputFormat;

/// Arguments of the check command.
pub struct CheckArgs {
    /// File or directory to analyze.
    pub path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// `--style` override.
    pub style: Option<String>,
    /// `--enforced-on` override.
    pub enforced_on: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the check command.
pub fn run(args: CheckArgs, project: &Project) -> Result<()> {
    let mut config = load_config(&project.config)?;
    apply_overrides(&mut config, args.style, args.enforced_on);

    let rules = configured_rules(&config).context("Invalid rule configuration")?;
    let fail_on = config.fail_on();

    let (root, single_file) = analysis_root(&args.path, project);

    let mut builder = Analyzer::builder()
        .root(root)
        .parser(RubyParser::new())
        .config(config);
    for pattern in args.exclude {
        builder = builder.exclude(pattern);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;
    let files = match single_file {
        Some(file) => vec![file],
        None => analyzer.discover_files().context("Failed to discover files")?,
    };

    tracing::info!(
        "Analyzing {} file(s) under {} with {} rule(s)",
        files.len(),
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let mut printer = super::output::Printer::new(args.format);
    let mut failed = false;

    for file in &files {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;

        match analyzer.check_source(file, &content) {
            Ok(report) => {
                failed |= report.has_violations_at(fail_on);
                printer.print(&report, &content)?;
            }
            Err(AnalyzerError::Parse { path, source }) => {
                tracing::warn!("Skipping {}: {}", path.display(), source);
            }
            Err(e) => return Err(e).context("Analysis failed"),
        }
    }

    printer.finish();

    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Picks the analyzer root and, for a single file, the file to check.
///
/// A single file is reported relative to its project root; a directory is
/// walked and reported relative to itself. Both sides are canonical so the
/// prefix strips cleanly through symlinks.
fn analysis_root(path: &Path, project: &Project) -> (PathBuf, Option<PathBuf>) {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if canonical.is_file() {
        (project.root.clone(), Some(canonical))
    } else {
        (canonical, None)
    }
}

pub(crate) fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Writes command-line style options over the configured ones.
fn apply_overrides(config: &mut Config, style: Option<String>, enforced_on: Option<String>) {
    if style.is_none() && enforced_on.is_none() {
        return;
    }

    let mut rule = config
        .rules
        .remove(class_and_module_children::NAME)
        .unwrap_or_default();
    if let Some(style) = style {
        rule = rule.with_option("enforced_style", style);
    }
    if let Some(on) = enforced_on {
        rule = rule.with_option("enforced_on", on);
    }
    config
        .rules
        .insert(class_and_module_children::NAME.to_string(), rule);
}
