//! List rules command implementation.

use anyhow::{bail, Context, Result};
use nest_lint_core::{Config, Rule};
use nest_lint_rules::{all_rules, find_rule};
use std::fmt::Write as _;

use super::check::load_config;
use crate::project::Project;

/// Runs the list-rules command.
///
/// With a rule name or code, prints that rule as the resolved
/// configuration sets it up.
pub fn run(rule: Option<&str>, project: &Project) -> Result<()> {
    let Some(name) = rule else {
        print_table();
        return Ok(());
    };

    let config = load_config(&project.config)?;
    let Some(rule) = find_rule(name, &config).context("Invalid rule configuration")? else {
        bail!("Unknown rule '{name}' (see `nest-lint list-rules`)");
    };
    print!("{}", describe(rule.as_ref(), &config));
    Ok(())
}

fn print_table() {
    println!("Available rules:\n");
    println!("{:<10} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<28} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nShow one rule with its configured options, e.g.:");
    println!("  nest-lint list-rules NL001");
    println!("\nOverride the style from the command line, e.g.:");
    println!("  nest-lint check --style compact --enforced-on class");
}

/// Renders the detail view of `rule` under `config`.
fn describe(rule: &dyn Rule, config: &Config) -> String {
    let name = rule.name();
    let severity = config
        .rule_severity(name)
        .unwrap_or_else(|| rule.default_severity());

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", rule.code(), name);
    let _ = writeln!(out, "  {}", rule.description());
    let _ = writeln!(out, "  enabled: {}", config.is_rule_enabled(name));
    let _ = writeln!(out, "  severity: {severity}");
    for (key, value) in rule.options() {
        let _ = writeln!(out, "  {key}: {value}");
    }
    out
}
