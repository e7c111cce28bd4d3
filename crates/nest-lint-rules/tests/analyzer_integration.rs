//! Integration test: Ruby source through parser, analyzer and rule.

use nest_lint_core::{Analyzer, Config, FileReport, Severity};
use nest_lint_rules::{class_and_module_children, configured_rules};
use nest_lint_ruby::RubyParser;
use std::path::Path;
use tempfile::TempDir;

const APP_FILE: &str = "\
module Billing
  class Invoice
  end
end

class Billing::Payment < ApplicationRecord::Base
  def settle
  end
end
";

fn analyzer(root: &Path, toml: &str) -> Analyzer {
    let config = Config::parse(toml).expect("config should parse");
    let mut builder = Analyzer::builder().root(root).parser(RubyParser::new());
    for rule in configured_rules(&config).expect("rules should build") {
        builder = builder.rule_box(rule);
    }
    builder.config(config).build().expect("analyzer should build")
}

fn check(root: &Path, toml: &str, source: &str) -> FileReport {
    analyzer(root, toml)
        .check_source(&root.join("app/billing.rb"), source)
        .expect("source should parse")
}

#[test]
fn nested_style_flags_compact_definition() {
    let root = Path::new("/project");
    let report = check(root, "", APP_FILE);

    assert_eq!(report.file, Path::new("app/billing.rb"));
    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.rule, class_and_module_children::NAME);
    assert_eq!(v.message, class_and_module_children::NESTED_MESSAGE);
    assert_eq!(v.highlight(APP_FILE), "Billing::Payment");
    assert_eq!((v.location.line, v.location.column), (6, 7));
}

#[test]
fn compact_style_flags_wrapper() {
    let root = Path::new("/project");
    let report = check(
        root,
        "[rules.class-and-module-children]\nenforced_style = \"compact\"\nseverity = \"warning\"\n",
        APP_FILE,
    );

    assert_eq!(report.violations.len(), 1);
    let v = &report.violations[0];
    assert_eq!(v.message, class_and_module_children::COMPACT_MESSAGE);
    assert_eq!(v.highlight(APP_FILE), "Billing");
    assert_eq!(v.severity, Severity::Warning);
    assert!(!report.has_errors());
}

#[test]
fn disabled_rule_reports_nothing() {
    let report = check(
        Path::new("/project"),
        "[rules.class-and-module-children]\nenabled = false\n",
        APP_FILE,
    );
    assert!(report.is_clean());
}

#[test]
fn repeated_runs_are_identical() {
    let root = Path::new("/project");
    let analyzer = analyzer(root, "");
    let path = root.join("app/billing.rb");

    let first = analyzer.check_source(&path, APP_FILE).expect("parse");
    let second = analyzer.check_source(&path, APP_FILE).expect("parse");
    assert_eq!(first.violations, second.violations);
}

#[test]
fn checks_discovered_files_one_by_one() {
    let tmp = TempDir::new().expect("tempdir");
    let root = tmp.path();
    std::fs::create_dir_all(root.join("lib/billing")).expect("mkdir");
    std::fs::write(root.join("lib/billing.rb"), "module Billing\nend\n").expect("write");
    std::fs::write(
        root.join("lib/billing/refund.rb"),
        "class Billing::Refund\nend\n",
    )
    .expect("write");

    let analyzer = analyzer(root, "");
    let files = analyzer.discover_files().expect("discover");
    assert_eq!(files.len(), 2);

    let flagged: Vec<_> = files
        .iter()
        .map(|f| analyzer.check_file(f).expect("check"))
        .filter(|r| !r.is_clean())
        .map(|r| r.file)
        .collect();
    assert_eq!(flagged, [Path::new("lib/billing/refund.rb")]);
}

#[test]
fn syntax_errors_surface_as_parse_errors() {
    let root = Path::new("/project");
    let err = analyzer(root, "")
        .check_source(&root.join("broken.rb"), "class Foo\n  def\n")
        .expect_err("should not parse");
    assert!(err.to_string().contains("broken.rb"));
}
