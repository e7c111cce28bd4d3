//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# nest-lint configuration

# Lowest severity that fails the run: "info", "warning" or "error"
# fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./app"

# Glob patterns to exclude from analysis
exclude = [
    "**/vendor/**",
    "**/node_modules/**",
    "**/db/schema.rb",
]

# Respect .gitignore files
respect_gitignore = true

[rules.class-and-module-children]
enabled = true
# severity = "warning"  # Override default severity

# "nested": class Foo; class Bar; end; end
# "compact": class Foo::Bar; end
enforced_style = "nested"

# Compact style only: "class", "module" or "both"
# enforced_on = "both"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("nest-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created nest-lint.toml");
    println!("\nNext steps:");
    println!("  1. Pick enforced_style in nest-lint.toml");
    println!("  2. Run: nest-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_lint_core::Config;
    use nest_lint_rules::{ClassAndModuleChildren, EvaluationMode};

    #[test]
    fn default_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).expect("default config should parse");
        let rule = ClassAndModuleChildren::from_config(&config).expect("valid options");
        assert_eq!(rule.mode(), EvaluationMode::Nested);
        assert_eq!(config.analyzer.exclude.len(), 3);
    }
}
