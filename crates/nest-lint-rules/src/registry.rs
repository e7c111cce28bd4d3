//! Rule lookup and construction from configuration.

use crate::class_and_module_children::{self, ClassAndModuleChildren};
use nest_lint_core::{Config, ConfigError, RuleBox};

/// Returns every rule with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(ClassAndModuleChildren::new())]
}

/// Builds every enabled rule with options read from `config`.
///
/// # Errors
///
/// Returns the first invalid rule option found.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let mut rules: Vec<RuleBox> = Vec::new();

    if config.is_rule_enabled(class_and_module_children::NAME) {
        rules.push(Box::new(ClassAndModuleChildren::from_config(config)?));
    }

    Ok(rules)
}

/// Builds the rule named `name` (or with code `name`) from `config`.
///
/// Returns `Ok(None)` for an unknown rule.
///
/// # Errors
///
/// Returns an error if the rule's options are invalid.
pub fn find_rule(name: &str, config: &Config) -> Result<Option<RuleBox>, ConfigError> {
    match name {
        class_and_module_children::NAME | class_and_module_children::CODE => Ok(Some(Box::new(
            ClassAndModuleChildren::from_config(config)?,
        ))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules() {
        let names: Vec<&str> = all_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, ["class-and-module-children"]);
    }

    #[test]
    fn test_configured_rules_skips_disabled() {
        let config = Config::parse("[rules.class-and-module-children]\nenabled = false\n")
            .expect("Failed to parse");
        assert!(configured_rules(&config).expect("valid").is_empty());
    }

    #[test]
    fn test_configured_rules_propagates_errors() {
        let config =
            Config::parse("[rules.class-and-module-children]\nenforced_style = \"sideways\"\n")
                .expect("Failed to parse");
        assert!(configured_rules(&config).is_err());
    }

    #[test]
    fn test_find_rule_by_name_or_code() {
        let config = Config::default();
        assert!(find_rule("class-and-module-children", &config)
            .expect("valid")
            .is_some());
        assert!(find_rule("NL001", &config).expect("valid").is_some());
        assert!(find_rule("no-such-rule", &config).expect("valid").is_none());
    }
}
