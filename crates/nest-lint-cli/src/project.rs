//! Locating the Ruby project a checked path belongs to.
//!
//! Starting from the checked file's directory (or the checked directory),
//! ancestors are searched for the nearest directory holding a
//! `nest-lint.toml`, `.nest-lint.toml` or `Gemfile`. That directory is the
//! project root. The configuration then comes from, in order:
//!
//! 1. `--config` (explicit path)
//! 2. the config file in the project root, if the root holds one
//! 3. `$NEST_LINT_CONFIG_DIR/config.toml` or `~/.nest-lint/config.toml`
//! 4. built-in defaults
//!
//! A `Gemfile` without a config file ends the search, so a project never
//! picks up the settings of an enclosing one.

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project root.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found; defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for a config from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// A located project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Canonical project root; the start directory when no marker was found.
    pub root: PathBuf,
    /// Where the configuration comes from.
    pub config: ConfigSource,
}

const CONFIG_NAMES: &[&str] = &["nest-lint.toml", ".nest-lint.toml"];
const GEMFILE: &str = "Gemfile";
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Locates the project containing `target`, a file or a directory.
#[must_use]
pub fn locate(target: &Path, explicit: Option<&Path>) -> Project {
    locate_inner(target, explicit, global_config_dir())
}

fn locate_inner(target: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> Project {
    let target = std::fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf());
    let start = if target.is_file() {
        target.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        target
    };

    let (root, project_config) = match start.ancestors().find_map(marker_in) {
        Some((dir, config)) => (dir, config),
        None => (start.clone(), None),
    };
    tracing::debug!("Project root: {}", root.display());

    let config = if let Some(p) = explicit {
        ConfigSource::Explicit(p.to_path_buf())
    } else if let Some(p) = project_config {
        ConfigSource::Project(p)
    } else {
        global_dir
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|p| p.is_file())
            .map_or(ConfigSource::Default, ConfigSource::Global)
    };

    Project { root, config }
}

/// Returns `dir` and its config file if `dir` marks a project root.
fn marker_in(dir: &Path) -> Option<(PathBuf, Option<PathBuf>)> {
    if let Some(config) = CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
    {
        return Some((dir.to_path_buf(), Some(config)));
    }

    dir.join(GEMFILE)
        .is_file()
        .then(|| (dir.to_path_buf(), None))
}

/// Returns the global config directory: `$NEST_LINT_CONFIG_DIR`, else
/// `~/.nest-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("NEST_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".nest-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn canonical_tmp() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = fs::canonicalize(tmp.path()).unwrap();
        (tmp, path)
    }

    #[test]
    fn file_walks_up_to_gemfile() {
        let (_tmp, root) = canonical_tmp();
        fs::write(root.join("Gemfile"), "").unwrap();
        fs::create_dir_all(root.join("app/models")).unwrap();
        let file = root.join("app/models/user.rb");
        fs::write(&file, "class User; end\n").unwrap();

        let project = locate_inner(&file, None, None);
        assert_eq!(project.root, root);
        assert_eq!(project.config, ConfigSource::Default);
    }

    #[test]
    fn directory_walks_up_to_config() {
        let (_tmp, root) = canonical_tmp();
        fs::write(root.join(".nest-lint.toml"), "").unwrap();
        fs::create_dir_all(root.join("lib/deep")).unwrap();

        let project = locate_inner(&root.join("lib/deep"), None, None);
        assert_eq!(project.root, root);
        assert_eq!(
            project.config,
            ConfigSource::Project(root.join(".nest-lint.toml"))
        );
    }

    #[test]
    fn nearest_gemfile_shadows_outer_config() {
        let (_tmp, outer) = canonical_tmp();
        fs::write(outer.join("nest-lint.toml"), "").unwrap();
        let inner = outer.join("engines/billing");
        fs::create_dir_all(inner.join("lib")).unwrap();
        fs::write(inner.join("Gemfile"), "").unwrap();

        let project = locate_inner(&inner.join("lib"), None, None);
        assert_eq!(project.root, inner);
        assert_eq!(project.config, ConfigSource::Default);
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let (_tmp, root) = canonical_tmp();
        fs::write(root.join("nest-lint.toml"), "").unwrap();
        fs::write(root.join(".nest-lint.toml"), "").unwrap();

        let project = locate_inner(&root, None, None);
        assert_eq!(
            project.config,
            ConfigSource::Project(root.join("nest-lint.toml"))
        );
    }

    #[test]
    fn explicit_config_keeps_located_root() {
        let (_tmp, root) = canonical_tmp();
        fs::write(root.join("Gemfile"), "").unwrap();
        fs::write(root.join("nest-lint.toml"), "").unwrap();
        fs::create_dir(root.join("lib")).unwrap();

        let project = locate_inner(&root.join("lib"), Some(Path::new("/elsewhere.toml")), None);
        assert_eq!(project.root, root);
        assert_eq!(
            project.config,
            ConfigSource::Explicit(PathBuf::from("/elsewhere.toml"))
        );
    }

    #[test]
    fn global_config_when_project_has_none() {
        let (_tmp, root) = canonical_tmp();
        fs::write(root.join("Gemfile"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let project = locate_inner(&root, None, Some(global.path().to_path_buf()));
        assert_eq!(
            project.config,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(project.config.is_global());

        let empty = TempDir::new().unwrap();
        let project = locate_inner(&root, None, Some(empty.path().to_path_buf()));
        assert!(project.config.path().is_none());
    }
}
