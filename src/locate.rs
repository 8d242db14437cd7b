//! Executable lookup that survives a minimal inherited `PATH`.
//!
//! When the tool runs from launchd the inherited `PATH` is usually just
//! `/usr/bin:/bin:/usr/sbin:/sbin`, so Homebrew-installed tools are invisible
//! to a plain `which`. Resolution therefore tries, in order:
//!
//! 1. The inherited `PATH` of this process
//! 2. Fixed well-known install roots (see [`DEFAULT_FALLBACK_DIRS`])
//!
//! The first strategy that yields an existing executable wins.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Install roots checked after the inherited `PATH`.
pub const DEFAULT_FALLBACK_DIRS: &[&str] =
    &["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin", "/bin"];

/// One way of finding an executable by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStrategy {
    /// A `PATH`-style value, usually the one this process inherited.
    Inherited(Option<OsString>),
    /// Fixed directories, checked in order.
    Roots(Vec<PathBuf>),
}

impl SearchStrategy {
    fn resolve(&self, name: &str, cwd: &Path) -> Option<PathBuf> {
        match self {
            SearchStrategy::Inherited(Some(path)) if !path.is_empty() => {
                which::which_in(name, Some(path), cwd).ok()
            }
            SearchStrategy::Inherited(_) => None,
            SearchStrategy::Roots(roots) => roots
                .iter()
                .filter(|root| root.is_dir())
                .find_map(|root| which::which_in(name, Some(root.as_os_str()), cwd).ok()),
        }
    }
}

/// Prioritized list of [`SearchStrategy`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableLocator {
    strategies: Vec<SearchStrategy>,
}

impl ExecutableLocator {
    pub fn new(strategies: Vec<SearchStrategy>) -> Self {
        Self { strategies }
    }

    /// Inherited `PATH` first, then `fallback_dirs`.
    pub fn from_env(fallback_dirs: &[PathBuf]) -> Self {
        Self::new(vec![
            SearchStrategy::Inherited(env::var_os("PATH")),
            SearchStrategy::Roots(fallback_dirs.to_vec()),
        ])
    }

    pub fn strategies(&self) -> &[SearchStrategy] {
        &self.strategies
    }

    /// Path of the first executable named `name`, if any strategy finds one.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let found = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.resolve(name, &cwd));
        match &found {
            Some(path) => tracing::debug!(name, path = %path.display(), "located executable"),
            None => tracing::debug!(name, "executable not found in any search location"),
        }
        found
    }
}

/// [`DEFAULT_FALLBACK_DIRS`] as owned paths.
pub fn default_fallback_dirs() -> Vec<PathBuf> {
    DEFAULT_FALLBACK_DIRS.iter().map(PathBuf::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn same_file(a: &Path, b: &Path) -> bool {
        fs::canonicalize(a).unwrap() == fs::canonicalize(b).unwrap()
    }

    #[test]
    fn test_inherited_path_wins_over_roots() {
        let temp = TempDir::new().unwrap();
        let inherited = temp.path().join("inherited");
        let root = temp.path().join("root");
        fs::create_dir_all(&inherited).unwrap();
        fs::create_dir_all(&root).unwrap();
        let expected = fake_executable(&inherited, "lister-tool");
        fake_executable(&root, "lister-tool");

        let locator = ExecutableLocator::new(vec![
            SearchStrategy::Inherited(Some(inherited.clone().into_os_string())),
            SearchStrategy::Roots(vec![root]),
        ]);

        let found = locator.locate("lister-tool").unwrap();
        assert!(same_file(&found, &expected));
    }

    #[test]
    fn test_falls_back_to_fixed_roots() {
        let temp = TempDir::new().unwrap();
        let empty = temp.path().join("empty");
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        for dir in [&empty, &first, &second] {
            fs::create_dir_all(dir).unwrap();
        }
        fake_executable(&second, "lister-tool");
        let expected = fake_executable(&first, "lister-tool");

        let locator = ExecutableLocator::new(vec![
            SearchStrategy::Inherited(Some(empty.into_os_string())),
            SearchStrategy::Roots(vec![temp.path().join("missing"), first, second]),
        ]);

        let found = locator.locate("lister-tool").unwrap();
        assert!(same_file(&found, &expected));
    }

    #[test]
    fn test_non_executable_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("lister-tool"), "not executable").unwrap();

        let locator =
            ExecutableLocator::new(vec![SearchStrategy::Roots(vec![temp.path().to_path_buf()])]);

        assert!(locator.locate("lister-tool").is_none());
    }

    #[test]
    fn test_missing_everywhere_returns_none() {
        let temp = TempDir::new().unwrap();
        let locator = ExecutableLocator::new(vec![
            SearchStrategy::Inherited(None),
            SearchStrategy::Inherited(Some(OsString::new())),
            SearchStrategy::Roots(vec![temp.path().to_path_buf()]),
        ]);

        assert!(locator.locate("definitely_not_a_real_command_12345").is_none());
    }

    #[test]
    fn test_from_env_order() {
        let roots = default_fallback_dirs();
        let locator = ExecutableLocator::from_env(&roots);

        assert!(matches!(
            locator.strategies()[0],
            SearchStrategy::Inherited(_)
        ));
        assert_eq!(locator.strategies()[1], SearchStrategy::Roots(roots));
    }
}
