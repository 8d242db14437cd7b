//! Application bundles in a fixed directory (normally `/Applications`).

use std::fs;
use std::path::Path;

/// Suffix that marks a directory entry as an application bundle.
pub const APP_BUNDLE_SUFFIX: &str = ".app";

/// Names of the application bundles directly inside `dir`, sorted.
///
/// An unreadable or missing directory yields an empty list.
pub fn list_app_bundles(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "cannot list applications directory");
            return Vec::new();
        }
    };

    let mut apps: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .filter(|name| name.ends_with(APP_BUNDLE_SUFFIX))
        .collect();
    apps.sort();
    apps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_app_bundles_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Foo.app/Contents")).unwrap();
        fs::create_dir_all(temp.path().join("Bar.app")).unwrap();
        fs::create_dir_all(temp.path().join("Utilities")).unwrap();
        fs::write(temp.path().join("notanapp.txt"), "").unwrap();

        assert_eq!(list_app_bundles(temp.path()), vec!["Bar.app", "Foo.app"]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(list_app_bundles(&temp.path().join("Applications")).is_empty());
    }
}
