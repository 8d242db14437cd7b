//! Indented text map of a directory tree.
//!
//! The map is a quick "what lived where" record for the snapshot, so it is
//! shallow and skips noise: hidden entries (except a short allowlist), build
//! and cache directories, and the backup destination itself. Without the
//! last rule a map of `~` would include every previous snapshot.
//!
//! The walk itself lives in [`walk`] and knows nothing about the filesystem.

pub mod walk;

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use walk::{walk_bounded, MapNode, TreeEntry, TreeSource};

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Hidden entries that are still mapped.
pub const ALLOWED_HIDDEN: &[&str] = &[".config", ".ssh"];

/// Entry names that are never mapped.
pub const EXCLUDED_NAMES: &[&str] = &[
    "Library",
    "node_modules",
    ".git",
    ".venv",
    "venv",
    "__pycache__",
    "target",
    ".Trash",
    ".cache",
    "DerivedData",
    "Pods",
];

/// Real directory listing. Symlinks are never containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTree;

impl TreeSource for FsTree {
    fn children(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let is_container = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            entries.push(TreeEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_container,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Which entries the map leaves out.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    allowed_hidden: BTreeSet<String>,
    excluded_names: BTreeSet<String>,
    protected: Option<PathBuf>,
}

impl ExclusionRules {
    /// The default rules, additionally protecting `protected` (the backup
    /// root) and everything above or below it.
    pub fn new(protected: Option<&Path>) -> Self {
        Self {
            allowed_hidden: ALLOWED_HIDDEN.iter().map(|s| s.to_string()).collect(),
            excluded_names: EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
            protected: protected.map(canonical_or_raw),
        }
    }

    pub fn excludes(&self, entry: &TreeEntry) -> bool {
        if entry.name.starts_with('.') && !self.allowed_hidden.contains(&entry.name) {
            return true;
        }
        if self.excluded_names.contains(&entry.name) {
            return true;
        }
        self.protected
            .as_deref()
            .is_some_and(|protected| overlaps(protected, &entry.path))
    }
}

fn canonical_or_raw(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// True when `path` is an ancestor of, equal to, or inside `protected`.
/// Both sides are compared canonicalized so symlinked aliases match.
fn overlaps(protected: &Path, path: &Path) -> bool {
    let path = canonical_or_raw(path);
    protected.starts_with(&path) || path.starts_with(protected)
}

/// Render the map: a header, a blank line, then one line per node with two
/// spaces per depth level and a trailing `/` on containers.
pub fn render_directory_map<S>(
    source: &S,
    root: &Path,
    max_depth: usize,
    rules: &ExclusionRules,
) -> String
where
    S: TreeSource + ?Sized,
{
    let mut out = format!(
        "Directory map of {} (max depth {})\n\n",
        root.display(),
        max_depth
    );
    walk_bounded(
        source,
        root,
        max_depth,
        |entry| rules.excludes(entry),
        |node| {
            out.push_str(&"  ".repeat(node.depth));
            out.push_str(node.name);
            if node.is_container {
                out.push('/');
            }
            out.push('\n');
        },
    );
    out
}
