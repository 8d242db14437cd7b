//! Depth-bounded tree walk, independent of where the tree comes from.

use std::io;
use std::path::{Path, PathBuf};

/// One child returned by a [`TreeSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_container: bool,
}

/// A node as handed to the visitor. Depth 0 is a direct child of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapNode<'a> {
    pub name: &'a str,
    pub is_container: bool,
    pub depth: usize,
}

/// Anything that can list the children of a container.
pub trait TreeSource {
    fn children(&self, dir: &Path) -> io::Result<Vec<TreeEntry>>;
}

/// Visit every non-excluded node under `root`, pre-order, down to
/// `max_depth`.
///
/// Children of a node at depth `d` are visited only when `d < max_depth`.
/// An error listing a container drops that branch and the walk carries on.
pub fn walk_bounded<S, X, V>(source: &S, root: &Path, max_depth: usize, exclude: X, mut visit: V)
where
    S: TreeSource + ?Sized,
    X: Fn(&TreeEntry) -> bool,
    V: FnMut(MapNode<'_>),
{
    walk_level(source, root, 0, max_depth, &exclude, &mut visit);
}

fn walk_level<S, X, V>(
    source: &S,
    dir: &Path,
    depth: usize,
    max_depth: usize,
    exclude: &X,
    visit: &mut V,
) where
    S: TreeSource + ?Sized,
    X: Fn(&TreeEntry) -> bool,
    V: FnMut(MapNode<'_>),
{
    let entries = match source.children(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), error = %err, "cannot list directory, skipping branch");
            return;
        }
    };

    for entry in entries.iter().filter(|entry| !exclude(entry)) {
        visit(MapNode {
            name: &entry.name,
            is_container: entry.is_container,
            depth,
        });
        if entry.is_container && depth < max_depth {
            walk_level(source, &entry.path, depth + 1, max_depth, exclude, visit);
        }
    }
}
