//! Deterministic directory traversal.
//!
//! Fingerprinting and the size/count statistics both fold over the same
//! walk, so they always agree on which entries a tree contains and in what
//! order they come.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// What kind of filesystem entry was visited, after resolving symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Anything that is not a directory.
    File,
    Dir,
}

/// One entry below the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Full path of the entry, as reached through the tree.
    pub path: PathBuf,
    /// Size in bytes of the entry or its link target; zero for directories.
    pub size: u64,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Walk everything below `root`, depth-first, siblings sorted by file name.
///
/// Symlinks are followed, so a linked file counts with its target's size and
/// a linked directory is descended into. Broken links and link cycles are
/// yielded as errors. The root itself is not yielded.
pub fn walk_tree(root: &Path) -> impl Iterator<Item = Result<TreeEntry>> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| -> Result<TreeEntry> {
            let entry = entry.map_err(io::Error::from)?;

            let (kind, size) = if entry.file_type().is_dir() {
                (EntryKind::Dir, 0)
            } else {
                (EntryKind::File, entry.metadata().map_err(io::Error::from)?.len())
            };

            Ok(TreeEntry {
                path: entry.into_path(),
                size,
                kind,
            })
        })
}
