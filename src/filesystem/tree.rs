use std::ffi::OsString;
use std::path::{Path, PathBuf};

use hashlink::LinkedHashMap;
use snafu::Snafu;
use tracing::{debug, warn};

use crate::ext::PathSegmentsExt;
use crate::filesystem::WalkEntry;

/// Represents the type of a filesystem node.
/// Names live in the parent's `children` map, so the root has none.
/// They keep the platform encoding; conversion to text happens when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilesystemNode {
    File {
        size: u64,
    },
    Directory {
        children: LinkedHashMap<OsString, FilesystemNode>,
    },
}

impl FilesystemNode {
    pub fn root() -> Self {
        FilesystemNode::Directory {
            children: LinkedHashMap::new(),
        }
    }

    /// Builds the tree rooted at `root` from entries in walk order.
    pub fn try_from_walk<'a>(
        root: &Path,
        entries: impl IntoIterator<Item = &'a WalkEntry>,
    ) -> Result<Self, TreeBuildError> {
        let mut tree = Self::root();
        let mut inserted = 0usize;

        for entry in entries {
            tree.try_insert_entry(root, entry)?;
            inserted += 1;
        }

        debug!("Built tree of {} entries below {}", inserted, root.display());
        Ok(tree)
    }

    /// Attaches `entry` under its parent, which must already be in the tree.
    pub fn try_insert_entry(
        &mut self,
        root: &Path,
        entry: &WalkEntry,
    ) -> Result<(), TreeBuildError> {
        let segments = entry
            .path
            .segments_below(root)
            .ok_or_else(|| TreeBuildError::OutsideRootError {
                path: entry.path.clone(),
            })?;
        let Some((name, parents)) = segments.split_last() else {
            return Err(TreeBuildError::OutsideRootError {
                path: entry.path.clone(),
            });
        };

        let mut current = self;
        for segment in parents {
            current = match current {
                FilesystemNode::Directory { children } => {
                    children
                        .get_mut(segment)
                        .ok_or_else(|| TreeBuildError::MissingParentError {
                            path: entry.path.clone(),
                        })?
                }
                FilesystemNode::File { .. } => {
                    return Err(TreeBuildError::CannotInsertIntoFileError {
                        path: entry.path.clone(),
                    });
                }
            };
        }

        let node = if entry.is_dir {
            Self::root()
        } else {
            FilesystemNode::File { size: entry.size }
        };

        match current {
            FilesystemNode::Directory { children } => {
                if children.insert(name.clone(), node).is_some() {
                    warn!(
                        "Duplicate entry name '{}', keeping {}",
                        name.to_string_lossy(),
                        entry.path.display()
                    );
                }
                Ok(())
            }
            FilesystemNode::File { .. } => Err(TreeBuildError::CannotInsertIntoFileError {
                path: entry.path.clone(),
            }),
        }
    }

    /// Recursively orders children by name, byte-wise, files and directories alike.
    pub fn sort(&mut self) {
        if let FilesystemNode::Directory { children } = self {
            let mut entries = std::mem::take(children).into_iter().collect::<Vec<_>>();
            entries.sort_by(|(a, _), (b, _)| a.as_encoded_bytes().cmp(b.as_encoded_bytes()));
            for (name, mut child) in entries {
                child.sort();
                children.insert(name, child);
            }
        }
    }

    pub fn children(&self) -> Option<&LinkedHashMap<OsString, FilesystemNode>> {
        match self {
            FilesystemNode::Directory { children } => Some(children),
            FilesystemNode::File { .. } => None,
        }
    }
}

#[derive(Debug, Snafu)]
pub enum TreeBuildError {
    #[snafu(display("Entry {} is not below the walked root", path.display()))]
    OutsideRootError { path: PathBuf },
    #[snafu(display("Parent directory of {} was not visited", path.display()))]
    MissingParentError { path: PathBuf },
    #[snafu(display("Cannot insert {} into a file", path.display()))]
    CannotInsertIntoFileError { path: PathBuf },
}
