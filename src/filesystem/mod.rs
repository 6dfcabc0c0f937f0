//! Directory listing rendered as an ASCII tree.
//!
//! The pipeline runs in one direction: [`walk`] the filesystem, build a
//! [`FilesystemNode`] tree from the entries, sort it by name, and write it
//! out with a [`TreeRenderer`].

mod render;
mod tree;
mod walker;

use std::io::Write;
use std::path::Path;

use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

pub use render::{RenderError, TreeRenderer};
pub use tree::{FilesystemNode, TreeBuildError};
pub use walker::{WalkEntry, WalkError, walk};

/// Lists `root` into `out`. Files are included only when `print_files` is set.
///
/// Nothing is written unless the whole walk succeeds.
pub fn dir_tree<W: Write>(
    out: &mut W,
    root: &Path,
    print_files: bool,
) -> Result<(), DirTreeError> {
    let entries = walk(root, print_files)
        .collect::<Result<Vec<_>, _>>()
        .context(WalkSnafu)?;
    info!("Walked {} entries below {}", entries.len(), root.display());

    let mut tree = FilesystemNode::try_from_walk(root, &entries).context(TreeBuildSnafu)?;
    tree.sort();
    debug!("Sorted tree below {}", root.display());

    let mut renderer = TreeRenderer::new(out);
    renderer.render(&tree).context(RenderSnafu)?;
    renderer.flush().context(RenderSnafu)?;

    Ok(())
}

#[derive(Debug, Snafu)]
pub enum DirTreeError {
    #[snafu(display("Failed to walk the directory"))]
    WalkError { source: WalkError },
    #[snafu(display("Failed to build the directory tree"))]
    TreeBuildError { source: TreeBuildError },
    #[snafu(display("Failed to render the directory tree"))]
    RenderError { source: RenderError },
}
