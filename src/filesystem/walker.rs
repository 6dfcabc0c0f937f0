use std::path::{Path, PathBuf};

use snafu::Snafu;
use tracing::debug;
use walkdir::WalkDir;

/// One entry below the walked root, in traversal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
}

/// Walks everything below `root` depth-first, children in file name order.
///
/// The root itself is never yielded. Directories are always yielded, other
/// entries only when `print_files` is set. Symlinks are not followed.
pub fn walk(
    root: &Path,
    print_files: bool,
) -> impl Iterator<Item = Result<WalkEntry, WalkError>> + use<> {
    debug!("Walking {} (files: {})", root.display(), print_files);
    let fallback_path = root.to_path_buf();

    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => return Some(Err(read_error(source, &fallback_path))),
            };

            let is_dir = entry.file_type().is_dir();
            if !is_dir && !print_files {
                return None;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(source) => return Some(Err(read_error(source, &fallback_path))),
            };

            Some(Ok(WalkEntry {
                path: entry.into_path(),
                is_dir,
                size,
            }))
        })
}

fn read_error(source: walkdir::Error, fallback_path: &Path) -> WalkError {
    let path = source
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback_path.to_path_buf());
    WalkError::ReadError { path, source }
}

#[derive(Debug, Snafu)]
pub enum WalkError {
    #[snafu(display("Failed to read {}", path.display()))]
    ReadError {
        path: PathBuf,
        source: walkdir::Error,
    },
}
