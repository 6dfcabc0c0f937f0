use std::ffi::OsString;
use std::path::{Component, Path};

pub trait PathSegmentsExt {
    /// Segments of `self` below `root`, or `None` when `self` is not under `root`.
    /// `.` components are skipped. Names are kept as-is, encoding included.
    fn segments_below(&self, root: &Path) -> Option<Vec<OsString>>;
}

impl PathSegmentsExt for Path {
    fn segments_below(&self, root: &Path) -> Option<Vec<OsString>> {
        let relative = self.strip_prefix(root).ok()?;
        let segments = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(Ok(name.to_os_string())),
                Component::CurDir => None,
                _ => Some(Err(())),
            })
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        Some(segments)
    }
}
