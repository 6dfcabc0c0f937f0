use std::io::Write;

use derive_more::Display;
use snafu::{ResultExt, Snafu};

use crate::filesystem::FilesystemNode;

const BRANCH: &str = "├───";
const LAST_BRANCH: &str = "└───";
const CONTINUATION: &str = "│\t";
const PADDING: &str = "\t";

/// Suffix printed after a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SizeLabel {
    #[display("({_0}b)")]
    Bytes(u64),
    #[display("(empty)")]
    Empty,
}

impl From<u64> for SizeLabel {
    fn from(size: u64) -> Self {
        if size > 0 {
            SizeLabel::Bytes(size)
        } else {
            SizeLabel::Empty
        }
    }
}

pub struct TreeRenderer<W: Write> {
    out: W,
}

impl<W: Write> TreeRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes every node below `root`, one line each, in pre-order.
    pub fn render(&mut self, root: &FilesystemNode) -> Result<(), RenderError> {
        self.render_children(root, Vec::new())
    }

    pub fn flush(&mut self) -> Result<(), RenderError> {
        self.out.flush().context(WriteSnafu)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_children(
        &mut self,
        node: &FilesystemNode,
        ancestry: Vec<bool>,
    ) -> Result<(), RenderError> {
        let Some(children) = node.children() else {
            return Ok(());
        };

        let last_index = children.len().saturating_sub(1);
        for (index, (name, child)) in children.iter().enumerate() {
            let mut child_ancestry = ancestry.clone();
            child_ancestry.push(index == last_index);

            self.render_line(&name.to_string_lossy(), child, &child_ancestry)?;
            self.render_children(child, child_ancestry)?;
        }

        Ok(())
    }

    fn render_line(
        &mut self,
        name: &str,
        node: &FilesystemNode,
        ancestry: &[bool],
    ) -> Result<(), RenderError> {
        let Some((is_last, ancestors)) = ancestry.split_last() else {
            return Ok(());
        };

        let mut line = ancestors
            .iter()
            .map(|&ancestor_is_last| if ancestor_is_last { PADDING } else { CONTINUATION })
            .collect::<String>();
        line.push_str(if *is_last { LAST_BRANCH } else { BRANCH });
        line.push_str(name);
        if let FilesystemNode::File { size } = node {
            line.push(' ');
            line.push_str(&SizeLabel::from(*size).to_string());
        }
        line.push('\n');

        self.out.write_all(line.as_bytes()).context(WriteSnafu)
    }
}

#[derive(Debug, Snafu)]
pub enum RenderError {
    #[snafu(display("Failed to write the tree output"))]
    WriteError { source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::WalkEntry;
    use rstest::*;
    use std::io;
    use std::path::{Path, PathBuf};

    fn build(entries: &[(&str, bool, u64)]) -> FilesystemNode {
        let entries = entries
            .iter()
            .map(|(path, is_dir, size)| WalkEntry {
                path: PathBuf::from("root").join(path),
                is_dir: *is_dir,
                size: *size,
            })
            .collect::<Vec<_>>();
        let mut tree =
            FilesystemNode::try_from_walk(Path::new("root"), &entries).expect("Build failed");
        tree.sort();
        tree
    }

    fn render_to_string(tree: &FilesystemNode) -> String {
        let mut renderer = TreeRenderer::new(Vec::new());
        renderer.render(tree).expect("Render failed");
        String::from_utf8(renderer.into_inner()).expect("Output is not UTF-8")
    }

    struct FailingWriter {
        writes_before_failure: usize,
        written: Vec<u8>,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_before_failure == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            self.writes_before_failure -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    #[case(0, "(empty)")]
    #[case(1, "(1b)")]
    #[case(5, "(5b)")]
    #[case(1_048_576, "(1048576b)")]
    fn size_label_formats_size(#[case] size: u64, #[case] expected: &str) {
        assert_eq!(SizeLabel::from(size).to_string(), expected);
    }

    #[test]
    fn render_of_empty_root_writes_nothing() {
        assert_eq!(render_to_string(&FilesystemNode::root()), "");
    }

    #[test]
    fn render_mixed_directories_and_files() {
        let tree = build(&[("a", true, 0), ("a/x", false, 0), ("b.txt", false, 5)]);

        assert_eq!(
            render_to_string(&tree),
            "├───a\n│\t└───x (empty)\n└───b.txt (5b)\n"
        );
    }

    #[test]
    fn render_directories_never_get_size_label() {
        let tree = build(&[("a", true, 4096)]);

        assert_eq!(render_to_string(&tree), "└───a\n");
    }

    #[test]
    fn render_uses_padding_below_last_ancestor() {
        let tree = build(&[
            ("a", true, 0),
            ("a/b", true, 0),
            ("a/b/c", false, 2),
            ("a/b/d", false, 0),
            ("a/e", true, 0),
            ("z", true, 0),
            ("z/y", true, 0),
            ("z/y/w", false, 1),
        ]);

        let expected = [
            "├───a",
            "│\t├───b",
            "│\t│\t├───c (2b)",
            "│\t│\t└───d (empty)",
            "│\t└───e",
            "└───z",
            "\t└───y",
            "\t\t└───w (1b)",
        ]
        .map(|line| format!("{line}\n"))
        .concat();
        assert_eq!(render_to_string(&tree), expected);
    }

    #[test]
    fn render_marks_only_final_sibling_as_last() {
        let tree = build(&[("c", true, 0), ("a", true, 0), ("b", true, 0)]);

        let output = render_to_string(&tree);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines, vec!["├───a", "├───b", "└───c"]);
    }

    #[test]
    fn render_fails_on_first_write_error() {
        let tree = build(&[("a", true, 0), ("b", true, 0), ("c", true, 0)]);
        let writer = FailingWriter {
            writes_before_failure: 1,
            written: Vec::new(),
        };
        let mut renderer = TreeRenderer::new(writer);

        let result = renderer.render(&tree);

        assert!(matches!(result, Err(RenderError::WriteError { .. })));
        assert_eq!(renderer.into_inner().written, "├───a\n".as_bytes());
    }

    #[cfg(unix)]
    #[test]
    fn render_converts_non_utf8_names_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let entries = [b"\xff".as_slice(), b"\xfe".as_slice()]
            .into_iter()
            .zip([2, 1])
            .map(|(name, size)| WalkEntry {
                path: Path::new("root").join(OsStr::from_bytes(name)),
                is_dir: false,
                size,
            })
            .collect::<Vec<_>>();
        let mut tree =
            FilesystemNode::try_from_walk(Path::new("root"), &entries).expect("Build failed");
        tree.sort();

        assert_eq!(
            render_to_string(&tree),
            "├───\u{FFFD} (1b)\n└───\u{FFFD} (2b)\n"
        );
    }
}
