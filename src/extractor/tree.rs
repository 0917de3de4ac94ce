use crate::error::{FolderToolsError, Result};
use crate::extractor::output_manager::OutputManager;
use crate::extractor::{emit, EventCallback, SkippedEntry, WalkEvent};
use crate::scanner::{DirectoryWalker, TraversalNode};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

const BRANCH: &str = "├── ";
const PIPE: &str = "│   ";

#[derive(Debug, Clone)]
pub struct TreeStats {
    pub directories: usize,
    pub files: usize,
    pub bytes_written: u64,
    pub start_time: Instant,
    pub skipped: Vec<SkippedEntry>,
}

impl TreeStats {
    fn new() -> Self {
        Self {
            directories: 0,
            files: 0,
            bytes_written: 0,
            start_time: Instant::now(),
            skipped: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Renders a directory as an indented listing.
///
/// The first line is the root's name followed by `/`. Every visited
/// directory then contributes its sub-directories at its own depth and its
/// files one level deeper:
///
/// ```text
/// project/
/// ├── src/
/// │   ├── README.md
/// │   ├── lib.rs
/// ```
pub struct TreePrinter {
    walker: DirectoryWalker,
}

impl TreePrinter {
    pub fn new(walker: DirectoryWalker) -> Self {
        Self { walker }
    }

    pub fn render<W: Write>(
        &self,
        root: &Path,
        out: &mut W,
        on_event: Option<EventCallback<'_>>,
    ) -> Result<TreeStats> {
        let walk = self.walker.walk(root)?;
        let mut stats = TreeStats::new();

        stats.bytes_written += write_line(out, &format!("{}/", root_label(root)))?;

        for node in walk {
            let node = match node {
                Ok(node) => node,
                Err(FolderToolsError::Walk { path, message }) => {
                    let skipped = SkippedEntry::new(path, message);
                    emit(on_event, WalkEvent::Skipped(&skipped));
                    stats.skipped.push(skipped);
                    continue;
                }
                Err(e) => return Err(e),
            };

            emit(on_event, WalkEvent::Directory(&node.path));
            stats.bytes_written += write_node(out, &node)?;
            stats.directories += node.dirs.len();
            stats.files += node.files.len();
        }

        out.flush()?;
        Ok(stats)
    }

    /// Render into memory; used for previews that never touch the output file.
    pub fn render_to_string(
        &self,
        root: &Path,
        on_event: Option<EventCallback<'_>>,
    ) -> Result<(String, TreeStats)> {
        let mut buffer = Vec::new();
        let stats = self.render(root, &mut buffer, on_event)?;
        Ok((String::from_utf8_lossy(&buffer).into_owned(), stats))
    }

    pub fn render_to_file(
        &self,
        root: &Path,
        output: &Path,
        on_event: Option<EventCallback<'_>>,
    ) -> Result<TreeStats> {
        self.walker.walk(root)?;

        let manager = OutputManager::new(output);
        let mut writer = manager.create()?;
        let stats = self
            .render(root, &mut writer, on_event)
            .map_err(|e| manager.wrap_write_error(e))?;
        manager.finish(writer)?;

        Ok(stats)
    }
}

fn write_node<W: Write>(out: &mut W, node: &TraversalNode) -> Result<u64> {
    let indent = PIPE.repeat(node.depth);
    let file_indent = PIPE.repeat(node.depth + 1);
    let mut written = 0;

    for dir in node.dir_names() {
        written += write_line(out, &format!("{}{}{}/", indent, BRANCH, dir))?;
    }

    for file in node.file_names() {
        written += write_line(out, &format!("{}{}{}", file_indent, BRANCH, file))?;
    }

    Ok(written)
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<u64> {
    writeln!(out, "{}", line)?;
    Ok(line.len() as u64 + 1)
}

/// Name of the root as shown on the first line: the last component of its
/// absolute path. Resolved lexically, so a symlinked root keeps its own name.
fn root_label(root: &Path) -> String {
    let Ok(absolute) = std::path::absolute(root) else {
        return String::new();
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    normalized
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ExclusionSet;
    use std::fs;
    use tempfile::TempDir;

    fn create_printer() -> TreePrinter {
        TreePrinter::new(DirectoryWalker::new(ExclusionSet::from_names(
            ["node_modules", ".git"],
            [".env", "index.html"],
        )))
    }

    fn root_line(root: &Path) -> String {
        format!("{}/", root_label(root))
    }

    fn render_to_string(printer: &TreePrinter, root: &Path) -> String {
        printer.render_to_string(root, None).unwrap().0
    }

    #[test]
    fn test_root_children_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("b")).unwrap();
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("z.txt"), "").unwrap();
        fs::write(root.join("m.txt"), "").unwrap();

        let output = render_to_string(&create_printer(), root);

        let expected = format!(
            "{}\n├── a/\n├── b/\n│   ├── m.txt\n│   ├── z.txt\n",
            root_line(root)
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_nested_indentation() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/util")).unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/util/mod.rs"), "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();

        let output = render_to_string(&create_printer(), root);
        let lines: Vec<_> = output.lines().skip(1).collect();

        assert_eq!(
            lines,
            vec![
                "├── src/",
                "│   ├── Cargo.toml",
                "│   ├── util/",
                "│   │   ├── lib.rs",
                "│   │   │   ├── mod.rs",
            ]
        );
    }

    #[test]
    fn test_exclusions_hide_subtree_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("node_modules/react")).unwrap();
        fs::write(root.join("node_modules/react/index.js"), "").unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join(".env"), "SECRET=1").unwrap();
        fs::write(root.join("main.ts"), "").unwrap();

        let printer = create_printer();
        let output = render_to_string(&printer, root);

        assert!(!output.contains("node_modules"));
        assert!(!output.contains("react"));
        assert!(!output.contains("index.html"));
        assert!(!output.contains(".env"));
        assert!(output.contains("main.ts"));
    }

    #[test]
    fn test_stats_counts() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/one.txt"), "").unwrap();
        fs::write(root.join("a/b/two.txt"), "").unwrap();

        let mut buffer = Vec::new();
        let stats = create_printer().render(root, &mut buffer, None).unwrap();

        assert_eq!(stats.directories, 2);
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes_written, buffer.len() as u64);
    }

    #[test]
    fn test_render_to_file_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(root.join("docs/guide.md"), "").unwrap();
        let output = root.join("folder_tree.txt");

        let printer = create_printer();
        printer.render_to_file(root, &output, None).unwrap();
        let first = fs::read(&output).unwrap();
        printer.render_to_file(root, &output, None).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("folder_tree.txt");
        fs::write(&output, "previous run").unwrap();

        let result = create_printer().render_to_file(&temp_dir.path().join("gone"), &output, None);

        assert!(matches!(result, Err(FolderToolsError::RootNotFound { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous run");
    }

    #[test]
    fn test_root_label_uses_directory_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("my_project");
        fs::create_dir(&root).unwrap();

        assert_eq!(root_label(&root), "my_project");
        assert_eq!(root_label(&root.join(".")), "my_project");
        assert_eq!(root_label(&root.join("sub/..")), "my_project");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_root_keeps_link_name() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real_project");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("main.rs"), "").unwrap();
        let link = temp_dir.path().join("shortcut");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let output = render_to_string(&create_printer(), &link);

        assert!(output.starts_with("shortcut/\n"));
        assert!(output.contains("│   ├── main.rs"));
    }

    #[test]
    fn test_unlistable_directory_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("docs")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("docs/guide.md"), "").unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();

        // drop docs once the root has been listed, so listing it later fails
        let callback: EventCallback<'_> = &|event| {
            if let WalkEvent::Directory(path) = event {
                if *path == root {
                    fs::remove_dir_all(root.join("docs")).unwrap();
                }
            }
        };

        let (output, stats) = create_printer()
            .render_to_string(root, Some(callback))
            .unwrap();

        assert_eq!(stats.skipped.len(), 1);
        assert_eq!(stats.skipped[0].path, root.join("docs"));
        assert!(output.contains("├── docs/"));
        assert!(!output.contains("guide.md"));
        assert!(output.contains("│   │   ├── lib.rs"));
    }
}
