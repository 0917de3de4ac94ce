use crate::error::{FolderToolsError, Result};
use crate::scanner::exclusion::ExclusionSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A child of a visited directory that survived the exclusion filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub name: String,
    pub path: PathBuf,
}

/// One visited directory together with its (already filtered) children.
#[derive(Debug, Clone)]
pub struct TraversalNode {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub depth: usize,
    pub dirs: Vec<ChildEntry>,
    pub files: Vec<ChildEntry>,
}

impl TraversalNode {
    fn new(path: PathBuf, relative_path: PathBuf, depth: usize) -> Self {
        Self {
            path,
            relative_path,
            depth,
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn dir_names(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(|d| d.name.as_str())
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.name.as_str())
    }
}

/// Top-down directory walker. Excluded directories are dropped from a
/// node's child list before descent, so their subtrees are never read.
/// Children are sorted by name, which makes the visiting order stable.
pub struct DirectoryWalker {
    exclusions: ExclusionSet,
    max_depth: Option<usize>,
}

impl DirectoryWalker {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            exclusions,
            max_depth: None,
        }
    }

    /// Limit how many directory levels below the root are listed.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn walk<P: AsRef<Path>>(&self, root: P) -> Result<Walk<'_>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(FolderToolsError::RootNotFound {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(FolderToolsError::RootNotDirectory {
                path: root_path.display().to_string(),
            });
        }

        Ok(Walk {
            walker: self,
            root: root_path.to_path_buf(),
            stack: vec![(root_path.to_path_buf(), 0)],
        })
    }
}

/// Iterator over the nodes of one walk, in pre-order. An `Err` item means
/// a directory below the root could not be listed; iteration continues
/// with the next pending directory.
pub struct Walk<'a> {
    walker: &'a DirectoryWalker,
    root: PathBuf,
    stack: Vec<(PathBuf, usize)>,
}

impl Walk<'_> {
    fn visit(&mut self, path: PathBuf, depth: usize) -> Result<TraversalNode> {
        let relative_path = path
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut node = TraversalNode::new(path, relative_path, depth);

        let listing = WalkDir::new(&node.path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut descend = Vec::new();

        for entry in listing {
            let entry = entry.map_err(|err| FolderToolsError::Walk {
                path: node.path.display().to_string(),
                message: err.to_string(),
            })?;

            let child = ChildEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
            };

            if is_directory(&entry) {
                if self.walker.exclusions.is_excluded_dir(&child.name) {
                    continue;
                }
                // symlinked directories are listed but never followed
                if entry.file_type().is_dir() && self.can_descend(depth + 1) {
                    descend.push(child.path.clone());
                }
                node.dirs.push(child);
            } else if !self.walker.exclusions.is_excluded_file(&child.name) {
                node.files.push(child);
            }
        }

        for dir in descend.into_iter().rev() {
            self.stack.push((dir, depth + 1));
        }

        Ok(node)
    }

    fn can_descend(&self, depth: usize) -> bool {
        self.walker.max_depth.map_or(true, |max| depth < max)
    }
}

impl Iterator for Walk<'_> {
    type Item = Result<TraversalNode>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, depth) = self.stack.pop()?;
        Some(self.visit(path, depth))
    }
}

fn is_directory(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir())
}
