use crate::error::{FolderToolsError, Result};
use crate::extractor::output_manager::OutputManager;
use crate::extractor::{emit, EventCallback, SkippedEntry, WalkEvent};
use crate::scanner::DirectoryWalker;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub bytes_processed: u64,
    pub directories_visited: usize,
    pub start_time: Instant,
    pub skipped: Vec<SkippedEntry>,
}

impl ExtractionProgress {
    pub fn new() -> Self {
        Self {
            files_processed: 0,
            bytes_processed: 0,
            directories_visited: 0,
            start_time: Instant::now(),
            skipped: Vec::new(),
        }
    }

    pub fn update_file(&mut self, bytes: u64) {
        self.files_processed += 1;
        self.bytes_processed += bytes;
    }

    pub fn add_skipped(&mut self, entry: SkippedEntry) {
        self.skipped.push(entry);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExtractionProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenates every non-excluded file under a root into one text stream.
///
/// Each file becomes `--- File: <path> ---`, its full contents, and a blank
/// line. Files that cannot be read as UTF-8 text are reported and left out
/// entirely; nothing is written for them.
pub struct ContentExtractor {
    walker: DirectoryWalker,
    output_path: Option<PathBuf>,
}

impl ContentExtractor {
    pub fn new(walker: DirectoryWalker) -> Self {
        Self {
            walker,
            output_path: None,
        }
    }

    /// Never ingest this file, whatever its name. Expects a canonical path.
    pub fn with_output_path<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.output_path = path.map(Into::into);
        self
    }

    pub fn extract<W: Write>(
        &self,
        root: &Path,
        out: &mut W,
        on_event: Option<EventCallback<'_>>,
    ) -> Result<ExtractionProgress> {
        let mut progress = ExtractionProgress::new();

        for node in self.walker.walk(root)? {
            let node = match node {
                Ok(node) => node,
                Err(FolderToolsError::Walk { path, message }) => {
                    let skipped = SkippedEntry::new(path, message);
                    emit(on_event, WalkEvent::Skipped(&skipped));
                    progress.add_skipped(skipped);
                    continue;
                }
                Err(e) => return Err(e),
            };

            progress.directories_visited += 1;
            emit(on_event, WalkEvent::Directory(&node.path));

            for file in &node.files {
                if self.is_output_file(&file.path) {
                    continue;
                }

                // read fully first so a failure never leaves a dangling header
                match fs::read_to_string(&file.path) {
                    Ok(content) => {
                        write_record(out, &file.path, &content)?;
                        emit(on_event, WalkEvent::File(&file.path));
                        progress.update_file(content.len() as u64);
                    }
                    Err(e) => {
                        let skipped = SkippedEntry::new(&file.path, e.to_string());
                        emit(on_event, WalkEvent::Skipped(&skipped));
                        progress.add_skipped(skipped);
                    }
                }
            }
        }

        out.flush()?;
        Ok(progress)
    }

    /// Truncate `output` and extract into it. The output file is skipped if
    /// the walk reaches it.
    pub fn extract_to_file(
        self,
        root: &Path,
        output: &Path,
        on_event: Option<EventCallback<'_>>,
    ) -> Result<ExtractionProgress> {
        // a missing root must not clobber an existing output file
        self.walker.walk(root)?;

        let manager = OutputManager::new(output);
        let mut writer = manager.create()?;

        let extractor = if self.output_path.is_some() {
            self
        } else {
            let canonical = manager.canonical_path();
            self.with_output_path(canonical)
        };

        let progress = extractor
            .extract(root, &mut writer, on_event)
            .map_err(|e| manager.wrap_write_error(e))?;
        manager.finish(writer)?;

        Ok(progress)
    }

    fn is_output_file(&self, path: &Path) -> bool {
        let Some(ref output) = self.output_path else {
            return false;
        };

        if path.file_name() != output.file_name() {
            return false;
        }

        fs::canonicalize(path).is_ok_and(|p| &p == output)
    }
}

fn write_record<W: Write>(out: &mut W, path: &Path, content: &str) -> Result<()> {
    writeln!(out, "--- File: {} ---", path.display())?;
    out.write_all(content.as_bytes())?;
    out.write_all(b"\n\n")?;
    Ok(())
}
