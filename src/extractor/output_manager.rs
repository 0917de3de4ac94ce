use crate::config::Tool;
use crate::error::{FolderToolsError, Result};
use crate::extractor::{ExtractionProgress, SkippedEntry, TreeStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUFFER_SIZE: usize = 64 * 1024;

/// Owns the single output file of a run: truncate, buffer, flush.
pub struct OutputManager {
    path: PathBuf,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn create(&self) -> Result<BufWriter<File>> {
        let file = File::create(&self.path).map_err(|e| self.write_error(e))?;
        Ok(BufWriter::with_capacity(BUFFER_SIZE, file))
    }

    /// Only meaningful once `create` has succeeded.
    pub fn canonical_path(&self) -> Option<PathBuf> {
        fs::canonicalize(&self.path).ok()
    }

    pub fn finish(&self, mut writer: BufWriter<File>) -> Result<()> {
        writer.flush().map_err(|e| self.write_error(e))?;
        writer
            .into_inner()
            .map_err(|e| self.write_error(e.into_error()))?
            .sync_all()
            .map_err(|e| self.write_error(e))
    }

    pub fn wrap_write_error(&self, error: FolderToolsError) -> FolderToolsError {
        match error {
            FolderToolsError::Io(e) => self.write_error(e),
            other => other,
        }
    }

    fn write_error(&self, source: std::io::Error) -> FolderToolsError {
        FolderToolsError::OutputWrite {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Summary of one run, printed at the end and serialized in JSON mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub tool: String,
    pub root: PathBuf,
    pub output_file: Option<PathBuf>,
    pub directories: usize,
    pub files: usize,
    pub bytes_written: u64,
    pub duration: Duration,
    pub skipped: Vec<SkippedEntry>,
    pub generated_at: DateTime<Utc>,
}

impl RunReport {
    pub fn from_extraction(root: &Path, output: Option<&Path>, progress: &ExtractionProgress) -> Self {
        Self {
            tool: Tool::Contents.name().to_string(),
            root: root.to_path_buf(),
            output_file: output.map(Path::to_path_buf),
            directories: progress.directories_visited,
            files: progress.files_processed,
            bytes_written: progress.bytes_processed,
            duration: progress.elapsed(),
            skipped: progress.skipped.clone(),
            generated_at: Utc::now(),
        }
    }

    pub fn from_tree(root: &Path, output: Option<&Path>, stats: &TreeStats) -> Self {
        Self {
            tool: Tool::Tree.name().to_string(),
            root: root.to_path_buf(),
            output_file: output.map(Path::to_path_buf),
            directories: stats.directories,
            files: stats.files,
            bytes_written: stats.bytes_written,
            duration: stats.elapsed(),
            skipped: stats.skipped.clone(),
            generated_at: Utc::now(),
        }
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
