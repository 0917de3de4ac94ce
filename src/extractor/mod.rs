pub mod contents;
pub mod output_manager;
pub mod tree;

pub use contents::{ContentExtractor, ExtractionProgress};
pub use output_manager::{OutputManager, RunReport};
pub use tree::{TreePrinter, TreeStats};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A file or directory left out of the output because it could not be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

impl SkippedEntry {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not read {}: {}", self.path.display(), self.reason)
    }
}

/// Reported while a walk is in flight.
#[derive(Debug)]
pub enum WalkEvent<'a> {
    Directory(&'a Path),
    File(&'a Path),
    Skipped(&'a SkippedEntry),
}

pub type EventCallback<'a> = &'a dyn Fn(&WalkEvent<'_>);

fn emit(callback: Option<EventCallback<'_>>, event: WalkEvent<'_>) {
    if let Some(callback) = callback {
        callback(&event);
    }
}
