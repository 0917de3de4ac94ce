use crate::config::ExclusionConfig;
use crate::error::{FolderToolsError, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Deny-list consulted during a walk. Names match exactly; patterns are
/// matched against file names only.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    dirs: BTreeSet<String>,
    files: BTreeSet<String>,
    file_patterns: Vec<Regex>,
}

impl ExclusionSet {
    pub fn new(config: &ExclusionConfig) -> Result<Self> {
        let file_patterns = config
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| FolderToolsError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dirs: config.dirs.iter().cloned().collect(),
            files: config.files.iter().cloned().collect(),
            file_patterns,
        })
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.files.contains(name) || self.file_patterns.iter().any(|p| p.is_match(name))
    }
}

#[cfg(test)]
impl ExclusionSet {
    pub(crate) fn from_names<D, F>(dirs: D, files: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            files: files.into_iter().map(Into::into).collect(),
            file_patterns: Vec::new(),
        }
    }
}
