use crate::error::{FolderToolsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONTENTS_OUTPUT_FILE: &str = "extracted_contents.txt";
pub const TREE_OUTPUT_FILE: &str = "folder_tree.txt";

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["foldertools.toml", ".foldertools.toml"];

/// Which of the two utilities a setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Contents,
    Tree,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Contents => "folder-contents",
            Tool::Tree => "folder-tree",
        }
    }
}

/// Resolved settings for both utilities. Any table or key missing from a
/// config file keeps its built-in default.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(from = "ConfigFile")]
pub struct Config {
    pub contents: ToolConfig,
    pub tree: ToolConfig,
    pub walk: WalkConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolConfig {
    pub output_file: PathBuf,
    pub exclusions: ExclusionConfig,
}

/// Names pruned from the walk (`dirs`) or dropped from the output (`files`).
/// `patterns` are regular expressions matched against file names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExclusionConfig {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WalkConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// On-disk shape of the config file: every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    contents: ToolConfigFile,
    tree: ToolConfigFile,
    walk: WalkConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToolConfigFile {
    output_file: Option<PathBuf>,
    exclusions: ExclusionConfigFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ExclusionConfigFile {
    dirs: Option<Vec<String>>,
    files: Option<Vec<String>>,
    patterns: Option<Vec<String>>,
}

impl ToolConfigFile {
    /// A key that is present replaces the default list or value outright.
    fn apply_to(self, mut base: ToolConfig) -> ToolConfig {
        if let Some(output_file) = self.output_file {
            base.output_file = output_file;
        }
        if let Some(dirs) = self.exclusions.dirs {
            base.exclusions.dirs = dirs;
        }
        if let Some(files) = self.exclusions.files {
            base.exclusions.files = files;
        }
        if let Some(patterns) = self.exclusions.patterns {
            base.exclusions.patterns = patterns;
        }
        base
    }
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            contents: file.contents.apply_to(ToolConfig::contents_default()),
            tree: file.tree.apply_to(ToolConfig::tree_default()),
            walk: file.walk,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contents: ToolConfig::contents_default(),
            tree: ToolConfig::tree_default(),
            walk: WalkConfig::default(),
        }
    }
}

impl ToolConfig {
    pub fn contents_default() -> Self {
        Self {
            output_file: PathBuf::from(CONTENTS_OUTPUT_FILE),
            exclusions: ExclusionConfig {
                dirs: default_excluded_dirs(),
                files: to_strings(&[
                    ".gitignore",
                    "package-lock.json",
                    "postcss.config.js",
                    "tailwind.config.js",
                    "tsconfig.app.json",
                    "tsconfig.json",
                    "folderContents.py",
                    "folderStructure.py",
                    TREE_OUTPUT_FILE,
                    CONTENTS_OUTPUT_FILE,
                ]),
                patterns: Vec::new(),
            },
        }
    }

    pub fn tree_default() -> Self {
        Self {
            output_file: PathBuf::from(TREE_OUTPUT_FILE),
            exclusions: ExclusionConfig {
                dirs: default_excluded_dirs(),
                files: to_strings(&[
                    ".gitignore",
                    ".env",
                    "package-lock.json",
                    "postcss.config.js",
                    "tailwind.config.js",
                    "tsconfig.app.json",
                    "tsconfig.json",
                    "tsconfig.node.json",
                    "vite.config.ts",
                    "eslint.config.js",
                    "index.html",
                ]),
                patterns: Vec::new(),
            },
        }
    }
}

fn default_excluded_dirs() -> Vec<String> {
    to_strings(&["node_modules", ".git"])
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn tool(&self, tool: Tool) -> &ToolConfig {
        match tool {
            Tool::Contents => &self.contents,
            Tool::Tree => &self.tree,
        }
    }

    fn tool_mut(&mut self, tool: Tool) -> &mut ToolConfig {
        match tool {
            Tool::Contents => &mut self.contents,
            Tool::Tree => &mut self.tree,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FolderToolsError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FolderToolsError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| FolderToolsError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in &DEFAULT_CONFIG_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, tool: Tool, cli_args: &CliOverrides) {
        if let Some(max_depth) = cli_args.max_depth {
            self.walk.max_depth = Some(max_depth);
        }

        let target = self.tool_mut(tool);

        if cli_args.no_default_excludes {
            target.exclusions = ExclusionConfig::default();
        }

        if let Some(ref dirs) = cli_args.exclude_dirs {
            extend_unique(&mut target.exclusions.dirs, dirs);
        }

        if let Some(ref files) = cli_args.exclude_files {
            extend_unique(&mut target.exclusions.files, files);
        }

        if let Some(ref output_file) = cli_args.output_file {
            target.output_file = output_file.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| FolderToolsError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| FolderToolsError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (section, tool) in [("contents", &self.contents), ("tree", &self.tree)] {
            if tool.output_file.as_os_str().is_empty() {
                return Err(FolderToolsError::Config {
                    message: format!("[{}] output_file must not be empty", section),
                });
            }

            let names = tool.exclusions.dirs.iter().chain(&tool.exclusions.files);
            for name in names {
                if name.is_empty() || name.contains('/') || name.contains('\\') {
                    return Err(FolderToolsError::Config {
                        message: format!(
                            "[{}] exclusion entries must be plain names, got '{}'",
                            section, name
                        ),
                    });
                }
            }

            for pattern in &tool.exclusions.patterns {
                Regex::new(pattern).map_err(|e| FolderToolsError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
            }
        }

        if self.walk.max_depth == Some(0) {
            return Err(FolderToolsError::Config {
                message: "Maximum directory depth must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for name in extra {
        let name = name.trim();
        if !name.is_empty() && !target.iter().any(|n| n == name) {
            target.push(name.to_string());
        }
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_file: Option<PathBuf>,
    pub exclude_dirs: Option<Vec<String>>,
    pub exclude_files: Option<Vec<String>>,
    pub no_default_excludes: bool,
    pub max_depth: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_file(mut self, output_file: Option<PathBuf>) -> Self {
        self.output_file = output_file;
        self
    }

    pub fn with_exclude_dirs(mut self, dirs: Option<Vec<String>>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_exclude_files(mut self, files: Option<Vec<String>>) -> Self {
        self.exclude_files = files;
        self
    }

    pub fn with_no_default_excludes(mut self, no_defaults: bool) -> Self {
        self.no_default_excludes = no_defaults;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}
