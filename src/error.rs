use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolderToolsError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Root directory not found: {path}")]
    RootNotFound { path: String },

    #[error("Root is not a directory: {path}")]
    RootNotDirectory { path: String },

    #[error("Failed to read directory {path}: {message}")]
    Walk { path: String, message: String },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid exclusion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for FolderToolsError {
    fn user_message(&self) -> String {
        match self {
            FolderToolsError::RootNotFound { path } => {
                format!("Root directory does not exist: {}", path)
            }
            FolderToolsError::RootNotDirectory { path } => {
                format!("Root path is not a directory: {}", path)
            }
            FolderToolsError::OutputWrite { path, source } => {
                format!("Could not write output file {}: {}", path, source)
            }
            FolderToolsError::Walk { path, message } => {
                format!("Could not read directory {}: {}", path, message)
            }
            FolderToolsError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            FolderToolsError::InvalidPattern { pattern, message } => {
                format!("Invalid exclusion pattern '{}': {}", pattern, message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            FolderToolsError::RootNotFound { .. } | FolderToolsError::RootNotDirectory { .. } => Some(
                "Pass an existing directory as the first argument, or run the tool from inside the directory you want to walk.".to_string()
            ),
            FolderToolsError::OutputWrite { .. } => Some(
                "Ensure the output location is writable, or choose a different file with --output.".to_string()
            ),
            FolderToolsError::Walk { .. } => Some(
                "Check the directory permissions, or exclude the directory with --exclude-dir.".to_string()
            ),
            FolderToolsError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            FolderToolsError::InvalidPattern { .. } => Some(
                "Exclusion patterns are regular expressions matched against file names (e.g. '.*\\.log').".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for FolderToolsError {
    fn from(error: toml::de::Error) -> Self {
        FolderToolsError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolderToolsError>;
