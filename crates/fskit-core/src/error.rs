//! Error types for fskit

use std::path::PathBuf;

/// Logger configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing path")]
    MissingPath,

    #[error("Invalid directory \"{}\"", .0.display())]
    InvalidDirectory(PathBuf),
}

/// fskit error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Passed path \"{}\" ({resolved}) isn't a directory", .path.display())]
    InvalidPath { path: PathBuf, resolved: String },

    #[error("Invalid needle: {0}")]
    InvalidNeedle(String),

    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Unsupported config file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for fskit
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an `InvalidPath` error from the caller's path and what it resolved to
    pub fn invalid_path<P: Into<PathBuf>>(path: P, resolved: Option<&std::path::Path>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            resolved: match resolved {
                Some(p) => format!("\"{}\"", p.display()),
                None => "unresolved".to_string(),
            },
        }
    }

    pub fn needle<S: Into<String>>(msg: S) -> Self {
        Error::InvalidNeedle(msg.into())
    }

    /// True for the logger's configuration failures
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}
