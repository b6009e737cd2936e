//! Configuration for fskit
//!
//! Logger defaults can be loaded from a configuration file in any of:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::error::{Error, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// One layer of logger options
///
/// Layers are merged field by field with [`LoggerOptions::or`]; a field left
/// as `None` falls through to the next layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerOptions {
    /// Target log file
    pub path: Option<PathBuf>,
    /// Size in bytes above which the file is rotated
    #[serde(alias = "maxSize")]
    pub max_size: Option<u64>,
    /// Number of rotated generations to keep
    pub rotation: Option<u32>,
    /// Permission bits applied after each write
    #[serde(alias = "fileMode")]
    pub file_mode: Option<u32>,
}

impl LoggerOptions {
    /// Built-in defaults
    pub fn builtin() -> Self {
        Self {
            path: None,
            max_size: Some(DEFAULT_MAX_SIZE),
            rotation: Some(DEFAULT_ROTATION),
            file_mode: None,
        }
    }

    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn rotation(mut self, rotation: u32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = Some(mode);
        self
    }

    /// Merge with a lower-precedence layer; fields set on `self` win
    pub fn or(&self, fallback: &LoggerOptions) -> LoggerOptions {
        LoggerOptions {
            path: self.path.clone().or_else(|| fallback.path.clone()),
            max_size: self.max_size.or(fallback.max_size),
            rotation: self.rotation.or(fallback.rotation),
            file_mode: self.file_mode.or(fallback.file_mode),
        }
    }
}

/// Configuration file structure (fskit.toml/yaml/json)
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub logger: LoggerOptions,
}

impl ConfigFile {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format =
            ConfigFormat::from_path(path).ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: ConfigFile = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(config)
    }

    /// Find and load the first config file present in `dir`
    pub fn find_and_load(dir: &Path) -> Result<(Self, PathBuf)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, path));
            }
        }
        Err(Error::ConfigNotFound(dir.join(CONFIG_FILES[0])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("a/fskit.yml")), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_path(Path::new("fskit.json")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("fskit.ini")), None);
    }

    #[test]
    fn test_layered_merge() {
        let call = LoggerOptions::default().max_size(10);
        let stored = LoggerOptions::default().path("/var/log/app.log").rotation(2);

        let merged = call.or(&stored).or(&LoggerOptions::builtin());
        assert_eq!(merged.path, Some(PathBuf::from("/var/log/app.log")));
        assert_eq!(merged.max_size, Some(10));
        assert_eq!(merged.rotation, Some(2));
        assert_eq!(merged.file_mode, None);
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[logger]
path = "/var/log/app.log"
max_size = 2048
rotation = 3
file_mode = 420
"#;
        let config = ConfigFile::parse(content, ConfigFormat::Toml).unwrap();
        assert_eq!(
            config.logger,
            LoggerOptions::default()
                .path("/var/log/app.log")
                .max_size(2048)
                .rotation(3)
                .file_mode(0o644)
        );
    }

    #[test]
    fn test_parse_yaml_aliases() {
        let content = "logger:\n  maxSize: 100\n  fileMode: 384\n";
        let config = ConfigFile::parse(content, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.logger.max_size, Some(100));
        assert_eq!(config.logger.file_mode, Some(0o600));
        assert_eq!(config.logger.rotation, None);
    }

    #[test]
    fn test_parse_json_without_logger() {
        let config = ConfigFile::parse("{}", ConfigFormat::Json).unwrap();
        assert_eq!(config.logger, LoggerOptions::default());
    }

    #[test]
    fn test_find_and_load() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("fskit.json"), r#"{"logger": {"rotation": 4}}"#).unwrap();

        let (config, path) = ConfigFile::find_and_load(dir.path()).unwrap();
        assert_eq!(config.logger.rotation, Some(4));
        assert!(path.ends_with("fskit.json"));
    }

    #[test]
    fn test_load_missing_and_unsupported() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            ConfigFile::find_and_load(dir.path()),
            Err(Error::ConfigNotFound(_))
        ));

        let ini = dir.path().join("fskit.ini");
        std::fs::write(&ini, "").unwrap();
        assert!(matches!(ConfigFile::load(&ini), Err(Error::UnsupportedFormat(_))));
    }
}
