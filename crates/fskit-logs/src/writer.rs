//! Rotating logger

use fskit_core::{ConfigError, LocalStorage, LoggerOptions, Result, Storage};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::rotation;

/// Appends messages to a log file, rotating it once it grows past `max_size`
///
/// The logger takes no lock around the size check, rotation and append.
/// Two writers sharing a target path may interleave rotations and lose data.
pub struct RotatingLogger<S: Storage = LocalStorage> {
    storage: S,
    defaults: LoggerOptions,
}

impl RotatingLogger<LocalStorage> {
    /// Create a logger on the local file system with built-in defaults
    pub fn new() -> Self {
        Self::with_storage(LocalStorage)
    }

    /// Create a logger with `options` layered over the built-in defaults
    pub fn with_options(options: LoggerOptions) -> Self {
        let mut logger = Self::new();
        logger.configure(options, false);
        logger
    }
}

impl Default for RotatingLogger<LocalStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage> RotatingLogger<S> {
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            defaults: LoggerOptions::builtin(),
        }
    }

    /// Store default options
    ///
    /// Without `override_defaults` the options are layered over the built-in
    /// defaults. With it they replace the stored defaults entirely, and any
    /// field left unset stays unset.
    pub fn configure(&mut self, options: LoggerOptions, override_defaults: bool) {
        self.defaults = if override_defaults {
            options
        } else {
            options.or(&LoggerOptions::builtin())
        };
    }

    /// Currently stored defaults
    pub fn defaults(&self) -> &LoggerOptions {
        &self.defaults
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append `message` to the log, rotating the file first if it is oversized
    ///
    /// Precedence is `options`, then `path`, then the stored defaults. A size
    /// or rotation count that is unset after merging reads as zero.
    pub fn log(&self, message: &str, path: Option<&Path>, options: &LoggerOptions) -> Result<()> {
        let path_layer = LoggerOptions {
            path: path.map(Path::to_path_buf),
            ..LoggerOptions::default()
        };
        let effective = options.or(&path_layer).or(&self.defaults);

        let original = match effective.path {
            Some(ref p) if !p.as_os_str().is_empty() => p.as_path(),
            _ => return Err(ConfigError::MissingPath.into()),
        };
        let target = self.resolve_target(original)?;

        let max_size = effective.max_size.unwrap_or(0);
        if self.storage.exists(&target) && self.storage.file_size(&target)? > max_size {
            rotation::rotate(&self.storage, &target, effective.rotation.unwrap_or(0))?;
        }

        self.storage.append(&target, message.as_bytes())?;

        if let Some(mode) = effective.file_mode {
            debug!("Setting mode {:o} on {}", mode, target.display());
            self.storage.set_permissions(&target, mode)?;
        }

        Ok(())
    }

    /// Existing rotated generations of `path`, `.1` first
    pub fn generations(&self, path: &Path) -> Vec<PathBuf> {
        rotation::generations(&self.storage, path)
    }

    /// Canonical parent directory joined with the unresolved file name
    fn resolve_target(&self, original: &Path) -> Result<PathBuf> {
        let invalid = || ConfigError::InvalidDirectory(original.to_path_buf());

        let name = original.file_name().ok_or_else(invalid)?;
        let parent = match original.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let dir = self.storage.canonicalize(parent).ok_or_else(invalid)?;

        Ok(dir.join(name))
    }
}
