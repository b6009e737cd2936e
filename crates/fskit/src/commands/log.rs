//! Log command implementation

use anyhow::Result;
use fskit_core::{ConfigFile, Error, LoggerOptions};
use fskit_logs::RotatingLogger;
use std::path::Path;
use tracing::{debug, info};

use crate::cli::LogArgs;

pub fn execute(args: LogArgs) -> Result<()> {
    let mut logger = RotatingLogger::new();
    if let Some(defaults) = load_defaults(args.config.as_deref())? {
        logger.configure(defaults, false);
    }

    let options = LoggerOptions {
        path: None,
        max_size: args.max_size,
        rotation: args.rotation,
        file_mode: args.file_mode,
    };

    let mut message = args.message;
    if !message.ends_with('\n') {
        message.push('\n');
    }

    logger.log(&message, args.path.as_deref(), &options)?;
    info!("Appended {} byte(s)", message.len());

    Ok(())
}

/// Logger defaults from `--config`, or from an fskit.* file in the current directory
fn load_defaults(config: Option<&Path>) -> Result<Option<LoggerOptions>> {
    if let Some(path) = config {
        return Ok(Some(ConfigFile::load(path)?.logger));
    }

    let cwd = std::env::current_dir()?;
    match ConfigFile::find_and_load(&cwd) {
        Ok((config, path)) => {
            debug!("Loaded logger defaults from {}", path.display());
            Ok(Some(config.logger))
        }
        Err(Error::ConfigNotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
