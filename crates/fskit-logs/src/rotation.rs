//! Rotation of log generations

use fskit_core::{Result, Storage};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the path for a rotated log generation
pub fn rotated_path(base: &Path, index: u32) -> PathBuf {
    let mut name = base.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}", index));
    base.with_file_name(name)
}

/// Shift generations up by one and move the live file to `.1`
///
/// `.{generations}` is dropped first. With `generations == 0` the live file
/// is simply deleted. A destination that does not exist yet is skipped.
pub fn rotate<S: Storage + ?Sized>(storage: &S, path: &Path, generations: u32) -> Result<()> {
    debug!("Rotating log file: {} ({} generation(s))", path.display(), generations);

    for i in (1..=generations).rev() {
        let dest = rotated_path(path, i);
        if storage.exists(&dest) {
            storage.remove_file(&dest)?;
        }

        let source = if i > 1 {
            rotated_path(path, i - 1)
        } else {
            path.to_path_buf()
        };
        if storage.exists(&source) {
            storage.rename(&source, &dest)?;
        }
    }

    if storage.exists(path) {
        storage.remove_file(path)?;
    }

    Ok(())
}

/// Existing rotated generations of `path`, newest first, up to the first gap
pub fn generations<S: Storage + ?Sized>(storage: &S, path: &Path) -> Vec<PathBuf> {
    (1..)
        .map(|i| rotated_path(path, i))
        .take_while(|p| storage.exists(p))
        .collect()
}
