//! Rmdir command implementation

use anyhow::Result;
use std::path::Path;

use crate::output::print_success;

pub fn execute(dir: &Path) -> Result<()> {
    fskit_tree::remove_dir(dir)?;
    print_success(&format!("Removed {}", dir.display()));
    Ok(())
}
