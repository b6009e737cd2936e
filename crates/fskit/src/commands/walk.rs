//! Walk command implementation

use anyhow::Result;
use std::path::Path;

use crate::output::{print_entries, EntryJson};

pub fn execute(dir: &Path) -> Result<()> {
    let mut entries = Vec::new();

    fskit_tree::walk(dir, |entry, _, _| {
        entries.push(EntryJson {
            path: entry.path.display().to_string(),
            is_dir: entry.is_dir,
        });
        Ok(())
    })?;

    print_entries(&entries);
    Ok(())
}
