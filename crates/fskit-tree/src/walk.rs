//! Child-first directory walking and recursive removal

use fskit_core::{Entry, Error, Result, Storage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{DirectoryToolkit, VisitorArgs};

impl<S: Storage> DirectoryToolkit<S> {
    /// Visit every descendant of `path`, children before their directory
    ///
    /// The listing is snapshotted before the first visitor call. Sibling
    /// order is whatever the storage lists. `args["path"]` holds `path` as
    /// passed. The first visitor error stops the walk.
    pub fn walk<F>(&self, path: &Path, mut visitor: F) -> Result<()>
    where
        F: FnMut(&Entry, usize, &VisitorArgs) -> Result<()>,
    {
        let root = match self.storage.canonicalize(path) {
            Some(real) if self.storage.is_dir(&real) => real,
            resolved => return Err(Error::invalid_path(path, resolved.as_deref())),
        };

        let mut entries = Vec::new();
        let mut seen = HashSet::from([root.clone()]);
        self.collect_child_first(&root, &mut seen, &mut entries)?;
        debug!("Walking {} entries under {}", entries.len(), root.display());

        let mut args = VisitorArgs::new();
        args.insert("path", path.to_string_lossy());

        for (index, entry) in entries.iter().enumerate() {
            visitor(entry, index, &args)?;
        }

        Ok(())
    }

    /// Remove `path` and everything below it
    ///
    /// Symlinks are unlinked, never followed. Cached metadata held by the
    /// caller about the removed tree is not refreshed.
    pub fn remove_dir(&self, path: &Path) -> Result<()> {
        self.walk(path, |entry, _, _| {
            if entry.is_dir {
                self.storage.remove_dir(&entry.path)
            } else {
                self.storage.remove_file(&entry.path)
            }
        })?;

        debug!("Removing directory {}", path.display());
        self.storage.remove_dir(path)
    }

    fn collect_child_first(
        &self,
        dir: &Path,
        seen: &mut HashSet<PathBuf>,
        out: &mut Vec<Entry>,
    ) -> Result<()> {
        for entry in self.storage.list_dir(dir, false)? {
            if entry.is_dir {
                let key = entry.canonical.clone().unwrap_or_else(|| entry.path.clone());
                if !seen.insert(key) {
                    continue;
                }
                self.collect_child_first(&entry.path, seen, out)?;
            }
            out.push(entry);
        }
        Ok(())
    }
}
