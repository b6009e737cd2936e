//! fskit Tree - Recursive walking, removal and search over directory trees
//!
//! ```no_run
//! use fskit_tree::{DirectoryToolkit, SearchSpec};
//!
//! # fn main() -> fskit_tree::Result<()> {
//! let toolkit = DirectoryToolkit::new();
//!
//! // Every directory below /path/to/dir, dot-directories included
//! let dirs = toolkit.search(&SearchSpec::new("/path/to/dir").recurse(["*", ".*"]))?;
//!
//! // Files containing "needle", reported as they are found
//! let spec = SearchSpec::new("/path/to/dir")
//!     .files(["*", ".*"])
//!     .recurse(["*", ".*"])
//!     .needle("needle")?;
//! toolkit.search_with(&spec, |path, args| {
//!     println!("{} (searched {})", path.display(), args.get("path").unwrap_or_default());
//!     Ok(())
//! })?;
//! # let _ = dirs;
//! # Ok(())
//! # }
//! ```

mod args;
mod needle;
mod search;
mod walk;

pub use args::VisitorArgs;
pub use fskit_core::{Entry, Error, ListFlags, Result};
pub use needle::Needle;
pub use search::SearchSpec;

use fskit_core::{LocalStorage, Storage};
use std::path::{Path, PathBuf};

/// Walks, removes and searches directory trees through a [`Storage`]
///
/// Calls assume nothing else mutates the tree while they run.
#[derive(Debug, Clone, Default)]
pub struct DirectoryToolkit<S: Storage = LocalStorage> {
    storage: S,
}

impl DirectoryToolkit<LocalStorage> {
    pub fn new() -> Self {
        Self::with_storage(LocalStorage)
    }
}

impl<S: Storage> DirectoryToolkit<S> {
    pub fn with_storage(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

/// Walk `path` child-first on the local file system
pub fn walk<F>(path: &Path, visitor: F) -> Result<()>
where
    F: FnMut(&Entry, usize, &VisitorArgs) -> Result<()>,
{
    DirectoryToolkit::new().walk(path, visitor)
}

/// Remove a directory tree on the local file system
pub fn remove_dir(path: &Path) -> Result<()> {
    DirectoryToolkit::new().remove_dir(path)
}

/// Search the local file system
pub fn search(spec: &SearchSpec) -> Result<Vec<PathBuf>> {
    DirectoryToolkit::new().search(spec)
}

/// Search the local file system, streaming matched files to `visitor`
pub fn search_with<F>(spec: &SearchSpec, visitor: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path, &VisitorArgs) -> Result<()>,
{
    DirectoryToolkit::new().search_with(spec, visitor)
}
