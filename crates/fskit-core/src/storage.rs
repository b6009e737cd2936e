//! File system primitives consumed by the logger and the directory toolkit

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::ops::BitOr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

/// Flags controlling glob expansion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListFlags(u32);

impl ListFlags {
    /// Return directories only
    pub const ONLY_DIR: ListFlags = ListFlags(1);
    /// Match names case-insensitively
    pub const NO_CASE: ListFlags = ListFlags(1 << 1);
    /// Let wildcards match a leading dot
    pub const DOT_MATCH: ListFlags = ListFlags(1 << 2);

    pub const fn empty() -> Self {
        ListFlags(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: ListFlags) -> bool {
        self.0 & other.0 == other.0
    }

    fn match_options(self) -> glob::MatchOptions {
        glob::MatchOptions {
            case_sensitive: !self.contains(ListFlags::NO_CASE),
            require_literal_separator: true,
            require_literal_leading_dot: !self.contains(ListFlags::DOT_MATCH),
        }
    }
}

impl BitOr for ListFlags {
    type Output = ListFlags;

    fn bitor(self, rhs: ListFlags) -> ListFlags {
        ListFlags(self.0 | rhs.0)
    }
}

/// A directory listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Path as reached from the listed directory
    pub path: PathBuf,
    /// Final component
    pub name: String,
    /// True for real directories; symlinks are not followed
    pub is_dir: bool,
    /// Canonical form, if the entry resolves
    pub canonical: Option<PathBuf>,
}

/// Storage primitives used by fskit components
///
/// Every method is a single blocking call. Implementations hold no state
/// between calls beyond what the underlying store keeps.
pub trait Storage: Send + Sync {
    /// Resolve symlinks and relative components, `None` if the path does not resolve
    fn canonicalize(&self, path: &Path) -> Option<PathBuf>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn file_size(&self, path: &Path) -> Result<u64>;

    /// List the direct children of `path`
    fn list_dir(&self, path: &Path, include_dots: bool) -> Result<Vec<Entry>>;

    /// Expand a glob pattern path; a missing base directory yields nothing
    fn expand_glob(&self, pattern: &str, flags: ListFlags) -> Result<Vec<PathBuf>>;

    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Append bytes, creating the file if absent
    fn append(&self, path: &Path, data: &[u8]) -> Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> Result<()>;

    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> Result<()>;

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}

/// Build a glob pattern rooted at a literal directory
pub fn join_pattern(dir: &Path, pattern: &str) -> String {
    let dir = glob::Pattern::escape(&dir.to_string_lossy());
    if dir.ends_with(std::path::MAIN_SEPARATOR) {
        format!("{}{}", dir, pattern)
    } else {
        format!("{}{}{}", dir, std::path::MAIN_SEPARATOR, pattern)
    }
}

/// Storage backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        fs::canonicalize(path).ok()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn list_dir(&self, path: &Path, include_dots: bool) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();

        if include_dots {
            for name in [".", ".."] {
                let entry_path = path.join(name);
                entries.push(Entry {
                    canonical: self.canonicalize(&entry_path),
                    path: entry_path,
                    name: name.to_string(),
                    is_dir: true,
                });
            }
        }

        for dir_entry in fs::read_dir(path)? {
            let dir_entry = dir_entry?;
            let entry_path = dir_entry.path();
            entries.push(Entry {
                canonical: self.canonicalize(&entry_path),
                name: dir_entry.file_name().to_string_lossy().into_owned(),
                is_dir: dir_entry.file_type()?.is_dir(),
                path: entry_path,
            });
        }

        Ok(entries)
    }

    fn expand_glob(&self, pattern: &str, flags: ListFlags) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for item in glob::glob_with(pattern, flags.match_options())? {
            match item {
                Ok(path) => {
                    if flags.contains(ListFlags::ONLY_DIR) && !path.is_dir() {
                        continue;
                    }
                    paths.push(path);
                }
                Err(e) => {
                    warn!("Skipping unreadable entry {}: {}", e.path().display(), e.error());
                }
            }
        }

        debug!("Glob {} matched {} path(s)", pattern, paths.len());
        Ok(paths)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn append(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(data)?;
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<()> {
        Ok(fs::rename(from, to)?)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        Ok(fs::remove_file(path)?)
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        Ok(fs::remove_dir(path)?)
    }

    #[cfg(unix)]
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_readonly(mode & 0o222 == 0);
        fs::set_permissions(path, permissions)?;
        Ok(())
    }
}
