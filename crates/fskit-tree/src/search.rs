//! Pattern and content search over a directory tree

use fskit_core::{join_pattern, ListFlags, Result, Storage};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{DirectoryToolkit, Needle, VisitorArgs};

/// Parameters of one search
#[derive(Debug, Clone, Default)]
pub struct SearchSpec {
    root: PathBuf,
    flags: ListFlags,
    file_patterns: Vec<String>,
    dir_patterns: Vec<String>,
    needle: Option<Needle>,
    args: VisitorArgs,
}

impl SearchSpec {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Glob flags for the file patterns; recurse patterns always use plain `ONLY_DIR`
    pub fn flags(mut self, flags: ListFlags) -> Self {
        self.flags = flags;
        self
    }

    /// File name patterns, matched in order
    pub fn files<I, T>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.file_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Subdirectory name patterns to descend into
    pub fn recurse<I, T>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.dir_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Content filter; a leading `/` makes it a `/pattern/flags` regex
    pub fn needle(mut self, needle: &str) -> Result<Self> {
        self.needle = Some(Needle::parse(needle)?);
        Ok(self)
    }

    /// Extra argument passed through to the visitor
    pub fn arg<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.args.insert(key, value);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn needle_ref(&self) -> Option<&Needle> {
        self.needle.as_ref()
    }

    /// Visitor arguments with `path` and `needle` filled in where the caller left them unset
    fn effective_args(&self) -> VisitorArgs {
        let mut args = self.args.clone();
        args.or_insert("path", self.root.to_string_lossy());
        if let Some(needle) = &self.needle {
            args.or_insert("needle", needle.as_str());
        }
        args
    }
}

impl<S: Storage> DirectoryToolkit<S> {
    /// Run a search and return every matched path
    ///
    /// A missing or empty root yields an empty result.
    pub fn search(&self, spec: &SearchSpec) -> Result<Vec<PathBuf>> {
        self.search_with(spec, |_, _| Ok(()))
    }

    /// Run a search, also calling `visitor` for every matched file
    ///
    /// Directories are reported in the result only when no needle is set and
    /// are never passed to the visitor.
    pub fn search_with<F>(&self, spec: &SearchSpec, mut visitor: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path, &VisitorArgs) -> Result<()>,
    {
        let args = spec.effective_args();
        self.search_dir(&spec.root, spec, &args, &mut visitor)
    }

    fn search_dir<F>(
        &self,
        dir: &Path,
        spec: &SearchSpec,
        args: &VisitorArgs,
        visitor: &mut F,
    ) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path, &VisitorArgs) -> Result<()>,
    {
        let mut found = Vec::new();
        if dir.as_os_str().is_empty() {
            return Ok(found);
        }

        for pattern in &spec.file_patterns {
            let files = self
                .storage
                .expand_glob(&join_pattern(dir, pattern), spec.flags)?
                .into_iter()
                .filter(|p| !self.storage.is_dir(p));

            let mut matched = Vec::new();
            for path in files {
                if let Some(needle) = &spec.needle {
                    if !needle.is_match(&self.storage.read(&path)?) {
                        continue;
                    }
                }
                matched.push(path);
            }

            for path in &matched {
                visitor(path.as_path(), args)?;
            }
            found.extend(matched);
        }

        let mut subdirs = Vec::new();
        for pattern in &spec.dir_patterns {
            subdirs.extend(
                self.storage
                    .expand_glob(&join_pattern(dir, pattern), ListFlags::ONLY_DIR)?
                    .into_iter()
                    .filter(|p| !is_dot_entry(p)),
            );
        }
        debug!("{}: {} match(es), {} subdirectories", dir.display(), found.len(), subdirs.len());

        if spec.needle.is_none() {
            found.extend(subdirs.iter().cloned());
        }
        for subdir in &subdirs {
            found.extend(self.search_dir(subdir, spec, args, visitor)?);
        }

        Ok(found)
    }
}

/// True for paths whose last component is `.` or `..`
fn is_dot_entry(path: &Path) -> bool {
    let path = path.to_string_lossy();
    let name = path.rsplit(std::path::is_separator).next().unwrap_or(&path);
    name == "." || name == ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_dir_structure;
    use tempfile::TempDir;

    fn relative(root: &Path, paths: Vec<PathBuf>) -> Vec<String> {
        let mut paths: Vec<String> = paths
            .iter()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace(std::path::MAIN_SEPARATOR, "/")
            })
            .collect();
        paths.sort();
        paths
    }

    fn search(fixture: &TempDir, spec: SearchSpec) -> Vec<String> {
        let paths = DirectoryToolkit::new().search(&spec).unwrap();
        relative(fixture.path(), paths)
    }

    const EVERYTHING: &[&str] = &[
        "dir1",
        "dir1/dir11",
        "dir1/dir11/dir111",
        "dir1/dir11/dir111/deepFile",
        "dir2",
        "dir2/dir22",
        "dir3",
        "file",
    ];

    #[test]
    fn test_empty_root() {
        let paths = DirectoryToolkit::new().search(&SearchSpec::new("")).unwrap();
        assert!(paths.is_empty());

        let paths = DirectoryToolkit::new()
            .search(&SearchSpec::new("").files(["*"]).recurse(["*"]))
            .unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn test_missing_root() {
        let spec = SearchSpec::new("/nonexistent/fskit/search").files(["*"]).recurse(["*"]);
        assert!(DirectoryToolkit::new().search(&spec).unwrap().is_empty());
    }

    #[test]
    fn test_files_only_at_top_level() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path()).files(["*"]);
        assert_eq!(search(&fixture, spec), vec!["file"]);
    }

    #[test]
    fn test_only_dir_flag_filters_files_stage() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path()).flags(ListFlags::ONLY_DIR).files(["*"]);
        assert!(search(&fixture, spec).is_empty());
    }

    #[test]
    fn test_recursive_search() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path()).files(["*"]).recurse(["*"]);
        assert_eq!(search(&fixture, spec), EVERYTHING);
    }

    #[test]
    fn test_recursive_search_with_dot_patterns() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path())
            .files(["*", ".*"])
            .recurse(["*", ".*"]);
        assert_eq!(search(&fixture, spec), EVERYTHING);
    }

    #[test]
    fn test_recurse_patterns_ignore_list_flags() {
        let fixture = TempDir::new().unwrap();
        std::fs::create_dir_all(fixture.path().join(".hidden").join("inner")).unwrap();
        std::fs::create_dir_all(fixture.path().join("Dir")).unwrap();
        std::fs::write(fixture.path().join("Dir").join("f"), "x").unwrap();

        let spec = SearchSpec::new(fixture.path())
            .flags(ListFlags::DOT_MATCH)
            .recurse(["*"]);
        assert_eq!(search(&fixture, spec), vec!["Dir"]);

        let spec = SearchSpec::new(fixture.path())
            .flags(ListFlags::NO_CASE)
            .recurse(["d*"]);
        assert!(search(&fixture, spec).is_empty());

        // file patterns still honour the flags
        let spec = SearchSpec::new(fixture.path())
            .flags(ListFlags::DOT_MATCH)
            .files(["*"])
            .recurse(["*"]);
        assert_eq!(search(&fixture, spec), vec!["Dir", "Dir/f"]);
    }

    #[test]
    fn test_narrow_patterns() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path()).files(["d*"]).recurse(["dir1*"]);
        assert_eq!(
            search(&fixture, spec),
            vec!["dir1", "dir1/dir11", "dir1/dir11/dir111", "dir1/dir11/dir111/deepFile"]
        );
    }

    #[test]
    fn test_regex_needle() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path())
            .files(["*"])
            .recurse(["*"])
            .needle("/cont/i")
            .unwrap();
        assert_eq!(search(&fixture, spec), vec!["dir1/dir11/dir111/deepFile", "file"]);
    }

    #[test]
    fn test_literal_needle() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path())
            .files(["*"])
            .recurse(["*"])
            .needle("CONT")
            .unwrap();
        assert_eq!(search(&fixture, spec), vec!["file"]);
    }

    #[test]
    fn test_overlapping_patterns_are_not_deduplicated() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path()).files(["*", "f*"]);
        assert_eq!(search(&fixture, spec), vec!["file", "file"]);
    }

    #[test]
    fn test_searching_callback() {
        let fixture = create_dir_structure();
        let toolkit = DirectoryToolkit::new();
        let mut results = Vec::new();

        for needle in ["CONT", "/cont/i", "notFound"] {
            let spec = SearchSpec::new(fixture.path())
                .files(["*"])
                .recurse(["*"])
                .needle(needle)
                .unwrap();
            toolkit
                .search_with(&spec, |path, args| {
                    let path = path.strip_prefix(fixture.path()).unwrap();
                    results.push((
                        path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/"),
                        args.get("needle").unwrap().to_string(),
                    ));
                    Ok(())
                })
                .unwrap();
        }

        let expected: Vec<(String, String)> = [
            ("file", "CONT"),
            ("file", "/cont/i"),
            ("dir1/dir11/dir111/deepFile", "/cont/i"),
        ]
        .iter()
        .map(|(p, n)| (p.to_string(), n.to_string()))
        .collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_visitor_sees_root_path_and_custom_args() {
        let fixture = create_dir_structure();
        let root = fixture.path().to_string_lossy().into_owned();
        let spec = SearchSpec::new(fixture.path())
            .files(["*"])
            .recurse(["*"])
            .arg("tag", "mine");
        let mut seen = Vec::new();

        let found = DirectoryToolkit::new()
            .search_with(&spec, |path, args| {
                assert_eq!(args.get("path"), Some(root.as_str()));
                assert_eq!(args.get("tag"), Some("mine"));
                assert_eq!(args.get("needle"), None);
                seen.push(path.to_path_buf());
                Ok(())
            })
            .unwrap();

        // directories are found but not visited
        assert_eq!(seen.len(), 2);
        assert_eq!(found.len(), EVERYTHING.len());
    }

    #[test]
    fn test_caller_args_win() {
        let spec = SearchSpec::new("/root/dir").arg("path", "custom").needle("x").unwrap();
        let args = spec.effective_args();
        assert_eq!(args.get("path"), Some("custom"));
        assert_eq!(args.get("needle"), Some("x"));
    }

    #[test]
    fn test_visitor_error_propagates() {
        let fixture = create_dir_structure();
        let spec = SearchSpec::new(fixture.path()).files(["*"]);

        let result = DirectoryToolkit::new()
            .search_with(&spec, |_, _| Err(fskit_core::Error::needle("abort")));
        assert!(result.is_err());
    }

    #[test]
    fn test_is_dot_entry() {
        assert!(is_dot_entry(Path::new("/tmp/dir/.")));
        assert!(is_dot_entry(Path::new("/tmp/dir/..")));
        assert!(is_dot_entry(Path::new("..")));
        assert!(!is_dot_entry(Path::new("/tmp/dir/.hidden")));
        assert!(!is_dot_entry(Path::new("/tmp/dir")));
    }
}
