//! The filesystem facade that tool calls operate on.

use tracing::{debug, warn};

use super::error::{FsError, FsResult};
use super::glob::{FileFilter, GlobPattern};
use super::grep::{self, GrepOptions};
use super::info::{FileContent, GrepMatch, Info, WriteMode};
use super::path;
use super::tree::Tree;
use crate::config::FsConfig;

/// An in-memory filesystem owned by one agent session.
///
/// Every operation runs synchronously against the current tree. Relative
/// paths are resolved against the working directory, which starts at `/`.
///
/// # Example
///
/// ```rust
/// use burrow::{GrepOptions, VirtualFs, WriteMode};
///
/// let mut fs = VirtualFs::new();
/// fs.write("/artifacts/plan.md", Some("# Plan\n- step one"), WriteMode::Overwrite)?;
///
/// let hits = fs.grep("step", "/artifacts", &GrepOptions::default())?;
/// assert_eq!(hits[0].line_number, 1);
/// # Ok::<(), burrow::FsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct VirtualFs {
    tree: Tree,
    cwd: String,
}

impl Default for VirtualFs {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFs {
    /// Create a filesystem with the default `/memories` and `/artifacts`
    /// directories.
    pub fn new() -> Self {
        let mut fs = Self::empty();
        fs.create_initial_dirs(&FsConfig::default().initial_dirs);
        fs
    }

    /// Create a filesystem holding only the root directory.
    pub fn empty() -> Self {
        Self {
            tree: Tree::new(),
            cwd: path::ROOT.to_string(),
        }
    }

    /// Create a filesystem from a config.
    ///
    /// Fails if the configured working directory is not a directory once the
    /// initial directories exist.
    pub fn with_config(config: &FsConfig) -> FsResult<Self> {
        let mut fs = Self::empty();
        fs.create_initial_dirs(&config.initial_dirs);
        fs.cd(&config.cwd)?;
        Ok(fs)
    }

    fn create_initial_dirs(&mut self, dirs: &[String]) {
        for dir in dirs {
            let resolved = self.resolve(dir);
            match self.tree.create_dir_all(&resolved) {
                Ok(()) | Err(FsError::AlreadyExists(_)) => {}
                Err(e) => warn!("Failed to create initial directory {}: {}", resolved, e),
            }
        }
    }

    /// Current working directory.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Change the working directory. The target must be an existing directory.
    pub fn cd(&mut self, path: &str) -> FsResult<Info> {
        let resolved = self.resolve(path);
        let info = self.info(&resolved)?;
        if !info.is_dir() {
            return Err(FsError::NotADirectory(resolved));
        }
        debug!(cwd = %resolved, "changed working directory");
        self.cwd = resolved;
        Ok(info)
    }

    /// Resolve a path against the working directory. Purely lexical.
    pub fn resolve(&self, path: &str) -> String {
        path::resolve(&self.cwd, path)
    }

    /// Whether a node exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.tree.exists(&self.resolve(path))
    }

    /// Metadata for the node at `path`.
    pub fn info(&self, path: &str) -> FsResult<Info> {
        let resolved = self.resolve(path);
        Ok(self.tree.get(&resolved)?.info(&resolved))
    }

    /// Metadata for each direct child of the directory at `path`, by name.
    #[doc(alias = "list")]
    pub fn ls(&self, path: &str) -> FsResult<Vec<Info>> {
        let resolved = self.resolve(path);
        let children = self.tree.children(&resolved)?;
        Ok(children
            .iter()
            .map(|(name, child)| child.info(&path::join(&resolved, name)))
            .collect())
    }

    /// Write to a file, creating it empty first if it does not exist.
    ///
    /// With `content` of `None` only the existence of the file is ensured.
    /// The parent directory must already exist.
    pub fn write(&mut self, path: &str, content: Option<&str>, mode: WriteMode) -> FsResult<Info> {
        let resolved = self.resolve(path);
        if self.tree.ensure_file(&resolved)? {
            debug!(path = %resolved, "created file");
        }
        if let Some(content) = content {
            let file = self.tree.file_mut(&resolved)?;
            match mode {
                WriteMode::Overwrite => {
                    file.clear();
                    file.push_str(content);
                }
                WriteMode::Append => file.push_str(content),
            }
            debug!(path = %resolved, ?mode, bytes = content.len(), "wrote file");
        }
        self.info(&resolved)
    }

    /// Create a directory along with any missing ancestors.
    pub fn mkdir(&mut self, path: &str) -> FsResult<Info> {
        let resolved = self.resolve(path);
        self.tree.create_dir_all(&resolved)?;
        debug!(path = %resolved, "created directory");
        self.info(&resolved)
    }

    /// Read a window of lines from a file.
    ///
    /// `start` defaults to 0 and is clamped to be non-negative. `end` defaults
    /// to the line count, is capped at the line count and then raised to at
    /// least `start + 1`, in that order. Line indices are 0-based and `end` is
    /// exclusive.
    pub fn read(&self, path: &str, start: Option<i64>, end: Option<i64>) -> FsResult<FileContent> {
        let resolved = self.resolve(path);
        let content = self.tree.file(&resolved)?;
        let lines: Vec<&str> = content.split('\n').collect();
        let total = lines.len() as i64;

        let start = start.unwrap_or(0).max(0);
        let end = end.unwrap_or(total).min(total).max(start.saturating_add(1));

        let first = start.min(total) as usize;
        let last = end.min(total) as usize;
        Ok(FileContent {
            info: self.info(&resolved)?,
            start: start as usize,
            end: end as usize,
            content: lines[first..last].join("\n"),
        })
    }

    /// Find nodes whose path matches a glob pattern.
    ///
    /// When the pattern contains a `/`, everything before the last `/` is
    /// resolved as a path and the final segment is kept as written. Results
    /// are sorted by path.
    pub fn glob(&self, pattern: &str) -> FsResult<Vec<Info>> {
        let full = if pattern.contains('/') {
            let (dir, wildcard) = path::split(pattern);
            path::join(&self.resolve(dir), wildcard)
        } else {
            self.resolve(pattern)
        };
        let matches = GlobPattern::new(&full)?.matches(self.tree.get(path::ROOT)?);
        debug!(pattern = %full, count = matches.len(), "glob");
        Ok(matches)
    }

    /// Search file contents for a regex, one record per match.
    ///
    /// `path` may be a file, in which case `file_name_pattern` is ignored, or
    /// a directory, which is searched recursively in path order.
    /// An empty `file_name_pattern` list filters nothing.
    pub fn grep(&self, pattern: &str, path: &str, options: &GrepOptions) -> FsResult<Vec<GrepMatch>> {
        let regex = grep::compile(pattern, options.ignore_case)?;
        let resolved = self.resolve(path);
        let info = self.info(&resolved)?;

        let mut files = self.tree.files_under(&resolved)?;
        if info.is_dir()
            && let Some(patterns) = &options.file_name_pattern
            && !patterns.is_empty()
        {
            let filter = FileFilter::new(patterns.as_slice())?;
            files.retain(|(file_path, _)| filter.matches(file_path));
        }

        let mut results = Vec::new();
        for (file_path, content) in &files {
            grep::search_content(file_path, content, &regex, options, &mut results);
        }
        debug!(
            pattern,
            path = %resolved,
            files = files.len(),
            matches = results.len(),
            "grep"
        );
        Ok(results)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::vfs::info::NodeType;

    #[test]
    fn test_new_has_convention_dirs() {
        let fs = VirtualFs::new();
        let names: Vec<String> = fs.ls("/").unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["artifacts", "memories"]);
    }

    #[test]
    fn test_info_root() {
        let fs = VirtualFs::new();
        let info = fs.info("/").unwrap();
        assert_eq!(info.name, "");
        assert_eq!(info.path, "/");
        assert_eq!(info.node_type, NodeType::Directory);
    }

    #[test]
    fn test_relative_paths_use_cwd() {
        let mut fs = VirtualFs::new();
        fs.cd("/artifacts").unwrap();
        fs.write("note.md", Some("hi"), WriteMode::Overwrite).unwrap();
        assert!(fs.exists("/artifacts/note.md"));
        assert_eq!(fs.info("../artifacts/note.md").unwrap().path, "/artifacts/note.md");
    }

    #[test]
    fn test_cd_requires_directory() {
        let mut fs = VirtualFs::new();
        fs.write("/a.txt", None, WriteMode::Overwrite).unwrap();
        assert!(matches!(fs.cd("/a.txt"), Err(FsError::NotADirectory(_))));
        assert!(matches!(fs.cd("/nope"), Err(FsError::NotFound(_))));
        assert_eq!(fs.cwd(), "/");
    }

    #[test]
    fn test_with_config_bad_cwd() {
        let config = FsConfig {
            cwd: "/missing".into(),
            ..Default::default()
        };
        assert!(matches!(
            VirtualFs::with_config(&config),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn test_with_config_nested_dirs() {
        let config = FsConfig {
            initial_dirs: vec!["/work/a".into(), "/work".into()],
            cwd: "/work".into(),
        };
        let fs = VirtualFs::with_config(&config).unwrap();
        assert_eq!(fs.cwd(), "/work");
        assert!(fs.info("/work/a").unwrap().is_dir());
    }

    #[test]
    fn test_write_to_directory_fails() {
        let mut fs = VirtualFs::new();
        assert!(matches!(
            fs.write("/memories", Some("x"), WriteMode::Overwrite),
            Err(FsError::NotAFile(_))
        ));
    }

    #[test]
    fn test_read_start_past_end_returns_empty_window() {
        let mut fs = VirtualFs::new();
        fs.write("/f.txt", Some("a\nb"), WriteMode::Overwrite).unwrap();
        let out = fs.read("/f.txt", Some(5), None).unwrap();
        assert_eq!(out.start, 5);
        assert_eq!(out.end, 6);
        assert_eq!(out.content, "");
    }

    #[test]
    fn test_read_end_before_start_is_raised() {
        let mut fs = VirtualFs::new();
        fs.write("/f.txt", Some("a\nb\nc"), WriteMode::Overwrite).unwrap();
        let out = fs.read("/f.txt", Some(1), Some(0)).unwrap();
        assert_eq!(out.end, 2);
        assert_eq!(out.content, "b");
    }

    #[test]
    fn test_read_huge_start_saturates() {
        let mut fs = VirtualFs::new();
        fs.write("/f.txt", Some("a\nb"), WriteMode::Overwrite).unwrap();
        let out = fs.read("/f.txt", Some(i64::MAX), None).unwrap();
        assert_eq!(out.start, i64::MAX as usize);
        assert_eq!(out.end, i64::MAX as usize);
        assert_eq!(out.content, "");
    }

    #[test]
    fn test_glob_relative_to_cwd() {
        let mut fs = VirtualFs::new();
        fs.write("/artifacts/a.md", None, WriteMode::Overwrite).unwrap();
        fs.cd("/artifacts").unwrap();
        let found = fs.glob("*.md").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, "/artifacts/a.md");
    }

    #[test]
    fn test_grep_missing_path() {
        let fs = VirtualFs::new();
        assert!(matches!(
            fs.grep("x", "/missing", &GrepOptions::default()),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn test_grep_invalid_pattern() {
        let fs = VirtualFs::new();
        assert!(matches!(
            fs.grep("(", "/", &GrepOptions::default()),
            Err(FsError::InvalidPattern(_))
        ));
    }
}
