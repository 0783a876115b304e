//! Owned storage tree.
//!
//! Every directory owns its children outright, keyed by name, so a path names
//! at most one node and a node has exactly one parent. Callers pass resolved
//! paths (see [`super::path`]).

use std::collections::BTreeMap;

use super::error::{FsError, FsResult};
use super::info::{Info, NodeType};
use super::path;

/// A tree entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    /// Text content, split into lines on `\n` when read.
    File(String),
    /// Children keyed by name.
    Directory(BTreeMap<String, Node>),
}

impl Node {
    fn empty_dir() -> Self {
        Node::Directory(BTreeMap::new())
    }

    pub(crate) fn node_type(&self) -> NodeType {
        match self {
            Node::File(_) => NodeType::File,
            Node::Directory(_) => NodeType::Directory,
        }
    }

    pub(crate) fn info(&self, path: &str) -> Info {
        Info {
            name: path::file_name(path).to_string(),
            path: path.to_string(),
            node_type: self.node_type(),
        }
    }
}

/// How far an existing path reaches into the tree.
enum Lookup {
    /// The full path exists.
    Exists,
    /// The first `depth` segments are directories; the next one is missing.
    Missing { depth: usize },
    /// A file sits above the end of the path.
    ThroughFile,
}

/// The in-memory hierarchy rooted at `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tree {
    root: Node,
}

impl Default for Tree {
    fn default() -> Self {
        Self {
            root: Node::empty_dir(),
        }
    }
}

impl Tree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, path: &str) -> Lookup {
        let mut node = &self.root;
        for (depth, segment) in path::segments(path).enumerate() {
            match node {
                Node::Directory(children) => match children.get(segment) {
                    Some(child) => node = child,
                    None => return Lookup::Missing { depth },
                },
                Node::File(_) => return Lookup::ThroughFile,
            }
        }
        Lookup::Exists
    }

    /// Look up a node. Descending through a file is `NotFound`.
    pub(crate) fn get(&self, path: &str) -> FsResult<&Node> {
        let mut node = &self.root;
        for segment in path::segments(path) {
            node = match node {
                Node::Directory(children) => children
                    .get(segment)
                    .ok_or_else(|| FsError::NotFound(path.to_string()))?,
                Node::File(_) => return Err(FsError::NotFound(path.to_string())),
            };
        }
        Ok(node)
    }

    fn get_mut(&mut self, path: &str) -> FsResult<&mut Node> {
        let mut node = &mut self.root;
        for segment in path::segments(path) {
            node = match node {
                Node::Directory(children) => children
                    .get_mut(segment)
                    .ok_or_else(|| FsError::NotFound(path.to_string()))?,
                Node::File(_) => return Err(FsError::NotFound(path.to_string())),
            };
        }
        Ok(node)
    }

    pub(crate) fn exists(&self, path: &str) -> bool {
        matches!(self.lookup(path), Lookup::Exists)
    }

    /// Direct children of a directory, sorted by name.
    pub(crate) fn children(&self, path: &str) -> FsResult<&BTreeMap<String, Node>> {
        match self.get(path)? {
            Node::Directory(children) => Ok(children),
            Node::File(_) => Err(FsError::NotADirectory(path.to_string())),
        }
    }

    /// Content of a file.
    pub(crate) fn file(&self, path: &str) -> FsResult<&str> {
        match self.get(path)? {
            Node::File(content) => Ok(content.as_str()),
            Node::Directory(_) => Err(FsError::NotAFile(path.to_string())),
        }
    }

    /// Mutable content of a file.
    pub(crate) fn file_mut(&mut self, path: &str) -> FsResult<&mut String> {
        match self.get_mut(path)? {
            Node::File(content) => Ok(content),
            Node::Directory(_) => Err(FsError::NotAFile(path.to_string())),
        }
    }

    /// Create an empty file whose parent directory already exists.
    ///
    /// Returns `true` if the file was created, `false` if a file was already
    /// there.
    pub(crate) fn ensure_file(&mut self, path: &str) -> FsResult<bool> {
        let (parent, name) = path::split(path);
        if name.is_empty() {
            return Err(FsError::NotAFile(path.to_string()));
        }
        match self.lookup(parent) {
            Lookup::Exists => {}
            Lookup::ThroughFile => return Err(FsError::InvalidPath(path.to_string())),
            Lookup::Missing { .. } => return Err(FsError::NotFound(parent.to_string())),
        }
        let children = match self.get_mut(parent)? {
            Node::Directory(children) => children,
            Node::File(_) => return Err(FsError::InvalidPath(path.to_string())),
        };
        match children.get(name) {
            Some(Node::File(_)) => Ok(false),
            Some(Node::Directory(_)) => Err(FsError::NotAFile(path.to_string())),
            None => {
                children.insert(name.to_string(), Node::File(String::new()));
                Ok(true)
            }
        }
    }

    /// Create a directory and any missing ancestors.
    ///
    /// Fails without touching the tree if the path already exists or an
    /// ancestor is a file.
    pub(crate) fn create_dir_all(&mut self, path: &str) -> FsResult<()> {
        let depth = match self.lookup(path) {
            Lookup::Exists => return Err(FsError::AlreadyExists(path.to_string())),
            Lookup::ThroughFile => return Err(FsError::InvalidPath(path.to_string())),
            Lookup::Missing { depth } => depth,
        };

        let mut node = &mut self.root;
        for (idx, segment) in path::segments(path).enumerate() {
            let Node::Directory(children) = node else {
                return Err(FsError::InvalidPath(path.to_string()));
            };
            node = if idx < depth {
                children
                    .get_mut(segment)
                    .ok_or_else(|| FsError::NotFound(path.to_string()))?
            } else {
                children
                    .entry(segment.to_string())
                    .or_insert_with(Node::empty_dir)
            };
        }
        Ok(())
    }

    /// Every file at or below `path`, as `(path, content)` pairs sorted by path.
    pub(crate) fn files_under(&self, path: &str) -> FsResult<Vec<(String, &str)>> {
        let mut out = Vec::new();
        collect_files(self.get(path)?, path.to_string(), &mut out);
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }
}

fn collect_files<'a>(node: &'a Node, path: String, out: &mut Vec<(String, &'a str)>) {
    match node {
        Node::File(content) => out.push((path, content.as_str())),
        Node::Directory(children) => {
            for (name, child) in children {
                collect_files(child, path::join(&path, name), out);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree {
        let mut tree = Tree::new();
        tree.create_dir_all("/docs/notes").unwrap();
        tree.ensure_file("/docs/readme.md").unwrap();
        tree.ensure_file("/docs/notes/a.txt").unwrap();
        tree.file_mut("/docs/notes/a.txt").unwrap().push_str("alpha");
        tree
    }

    #[test]
    fn test_root_exists() {
        let tree = Tree::new();
        assert!(tree.exists("/"));
        assert_eq!(tree.get("/").unwrap().node_type(), NodeType::Directory);
    }

    #[test]
    fn test_get_missing() {
        let tree = sample_tree();
        assert!(matches!(tree.get("/nope"), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_get_through_file_is_not_found() {
        let tree = sample_tree();
        assert!(matches!(
            tree.get("/docs/readme.md/x"),
            Err(FsError::NotFound(_))
        ));
    }

    #[test]
    fn test_children_of_file_fails() {
        let tree = sample_tree();
        assert!(matches!(
            tree.children("/docs/readme.md"),
            Err(FsError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_file_of_directory_fails() {
        let tree = sample_tree();
        assert!(matches!(tree.file("/docs"), Err(FsError::NotAFile(_))));
    }

    #[test]
    fn test_ensure_file_is_idempotent() {
        let mut tree = sample_tree();
        assert!(!tree.ensure_file("/docs/notes/a.txt").unwrap());
        assert_eq!(tree.file("/docs/notes/a.txt").unwrap(), "alpha");
    }

    #[test]
    fn test_ensure_file_missing_parent() {
        let mut tree = sample_tree();
        assert!(matches!(
            tree.ensure_file("/missing/a.txt"),
            Err(FsError::NotFound(_))
        ));
        assert!(!tree.exists("/missing"));
    }

    #[test]
    fn test_ensure_file_under_file_is_invalid() {
        let mut tree = sample_tree();
        assert!(matches!(
            tree.ensure_file("/docs/readme.md/child"),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            tree.ensure_file("/docs/readme.md/deeper/child"),
            Err(FsError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_create_dir_all_existing() {
        let mut tree = sample_tree();
        assert!(matches!(
            tree.create_dir_all("/docs"),
            Err(FsError::AlreadyExists(_))
        ));
        assert!(matches!(
            tree.create_dir_all("/docs/readme.md"),
            Err(FsError::AlreadyExists(_))
        ));
        assert!(matches!(
            tree.create_dir_all("/"),
            Err(FsError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_create_dir_all_under_file_leaves_tree_unchanged() {
        let mut tree = sample_tree();
        let before = tree.clone();
        assert!(matches!(
            tree.create_dir_all("/docs/readme.md/x/y"),
            Err(FsError::InvalidPath(_))
        ));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_files_under_sorted_by_path() {
        let mut tree = Tree::new();
        tree.create_dir_all("/a").unwrap();
        tree.ensure_file("/a/b.txt").unwrap();
        tree.ensure_file("/a-c.txt").unwrap();
        let paths: Vec<String> = tree
            .files_under("/")
            .unwrap()
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(paths, vec!["/a-c.txt", "/a/b.txt"]);
    }

    #[test]
    fn test_files_under_file_is_itself() {
        let tree = sample_tree();
        let files = tree.files_under("/docs/notes/a.txt").unwrap();
        assert_eq!(files, vec![("/docs/notes/a.txt".to_string(), "alpha")]);
    }
}
