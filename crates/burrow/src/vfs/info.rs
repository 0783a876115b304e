//! Value types returned by filesystem operations.
//!
//! These are projections of the tree built fresh on every call; none of them
//! hold a reference into the tree.

use serde::{Deserialize, Serialize};

/// Type of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A text file
    File,
    /// A directory
    Directory,
}

/// Metadata for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Final path segment (`""` for the root)
    pub name: String,
    /// Absolute, normalized path
    pub path: String,
    /// File or directory
    #[serde(rename = "type")]
    pub node_type: NodeType,
}

impl Info {
    /// Whether this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.node_type == NodeType::Directory
    }

    /// Whether this node is a file.
    pub fn is_file(&self) -> bool {
        self.node_type == NodeType::File
    }
}

/// A line window read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    /// Metadata of the file that was read
    pub info: Info,
    /// First line index (inclusive) after clamping
    pub start: usize,
    /// Last line index (exclusive) after clamping
    pub end: usize,
    /// Selected lines joined with `\n`
    pub content: String,
}

/// How `write` treats existing content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace the whole file
    #[default]
    Overwrite,
    /// Concatenate onto the end of the file
    Append,
}

/// One regex match on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrepMatch {
    /// Path of the file containing the match
    pub path: String,
    /// The matched line, or its context window
    pub snippet: String,
    /// 0-indexed line of the match
    pub line_number: usize,
    /// `[start, end)` character offsets of the match within its line
    pub match_range: [usize; 2],
    /// The matched text
    #[serde(rename = "match")]
    pub match_text: String,
}
