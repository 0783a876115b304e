//! Typed arguments for each tool, deserialized from JSON call arguments.

use serde::Deserialize;

use crate::{GrepOptions, WriteMode};

fn root() -> String {
    crate::path::ROOT.to_string()
}

/// Arguments for `fs_info` and `fs_ls`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathArgs {
    /// Target path; defaults to the root.
    #[serde(default = "root")]
    pub path: String,
}

/// Arguments for `fs_mkdir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MkdirArgs {
    /// Directory to create.
    pub path: String,
}

/// Arguments for `fs_write`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WriteArgs {
    /// File to write.
    pub path: String,
    /// Text to write; `None` only ensures the file exists.
    #[serde(default)]
    pub content: Option<String>,
    /// Overwrite or append.
    #[serde(default)]
    pub mode: WriteMode,
}

/// Arguments for `fs_read`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReadArgs {
    /// File to read.
    pub path: String,
    /// First line, 0-based inclusive.
    #[serde(default)]
    pub start: Option<i64>,
    /// Last line, 0-based exclusive.
    #[serde(default)]
    pub end: Option<i64>,
}

/// Arguments for `fs_glob`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobArgs {
    /// Glob pattern.
    pub pattern: String,
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// One glob
    One(String),
    /// Several globs
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

/// Arguments for `fs_grep`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrepArgs {
    /// Regex applied to each line.
    pub grep_pattern: String,
    /// File or directory to search.
    pub path: String,
    /// Glob(s) filtering files when `path` is a directory.
    #[serde(default)]
    pub file_name_pattern: Option<OneOrMany>,
    /// Characters of context around a match.
    #[serde(default)]
    pub character_window: Option<usize>,
    /// Lines of context around a match.
    #[serde(default)]
    pub line_window: Option<usize>,
    /// Case-insensitive matching.
    #[serde(default)]
    pub ignore_case: bool,
}

impl GrepArgs {
    /// Split into the pattern, path and search options.
    pub fn into_parts(self) -> (String, String, GrepOptions) {
        let options = GrepOptions {
            file_name_pattern: self.file_name_pattern.map(Into::into),
            character_window: self.character_window,
            line_window: self.line_window,
            ignore_case: self.ignore_case,
        };
        (self.grep_pattern, self.path, options)
    }
}
