//! Glob matching over the storage tree.
//!
//! A pattern is split into path segments. `**` descends any number of
//! directories (including none). A segment with `**` next to other text, such
//! as `**.md`, is matched against the relative path of every descendant with
//! `*` free to cross `/`. Every other segment is matched against a single
//! child name with `*`, `?` and `[...]`. Single-segment wildcards are scanned
//! one directory level at a time so unrelated subtrees are never visited.

use std::collections::BTreeMap;

use glob::{MatchOptions, Pattern};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use super::error::FsResult;
use super::info::Info;
use super::path;
use super::tree::Node;

const SEGMENT_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

const DEEP_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
enum Segment {
    /// `**`
    Recursive,
    /// `**` mixed with other text, matched against a descendant's relative path.
    Deep(Pattern),
    /// Anything else, matched against one name.
    Name(Pattern),
}

/// A compiled absolute glob pattern.
#[derive(Debug)]
pub(crate) struct GlobPattern {
    segments: Vec<Segment>,
}

impl GlobPattern {
    /// Compile an absolute pattern such as `/artifacts/**/*.md`.
    pub(crate) fn new(pattern: &str) -> FsResult<Self> {
        let segments = path::segments(pattern)
            .map(|segment| -> FsResult<Segment> {
                if segment == "**" {
                    Ok(Segment::Recursive)
                } else if segment.contains("**") {
                    Ok(Segment::Deep(Pattern::new(&collapse_stars(segment))?))
                } else {
                    Ok(Segment::Name(Pattern::new(segment)?))
                }
            })
            .collect::<FsResult<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Every node under `root` (the tree root) whose path matches, sorted by
    /// path, each reported once.
    pub(crate) fn matches(&self, root: &Node) -> Vec<Info> {
        let mut found = BTreeMap::new();
        walk(root, path::ROOT.to_string(), &self.segments, &mut found);
        found.into_values().collect()
    }
}

/// `a**b` becomes `a*b`.
fn collapse_stars(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c == '*' && out.ends_with('*') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Every node below `node`, with its path relative to `node`.
fn descendants<'a>(node: &'a Node, prefix: &str, out: &mut Vec<(String, &'a Node)>) {
    let Node::Directory(children) = node else {
        return;
    };
    for (name, child) in children {
        let relative = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        descendants(child, &relative, out);
        out.push((relative, child));
    }
}

fn walk(node: &Node, at: String, segments: &[Segment], found: &mut BTreeMap<String, Info>) {
    let Some((first, rest)) = segments.split_first() else {
        let info = node.info(&at);
        found.insert(at, info);
        return;
    };
    let Node::Directory(children) = node else {
        return;
    };
    match first {
        Segment::Name(pattern) => {
            for (name, child) in children {
                if pattern.matches_with(name, SEGMENT_OPTIONS) {
                    walk(child, path::join(&at, name), rest, found);
                }
            }
        }
        Segment::Deep(pattern) => {
            let mut below = Vec::new();
            descendants(node, "", &mut below);
            for (relative, child) in below {
                if pattern.matches_with(&relative, DEEP_OPTIONS) {
                    walk(child, path::join(&at, &relative), rest, found);
                }
            }
        }
        Segment::Recursive => {
            // A trailing `**` only matches what is below the directory.
            if !rest.is_empty() {
                walk(node, at.clone(), rest, found);
            }
            for (name, child) in children {
                let child_path = path::join(&at, name);
                if rest.is_empty() {
                    found.insert(child_path.clone(), child.info(&child_path));
                }
                walk(child, child_path, segments, found);
            }
        }
    }
}

/// File filter for directory grep.
///
/// Patterns without a `/` are matched against the file name; patterns with
/// one are matched against the absolute file path.
#[derive(Debug)]
pub(crate) struct FileFilter {
    by_name: GlobSet,
    by_path: GlobSet,
}

impl FileFilter {
    pub(crate) fn new<S: AsRef<str>>(patterns: &[S]) -> FsResult<Self> {
        let mut by_name = GlobSetBuilder::new();
        let mut by_path = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
            if pattern.contains('/') {
                by_path.add(glob);
            } else {
                by_name.add(glob);
            }
        }
        Ok(Self {
            by_name: by_name.build()?,
            by_path: by_path.build()?,
        })
    }

    pub(crate) fn matches(&self, file_path: &str) -> bool {
        self.by_name.is_match(path::file_name(file_path)) || self.by_path.is_match(file_path)
    }
}
